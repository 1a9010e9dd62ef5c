//! Shared types for the lead generation pipeline.
//!
//! Holds the lead data model, the flattening step that turns per-page
//! extractions into exportable rows, CSV/JSON export, the per-run session
//! context, and application configuration.

pub mod app_config;
pub mod config;
pub mod error;
pub mod export;
pub mod leads;
pub mod session;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, ExportError, SessionError};
pub use export::{render_csv, render_json, save_csv, CSV_HEADERS};
pub use leads::{flatten, FlatLeadRecord, PageExtraction, PostType, UserInteraction, LINK_DELIMITER};
pub use session::{Credentials, LeadSession, RunRequest, RunResults};
