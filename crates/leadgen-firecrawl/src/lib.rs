//! Client for the Firecrawl search and extraction APIs.
//!
//! Search finds candidate forum pages for a topic; extraction asks the
//! service to read a page and return user interactions shaped by a JSON
//! schema. This crate never fetches pages itself.

pub mod client;
pub mod error;
pub mod schema;
pub mod types;

pub use client::FirecrawlClient;
pub use error::FirecrawlError;
pub use schema::{interaction_schema, EXTRACTION_PROMPT};
pub use types::{discovery_query, SearchRequest};
