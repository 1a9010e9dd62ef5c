//! Client for the Gemini generative language API.
//!
//! Provides the two calls the lead pipeline needs (content generation and
//! model listing) plus the query compressor and automatic model selection
//! built on top of them.

pub mod client;
pub mod compress;
pub mod error;
pub mod models;
mod types;

pub use client::GeminiClient;
pub use compress::{compress, compression_prompt};
pub use error::GeminiError;
pub use models::{choose_model, resolve_model, ModelChoice, FALLBACK_MODEL, MODEL_PRIORITY};
