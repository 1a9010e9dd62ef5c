//! Firecrawl request and response bodies.

use serde::{Deserialize, Serialize};

/// Builds the discovery query for a topic on the target site.
#[must_use]
pub fn discovery_query(target_site: &str, topic: &str) -> String {
    format!("{target_site} websites where people are looking for {topic} services")
}

/// Body of `POST /v1/search`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub limit: u32,
    pub lang: &'static str,
    pub location: &'static str,
    /// Server-side timeout in milliseconds.
    pub timeout: u64,
}

impl SearchRequest {
    #[must_use]
    pub fn new(query: String, limit: u32, timeout_ms: u64) -> Self {
        Self {
            query,
            limit,
            lang: "en",
            location: "United States",
            timeout: timeout_ms,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResult {
    #[serde(default)]
    pub url: Option<String>,
}

/// Shared shape of the extract submit and job-status responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ExtractResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data: Option<ExtractData>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ExtractData {
    /// Kept raw so each interaction is decoded on its own.
    #[serde(default)]
    pub interactions: Option<Vec<serde_json::Value>>,
}
