use thiserror::Error;

/// Errors returned by the Firecrawl API client.
#[derive(Debug, Error)]
pub enum FirecrawlError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {context}")]
    UnexpectedStatus { status: u16, context: String },

    /// The API answered with `"success": false`.
    #[error("Firecrawl API error: {0}")]
    Api(String),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The extract job ended in a terminal state other than `completed`.
    #[error("extract job finished with status \"{status}\"")]
    ExtractNotCompleted { status: String },

    #[error("extract job {job_id} still pending after {polls} polls")]
    ExtractTimedOut { job_id: String, polls: u32 },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
