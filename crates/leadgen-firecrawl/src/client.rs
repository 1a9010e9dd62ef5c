//! HTTP client for the Firecrawl v1 REST API.
//!
//! Wraps `reqwest` with bearer-token auth, a per-call timeout, and typed
//! response handling. Search failures that the API reports (non-2xx status
//! or `"success": false`) come back as an empty result so that callers can
//! treat them as "nothing found"; extraction reports them as errors so the
//! caller can log and skip the URL.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use leadgen_core::UserInteraction;

use crate::error::FirecrawlError;
use crate::types::{ExtractResponse, SearchRequest, SearchResponse};

const DEFAULT_BASE_URL: &str = "https://api.firecrawl.dev/";
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
const DEFAULT_MAX_POLLS: u32 = 30;

/// Client for the Firecrawl search and extract endpoints.
///
/// Use [`FirecrawlClient::new`] for production or
/// [`FirecrawlClient::with_base_url`] to point at a mock server in tests.
pub struct FirecrawlClient {
    client: Client,
    api_key: String,
    base_url: Url,
    poll_interval: Duration,
    max_polls: u32,
}

impl FirecrawlClient {
    /// Creates a client pointed at the hosted Firecrawl API.
    ///
    /// # Errors
    ///
    /// Returns [`FirecrawlError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, FirecrawlError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (self-hosted Firecrawl or wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`FirecrawlError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`FirecrawlError::InvalidBaseUrl`] if `base_url` does
    /// not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, FirecrawlError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `Url::join` appends instead of
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| FirecrawlError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_polls: DEFAULT_MAX_POLLS,
        })
    }

    /// Overrides how often, and how many times, a pending extract job is polled.
    #[must_use]
    pub fn with_polling(mut self, interval: Duration, max_polls: u32) -> Self {
        self.poll_interval = interval;
        self.max_polls = max_polls;
        self
    }

    /// Runs a web search and returns result URLs in the service's order.
    ///
    /// At most `request.limit` URLs are returned; entries without a URL are
    /// skipped. A non-2xx status or `"success": false` yields an empty list.
    ///
    /// # Errors
    ///
    /// - [`FirecrawlError::Http`] on network failure or timeout.
    /// - [`FirecrawlError::Deserialize`] if a 2xx body is not the expected shape.
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<String>, FirecrawlError> {
        let url = self.endpoint("v1/search")?;
        tracing::debug!(query = %request.query, limit = request.limit, "firecrawl search");

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "search returned non-success status");
            return Ok(Vec::new());
        }

        let body = response.text().await?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| FirecrawlError::Deserialize {
                context: "search response".to_owned(),
                source: e,
            })?;

        if !parsed.success {
            tracing::warn!("search response did not report success");
            return Ok(Vec::new());
        }

        let limit = usize::try_from(request.limit).unwrap_or(usize::MAX);
        Ok(parsed
            .data
            .into_iter()
            .filter_map(|result| result.url)
            .take(limit)
            .collect())
    }

    /// Asks the extraction service for the interactions on one page.
    ///
    /// Submits the job, then polls `GET /v1/extract/{id}` until it reaches
    /// a terminal state. Only a `completed` job yields interactions.
    ///
    /// # Errors
    ///
    /// - [`FirecrawlError::Api`] if the service reports `"success": false`.
    /// - [`FirecrawlError::ExtractNotCompleted`] if the job fails or is cancelled.
    /// - [`FirecrawlError::ExtractTimedOut`] if the job is still pending after
    ///   the configured number of polls.
    /// - [`FirecrawlError::UnexpectedStatus`], [`FirecrawlError::Http`], or
    ///   [`FirecrawlError::Deserialize`] on transport or shape failures.
    pub async fn extract(
        &self,
        page_url: &str,
        prompt: &str,
        schema: &Value,
    ) -> Result<Vec<UserInteraction>, FirecrawlError> {
        let url = self.endpoint("v1/extract")?;
        let body = json!({
            "urls": [page_url],
            "prompt": prompt,
            "schema": schema,
        });

        let submitted: ExtractResponse = self
            .send_json(
                self.client.post(url).bearer_auth(&self.api_key).json(&body),
                &format!("extract submit for {page_url}"),
            )
            .await?;

        let job_id = submitted.id.clone();
        if let Some(interactions) = settle(submitted)? {
            return Ok(interactions);
        }

        let job_id = job_id.ok_or_else(|| {
            FirecrawlError::Api("extract response has neither completed data nor a job id".into())
        })?;
        self.poll_extract(&job_id).await
    }

    async fn poll_extract(&self, job_id: &str) -> Result<Vec<UserInteraction>, FirecrawlError> {
        let url = self.endpoint(&format!("v1/extract/{job_id}"))?;

        for attempt in 1..=self.max_polls {
            tokio::time::sleep(self.poll_interval).await;
            let status: ExtractResponse = self
                .send_json(
                    self.client.get(url.clone()).bearer_auth(&self.api_key),
                    &format!("extract status for job {job_id}"),
                )
                .await?;

            if let Some(interactions) = settle(status)? {
                return Ok(interactions);
            }
            tracing::debug!(job_id, attempt, "extract job still pending");
        }

        Err(FirecrawlError::ExtractTimedOut {
            job_id: job_id.to_owned(),
            polls: self.max_polls,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, FirecrawlError> {
        self.base_url
            .join(path)
            .map_err(|e| FirecrawlError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Sends a request, asserts a 2xx status, and parses the body as JSON.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<T, FirecrawlError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FirecrawlError::UnexpectedStatus {
                status: status.as_u16(),
                context: context.to_owned(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| FirecrawlError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

/// Interprets an extract response: `Some` when the job is done, `None` while pending.
fn settle(response: ExtractResponse) -> Result<Option<Vec<UserInteraction>>, FirecrawlError> {
    if !response.success {
        return Err(FirecrawlError::Api(
            response
                .error
                .unwrap_or_else(|| "extract request was not successful".to_owned()),
        ));
    }

    match response.status.as_deref() {
        Some("completed") => Ok(Some(decode_interactions(
            response
                .data
                .and_then(|data| data.interactions)
                .unwrap_or_default(),
        ))),
        Some(status @ ("failed" | "cancelled")) => Err(FirecrawlError::ExtractNotCompleted {
            status: status.to_owned(),
        }),
        _ => Ok(None),
    }
}

/// Decodes each interaction independently; malformed items are logged and dropped.
fn decode_interactions(raw: Vec<serde_json::Value>) -> Vec<UserInteraction> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(interaction) => Some(interaction),
            Err(e) => {
                tracing::warn!(index, error = %e, "dropping malformed interaction");
                None
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
