//! Per-run context.
//!
//! A [`LeadSession`] carries everything one pipeline run needs (credentials,
//! the caller's request) and accumulates each stage's output. It is created
//! once per run and passed explicitly to every stage; nothing is shared
//! between runs.

use uuid::Uuid;

use crate::app_config::AppConfig;
use crate::error::SessionError;
use crate::leads::{flatten, FlatLeadRecord, PageExtraction};

/// API keys for the search/extraction and language-model providers.
#[derive(Clone)]
pub struct Credentials {
    pub firecrawl_api_key: String,
    pub gemini_api_key: String,
}

impl Credentials {
    /// Validates that both keys are present and non-blank.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MissingCredential`] naming the first missing key.
    pub fn new(firecrawl: Option<&str>, gemini: Option<&str>) -> Result<Self, SessionError> {
        let require = |value: Option<&str>, name: &'static str| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
                .ok_or(SessionError::MissingCredential(name))
        };

        Ok(Self {
            firecrawl_api_key: require(firecrawl, "FIRECRAWL_API_KEY")?,
            gemini_api_key: require(gemini, "GEMINI_API_KEY")?,
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("firecrawl_api_key", &"[redacted]")
            .field("gemini_api_key", &"[redacted]")
            .finish()
    }
}

/// What the caller asked for.
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// Free-text description of the leads to find.
    pub description: String,
    /// Number of links to discover.
    pub limit: u32,
}

/// Stage outputs accumulated during a run.
#[derive(Debug, Clone, Default)]
pub struct RunResults {
    pub model_id: Option<String>,
    pub topic: Option<String>,
    pub urls: Vec<String>,
    pub pages: Vec<PageExtraction>,
    pub records: Vec<FlatLeadRecord>,
}

#[derive(Debug)]
pub struct LeadSession {
    run_id: Uuid,
    credentials: Credentials,
    request: RunRequest,
    results: RunResults,
}

impl LeadSession {
    /// Creates a session after validating every required input.
    ///
    /// # Errors
    ///
    /// - [`SessionError::MissingInput`] if the description is blank.
    /// - [`SessionError::InvalidLimit`] if `limit` is outside `1..=max_links`.
    pub fn new(
        credentials: Credentials,
        request: RunRequest,
        max_links: u32,
    ) -> Result<Self, SessionError> {
        let description = request.description.trim();
        if description.is_empty() {
            return Err(SessionError::MissingInput("description"));
        }
        if request.limit == 0 || request.limit > max_links {
            return Err(SessionError::InvalidLimit {
                limit: request.limit,
                max: max_links,
            });
        }

        Ok(Self {
            run_id: Uuid::new_v4(),
            credentials,
            request: RunRequest {
                description: description.to_owned(),
                limit: request.limit,
            },
            results: RunResults::default(),
        })
    }

    /// Creates a session using the credentials and link bound from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if a credential or input is missing or the
    /// limit is out of range.
    pub fn from_config(config: &AppConfig, request: RunRequest) -> Result<Self, SessionError> {
        let credentials = Credentials::new(
            config.firecrawl_api_key.as_deref(),
            config.gemini_api_key.as_deref(),
        )?;
        Self::new(credentials, request, config.max_links)
    }

    #[must_use]
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    #[must_use]
    pub fn request(&self) -> &RunRequest {
        &self.request
    }

    #[must_use]
    pub fn results(&self) -> &RunResults {
        &self.results
    }

    #[must_use]
    pub fn records(&self) -> &[FlatLeadRecord] {
        &self.results.records
    }

    pub fn record_model(&mut self, model_id: impl Into<String>) {
        self.results.model_id = Some(model_id.into());
    }

    pub fn record_topic(&mut self, topic: impl Into<String>) {
        self.results.topic = Some(topic.into());
    }

    pub fn record_urls(&mut self, urls: Vec<String>) {
        self.results.urls = urls;
    }

    /// Stores page extractions and the flattened records derived from them.
    ///
    /// Pages whose URL was not discovered in this run are dropped.
    pub fn record_pages(&mut self, mut pages: Vec<PageExtraction>) {
        let urls = &self.results.urls;
        pages.retain(|page| urls.contains(&page.source_url));
        self.results.records = flatten(&pages);
        self.results.pages = pages;
    }

    /// Discards all stage outputs, keeping credentials and the request.
    pub fn clear(&mut self) {
        self.results = RunResults::default();
    }
}
