/// Process-wide settings, read once from the environment.
///
/// Credentials are optional here; a run refuses to start without them (see
/// [`crate::LeadSession::new`]) but other commands do not need both.
#[derive(Clone)]
pub struct AppConfig {
    pub firecrawl_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub log_level: String,
    pub firecrawl_base_url: String,
    pub gemini_base_url: String,
    /// Site named in the discovery query, e.g. `quora`.
    pub target_site: String,
    pub request_timeout_secs: u64,
    pub search_timeout_ms: u64,
    pub max_links: u32,
    pub extract_concurrency: usize,
    pub extract_poll_interval_ms: u64,
    pub extract_max_polls: u32,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "firecrawl_api_key",
                &self.firecrawl_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("log_level", &self.log_level)
            .field("firecrawl_base_url", &self.firecrawl_base_url)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("target_site", &self.target_site)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("search_timeout_ms", &self.search_timeout_ms)
            .field("max_links", &self.max_links)
            .field("extract_concurrency", &self.extract_concurrency)
            .field("extract_poll_interval_ms", &self.extract_poll_interval_ms)
            .field("extract_max_polls", &self.extract_max_polls)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
