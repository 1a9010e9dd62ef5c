//! Lead pipeline: compress → discover → extract → flatten.
//!
//! Stages run one after another. Only compression failure ends a run with
//! an error; discovery and per-URL extraction failures are logged and turn
//! into empty results so the caller can tell the user nothing was found.

use anyhow::Context;
use futures::stream::{self, StreamExt};
use serde_json::Value;

use leadgen_core::{AppConfig, Credentials, LeadSession, PageExtraction};
use leadgen_firecrawl::{
    discovery_query, interaction_schema, FirecrawlClient, SearchRequest, EXTRACTION_PROMPT,
};
use leadgen_gemini::{compress, resolve_model, GeminiClient, ModelChoice};

pub(crate) struct Pipeline {
    gemini: GeminiClient,
    firecrawl: FirecrawlClient,
    target_site: String,
    search_timeout_ms: u64,
    extract_concurrency: usize,
}

impl Pipeline {
    /// Builds both API clients from config and the run's credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if either HTTP client cannot be constructed.
    pub(crate) fn new(config: &AppConfig, credentials: &Credentials) -> anyhow::Result<Self> {
        let gemini = GeminiClient::with_base_url(
            &credentials.gemini_api_key,
            config.request_timeout_secs,
            &config.user_agent,
            &config.gemini_base_url,
        )
        .context("failed to build Gemini client")?;

        let firecrawl = FirecrawlClient::with_base_url(
            &credentials.firecrawl_api_key,
            config.request_timeout_secs,
            &config.user_agent,
            &config.firecrawl_base_url,
        )
        .context("failed to build Firecrawl client")?
        .with_polling(
            std::time::Duration::from_millis(config.extract_poll_interval_ms),
            config.extract_max_polls,
        );

        Ok(Self {
            gemini,
            firecrawl,
            target_site: config.target_site.clone(),
            search_timeout_ms: config.search_timeout_ms,
            extract_concurrency: config.extract_concurrency.max(1),
        })
    }

    /// Runs every stage, recording each stage's output on `session`.
    ///
    /// Stops after discovery when no URLs are found.
    ///
    /// # Errors
    ///
    /// Returns an error only if query compression fails.
    pub(crate) async fn run(
        &self,
        session: &mut LeadSession,
        model: &ModelChoice,
    ) -> anyhow::Result<()> {
        let model_id = resolve_model(&self.gemini, model).await;
        tracing::info!(model = %model_id, "using Gemini model");
        session.record_model(model_id.clone());

        let topic = compress(&self.gemini, &session.request().description, &model_id)
            .await
            .context("failed to compress lead description into a search phrase")?;
        session.record_topic(topic.clone());

        let urls = self.discover(&topic, session.request().limit).await;
        tracing::info!(count = urls.len(), "discovered URLs");
        session.record_urls(urls.clone());
        if urls.is_empty() {
            return Ok(());
        }

        let pages = self.extract_all(&urls).await;
        tracing::info!(
            pages = pages.len(),
            urls = urls.len(),
            "extracted interactions"
        );
        session.record_pages(pages);
        Ok(())
    }

    /// Searches the target site for pages about `topic`.
    ///
    /// Any failure yields an empty list.
    pub(crate) async fn discover(&self, topic: &str, limit: u32) -> Vec<String> {
        let request = SearchRequest::new(
            discovery_query(&self.target_site, topic),
            limit,
            self.search_timeout_ms,
        );

        match self.firecrawl.search(&request).await {
            Ok(urls) => urls,
            Err(e) => {
                tracing::warn!(error = %e, "search failed; treating as no results");
                Vec::new()
            }
        }
    }

    /// Extracts interactions from every URL with bounded concurrency.
    ///
    /// Results keep the input URL order. A failing URL is logged and left
    /// out without affecting the others; so is a URL with no interactions.
    pub(crate) async fn extract_all(&self, urls: &[String]) -> Vec<PageExtraction> {
        let schema = interaction_schema();

        let pages: Vec<Option<PageExtraction>> = stream::iter(urls)
            .map(|url| self.extract_page(url, &schema))
            .buffered(self.extract_concurrency)
            .collect()
            .await;

        pages.into_iter().flatten().collect()
    }

    async fn extract_page(&self, url: &str, schema: &Value) -> Option<PageExtraction> {
        match self.firecrawl.extract(url, EXTRACTION_PROMPT, schema).await {
            Ok(interactions) => {
                let count = interactions.len();
                let page = PageExtraction::new(url, interactions);
                if page.is_none() {
                    tracing::debug!(url, "no interactions found on page");
                } else {
                    tracing::debug!(url, count, "extracted interactions");
                }
                page
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "extraction failed; skipping URL");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
