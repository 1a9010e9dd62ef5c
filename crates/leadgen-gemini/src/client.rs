//! HTTP client for the Gemini `v1beta` REST API.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::error::GeminiError;
use crate::types::{
    Content, ErrorEnvelope, GenerateRequest, GenerateResponse, ListModelsResponse, RequestPart,
};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Cap on `nextPageToken` hops so a misbehaving server cannot loop forever.
const MAX_MODEL_PAGES: usize = 20;

/// Generation methods that mark a model as usable for text completion.
const CONTENT_METHODS: [&str; 2] = ["generateContent", "createContent"];

/// Client for the Gemini generative language API.
///
/// Use [`GeminiClient::new`] for production or [`GeminiClient::with_base_url`]
/// to point at a mock server in tests.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl GeminiClient {
    /// Creates a client pointed at the hosted Gemini API.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, GeminiError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`GeminiError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, GeminiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GeminiError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Sends `prompt` to `model` and returns the generated text.
    ///
    /// Text parts of the first candidate are concatenated and trimmed.
    ///
    /// # Errors
    ///
    /// - [`GeminiError::UnexpectedStatus`] on a non-2xx response.
    /// - [`GeminiError::EmptyCompletion`] if the model produced no text.
    /// - [`GeminiError::Http`] / [`GeminiError::Deserialize`] on transport or
    ///   shape failures.
    pub async fn generate_content(&self, model: &str, prompt: &str) -> Result<String, GeminiError> {
        let model = model.strip_prefix(MODEL_RESOURCE_PREFIX).unwrap_or(model);
        let url = self.endpoint(&format!("v1beta/models/{model}:generateContent"))?;
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        tracing::debug!(model, "gemini generateContent");
        let response: GenerateResponse = self
            .send_json(
                self.client.post(url).json(&request),
                &format!("generateContent({model})"),
            )
            .await?;

        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        let text = text.trim();
        if text.is_empty() {
            return Err(GeminiError::EmptyCompletion {
                model: model.to_owned(),
            });
        }
        Ok(text.to_owned())
    }

    /// Lists models that support content generation.
    ///
    /// Follows `nextPageToken` pagination. Names are returned without the
    /// `models/` prefix, in the order the API lists them.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError`] if any page request fails.
    pub async fn list_models(&self) -> Result<Vec<String>, GeminiError> {
        let mut names = Vec::new();
        let mut page_token: Option<String> = None;

        for _ in 0..MAX_MODEL_PAGES {
            let mut url = self.endpoint("v1beta/models")?;
            if let Some(token) = &page_token {
                url.query_pairs_mut().append_pair("pageToken", token);
            }

            let page: ListModelsResponse = self
                .send_json(self.client.get(url), "listModels")
                .await?;

            names.extend(
                page.models
                    .into_iter()
                    .filter(|m| {
                        m.supported_generation_methods
                            .iter()
                            .any(|method| CONTENT_METHODS.contains(&method.as_str()))
                    })
                    .filter_map(|m| short_model_name(&m.name)),
            );

            page_token = page.next_page_token.filter(|t| !t.is_empty());
            if page_token.is_none() {
                break;
            }
        }

        Ok(names)
    }

    fn endpoint(&self, path: &str) -> Result<Url, GeminiError> {
        self.base_url
            .join(path)
            .map_err(|e| GeminiError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Attaches the API key, sends, asserts a 2xx status, and parses JSON.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<T, GeminiError> {
        let response = request.header(API_KEY_HEADER, &self.api_key).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or(body);
            return Err(GeminiError::UnexpectedStatus {
                status: status.as_u16(),
                context: context.to_owned(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| GeminiError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

const MODEL_RESOURCE_PREFIX: &str = "models/";

/// `"models/gemini-1.5-pro"` → `"gemini-1.5-pro"`; blank names are dropped.
pub(crate) fn short_model_name(name: &str) -> Option<String> {
    let short = name.rsplit('/').next().unwrap_or(name).trim();
    (!short.is_empty()).then(|| short.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_model_name_strips_resource_prefix() {
        assert_eq!(
            short_model_name("models/gemini-1.5-pro").as_deref(),
            Some("gemini-1.5-pro")
        );
        assert_eq!(
            short_model_name("gemini-2.5-flash").as_deref(),
            Some("gemini-2.5-flash")
        );
        assert_eq!(short_model_name("models/"), None);
    }

    #[test]
    fn endpoint_builds_generate_content_path() {
        let client = GeminiClient::with_base_url("k", 5, "ua", "http://localhost:8080/").unwrap();
        let url = client
            .endpoint("v1beta/models/gemini-1.5-pro:generateContent")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/v1beta/models/gemini-1.5-pro:generateContent"
        );
    }
}
