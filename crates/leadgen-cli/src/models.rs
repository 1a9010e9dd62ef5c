//! `models` command: show which Gemini models are available and which one
//! automatic selection would use.

use anyhow::Context;
use leadgen_core::AppConfig;
use leadgen_gemini::{choose_model, GeminiClient, ModelChoice, MODEL_PRIORITY};

/// List content-generation models and the model `choice` resolves to.
///
/// # Errors
///
/// Returns an error if `GEMINI_API_KEY` is not set, the client cannot be
/// built, or the listing call fails.
pub(crate) async fn run_models(config: &AppConfig, choice: &ModelChoice) -> anyhow::Result<()> {
    let api_key = config
        .gemini_api_key
        .as_deref()
        .context("GEMINI_API_KEY must be set to list models")?;

    let client = GeminiClient::with_base_url(
        api_key,
        config.request_timeout_secs,
        &config.user_agent,
        &config.gemini_base_url,
    )
    .context("failed to build Gemini client")?;

    let available = client
        .list_models()
        .await
        .context("failed to list Gemini models")?;

    if available.is_empty() {
        println!("no content-generation models available for this key");
    } else {
        println!("MODEL");
        for name in &available {
            println!("{name}");
        }
    }

    let resolved = match choice {
        ModelChoice::Explicit(id) => id.clone(),
        ModelChoice::Auto => choose_model(&available, &MODEL_PRIORITY),
    };
    println!();
    println!("{choice} resolves to: {resolved}");

    Ok(())
}
