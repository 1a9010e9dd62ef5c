//! Query compressor: distils a long lead description into a short search phrase.

use crate::client::GeminiClient;
use crate::error::GeminiError;

const INSTRUCTIONS: &str = "\
You are an expert at transforming detailed user queries into concise company descriptions.
Your task is to extract the core business/product focus in 3-4 words.

Examples:
Input: \"Generate leads looking for AI-powered customer support chatbots for e-commerce stores.\"
Output: \"AI customer support chatbots for e commerce\"

Input: \"Find people interested in voice cloning technology for creating audiobooks and podcasts\"
Output: \"voice cloning technology\"

Input: \"Looking for users who need automated video editing software with AI capabilities\"
Output: \"AI video editing software\"

Input: \"Need to find businesses interested in implementing machine learning solutions for fraud detection\"
Output: \"ML fraud detection\"

Always focus on the core product/service and keep it concise but clear.";

/// Builds the full few-shot prompt for `description`.
#[must_use]
pub fn compression_prompt(description: &str) -> String {
    format!("{INSTRUCTIONS}\n\nInput: \"{description}\"\nOutput:")
}

/// Compresses a lead description into a three or four word topic phrase.
///
/// The completion is returned as the model produced it, trimmed. There is
/// no fallback phrase: a failed or empty completion is an error.
///
/// # Errors
///
/// Returns [`GeminiError`] if the completion call fails or yields no text.
pub async fn compress(
    client: &GeminiClient,
    description: &str,
    model: &str,
) -> Result<String, GeminiError> {
    let topic = client
        .generate_content(model, &compression_prompt(description))
        .await?;
    tracing::info!(model, topic = %topic, "compressed lead description");
    Ok(topic)
}
