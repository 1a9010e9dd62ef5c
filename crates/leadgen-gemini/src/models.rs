//! Model selection.
//!
//! Callers either name a model explicitly or ask for automatic selection,
//! which picks the newest/fastest available model from [`MODEL_PRIORITY`].

use std::str::FromStr;

use crate::client::{short_model_name, GeminiClient};

/// Preferred model families, newest/fastest first.
pub const MODEL_PRIORITY: [&str; 6] = [
    "gemini-2.5-flash",
    "gemini-2.5-pro",
    "gemini-2.0-flash",
    "gemini-2.0-pro",
    "gemini-1.5-pro",
    "gemini-1.5-flash",
];

/// Used when no available model matches any priority entry.
pub const FALLBACK_MODEL: &str = "gemini-1.5-pro";

/// The caller's model preference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelChoice {
    Auto,
    Explicit(String),
}

impl FromStr for ModelChoice {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err("model must not be empty (use \"auto\" for automatic selection)".into());
        }
        if trimmed.eq_ignore_ascii_case("auto") || trimmed.eq_ignore_ascii_case("auto (recommended)")
        {
            return Ok(Self::Auto);
        }
        short_model_name(trimmed)
            .map(Self::Explicit)
            .ok_or_else(|| format!("invalid model id: {trimmed:?}"))
    }
}

impl std::fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Explicit(id) => f.write_str(id),
        }
    }
}

/// Picks the first available model matching the earliest priority entry.
///
/// A priority entry matches an available name that contains it as a
/// substring; the available name is returned. Falls back to
/// [`FALLBACK_MODEL`] when nothing matches.
#[must_use]
pub fn choose_model<S: AsRef<str>>(available: &[S], priority: &[&str]) -> String {
    priority
        .iter()
        .find_map(|wanted| {
            available
                .iter()
                .map(|name| name.as_ref())
                .find(|name: &&str| name.contains(wanted))
        })
        .unwrap_or(FALLBACK_MODEL)
        .to_owned()
}

/// Resolves the caller's choice to a concrete model id.
///
/// Explicit choices are returned unchanged. For [`ModelChoice::Auto`] the
/// provider is asked for its models; a listing failure is logged and treated
/// as an empty list, which selects [`FALLBACK_MODEL`].
pub async fn resolve_model(client: &GeminiClient, choice: &ModelChoice) -> String {
    match choice {
        ModelChoice::Explicit(id) => id.clone(),
        ModelChoice::Auto => {
            let available = client.list_models().await.unwrap_or_else(|e| {
                tracing::warn!(error = %e, "model listing failed; using fallback model");
                Vec::new()
            });
            let chosen = choose_model(&available, &MODEL_PRIORITY);
            tracing::debug!(available = available.len(), model = %chosen, "auto-selected model");
            chosen
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choose_model_returns_matching_available_name() {
        let available = ["gemini-2.5-flash-001", "models/gemini-1.5-pro"];
        assert_eq!(
            choose_model(&available, &MODEL_PRIORITY),
            "gemini-2.5-flash-001"
        );
    }

    #[test]
    fn choose_model_respects_priority_over_listing_order() {
        let available = ["gemini-1.5-flash", "gemini-2.0-flash-exp", "gemini-1.5-pro"];
        assert_eq!(
            choose_model(&available, &MODEL_PRIORITY),
            "gemini-2.0-flash-exp"
        );
    }

    #[test]
    fn choose_model_falls_back_when_nothing_matches() {
        let available = ["text-bison-001", "embedding-001"];
        assert_eq!(choose_model(&available, &MODEL_PRIORITY), FALLBACK_MODEL);
    }

    #[test]
    fn choose_model_falls_back_on_empty_listing() {
        let available: [&str; 0] = [];
        assert_eq!(choose_model(&available, &MODEL_PRIORITY), FALLBACK_MODEL);
    }

    #[test]
    fn model_choice_parses_auto_spellings() {
        assert_eq!("auto".parse::<ModelChoice>().unwrap(), ModelChoice::Auto);
        assert_eq!("AUTO".parse::<ModelChoice>().unwrap(), ModelChoice::Auto);
        assert_eq!(
            "Auto (recommended)".parse::<ModelChoice>().unwrap(),
            ModelChoice::Auto
        );
    }

    #[test]
    fn model_choice_keeps_explicit_id() {
        assert_eq!(
            "gemini-1.5-flash".parse::<ModelChoice>().unwrap(),
            ModelChoice::Explicit("gemini-1.5-flash".to_owned())
        );
    }

    #[test]
    fn model_choice_strips_resource_prefix() {
        assert_eq!(
            "models/gemini-1.5-pro".parse::<ModelChoice>().unwrap(),
            ModelChoice::Explicit("gemini-1.5-pro".to_owned())
        );
        assert!("models/".parse::<ModelChoice>().is_err());
    }

    #[test]
    fn model_choice_rejects_blank() {
        assert!("  ".parse::<ModelChoice>().is_err());
    }
}
