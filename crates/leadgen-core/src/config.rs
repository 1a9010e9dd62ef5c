use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank secrets are treated the same as unset ones.
    let secret = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let firecrawl_api_key = secret("FIRECRAWL_API_KEY");
    let gemini_api_key = secret("GEMINI_API_KEY");

    let log_level = or_default("LEADGEN_LOG_LEVEL", "info");
    let firecrawl_base_url = or_default("LEADGEN_FIRECRAWL_BASE_URL", "https://api.firecrawl.dev");
    let gemini_base_url = or_default(
        "LEADGEN_GEMINI_BASE_URL",
        "https://generativelanguage.googleapis.com",
    );
    let target_site = or_default("LEADGEN_TARGET_SITE", "quora");

    let request_timeout_secs = parse_u64("LEADGEN_REQUEST_TIMEOUT_SECS", "60")?;
    let search_timeout_ms = parse_u64("LEADGEN_SEARCH_TIMEOUT_MS", "60000")?;
    let max_links = parse_u32("LEADGEN_MAX_LINKS", "10")?;
    if max_links == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "LEADGEN_MAX_LINKS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let extract_concurrency = parse_usize("LEADGEN_EXTRACT_CONCURRENCY", "3")?;
    if extract_concurrency == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "LEADGEN_EXTRACT_CONCURRENCY".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let extract_poll_interval_ms = parse_u64("LEADGEN_EXTRACT_POLL_INTERVAL_MS", "2000")?;
    let extract_max_polls = parse_u32("LEADGEN_EXTRACT_MAX_POLLS", "30")?;
    let user_agent = or_default("LEADGEN_USER_AGENT", "leadgen/0.1 (lead-discovery)");

    Ok(AppConfig {
        firecrawl_api_key,
        gemini_api_key,
        log_level,
        firecrawl_base_url,
        gemini_base_url,
        target_site,
        request_timeout_secs,
        search_timeout_ms,
        max_links,
        extract_concurrency,
        extract_poll_interval_ms,
        extract_max_polls,
        user_agent,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
