use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_applies_defaults_on_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");

    assert!(cfg.firecrawl_api_key.is_none());
    assert!(cfg.gemini_api_key.is_none());
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.firecrawl_base_url, "https://api.firecrawl.dev");
    assert_eq!(cfg.gemini_base_url, "https://generativelanguage.googleapis.com");
    assert_eq!(cfg.target_site, "quora");
    assert_eq!(cfg.request_timeout_secs, 60);
    assert_eq!(cfg.search_timeout_ms, 60_000);
    assert_eq!(cfg.max_links, 10);
    assert_eq!(cfg.extract_concurrency, 3);
    assert_eq!(cfg.extract_poll_interval_ms, 2000);
    assert_eq!(cfg.extract_max_polls, 30);
    assert_eq!(cfg.user_agent, "leadgen/0.1 (lead-discovery)");
}

#[test]
fn build_app_config_reads_credentials() {
    let mut map = HashMap::new();
    map.insert("FIRECRAWL_API_KEY", "fc-123");
    map.insert("GEMINI_API_KEY", "  gm-456  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();

    assert_eq!(cfg.firecrawl_api_key.as_deref(), Some("fc-123"));
    assert_eq!(cfg.gemini_api_key.as_deref(), Some("gm-456"));
}

#[test]
fn build_app_config_treats_blank_credential_as_unset() {
    let mut map = HashMap::new();
    map.insert("FIRECRAWL_API_KEY", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.firecrawl_api_key.is_none());
}

#[test]
fn build_app_config_overrides_target_site_and_urls() {
    let mut map = HashMap::new();
    map.insert("LEADGEN_TARGET_SITE", "reddit");
    map.insert("LEADGEN_FIRECRAWL_BASE_URL", "http://localhost:3002");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.target_site, "reddit");
    assert_eq!(cfg.firecrawl_base_url, "http://localhost:3002");
}

#[test]
fn build_app_config_fails_with_invalid_timeout() {
    let mut map = HashMap::new();
    map.insert("LEADGEN_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEADGEN_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(LEADGEN_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_concurrency() {
    let mut map = HashMap::new();
    map.insert("LEADGEN_EXTRACT_CONCURRENCY", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEADGEN_EXTRACT_CONCURRENCY"),
        "expected InvalidEnvVar(LEADGEN_EXTRACT_CONCURRENCY), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_max_links() {
    let mut map = HashMap::new();
    map.insert("LEADGEN_MAX_LINKS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEADGEN_MAX_LINKS"),
        "expected InvalidEnvVar(LEADGEN_MAX_LINKS), got: {result:?}"
    );
}

#[test]
fn build_app_config_parses_poll_settings() {
    let mut map = HashMap::new();
    map.insert("LEADGEN_EXTRACT_POLL_INTERVAL_MS", "250");
    map.insert("LEADGEN_EXTRACT_MAX_POLLS", "4");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.extract_poll_interval_ms, 250);
    assert_eq!(cfg.extract_max_polls, 4);
}

#[test]
fn debug_output_redacts_credentials() {
    let mut map = HashMap::new();
    map.insert("FIRECRAWL_API_KEY", "fc-secret");
    map.insert("GEMINI_API_KEY", "gm-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(!debug.contains("fc-secret"));
    assert!(!debug.contains("gm-secret"));
    assert!(debug.contains("[redacted]"));
}
