use serde_json::json;

use super::*;

fn test_client(base_url: &str) -> FirecrawlClient {
    FirecrawlClient::with_base_url("fc-test", 5, "leadgen-test/0.1", base_url)
        .expect("client construction should not fail")
}

fn response(value: serde_json::Value) -> ExtractResponse {
    serde_json::from_value(value).expect("fixture should parse")
}

#[test]
fn endpoint_joins_onto_base_path() {
    let client = test_client("http://localhost:3002/firecrawl");
    let url = client.endpoint("v1/search").unwrap();
    assert_eq!(url.as_str(), "http://localhost:3002/firecrawl/v1/search");
}

#[test]
fn endpoint_strips_trailing_slashes() {
    let client = test_client("https://api.firecrawl.dev//");
    let url = client.endpoint("v1/extract").unwrap();
    assert_eq!(url.as_str(), "https://api.firecrawl.dev/v1/extract");
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = FirecrawlClient::with_base_url("fc-test", 5, "ua", "not a url");
    assert!(matches!(result, Err(FirecrawlError::InvalidBaseUrl { .. })));
}

#[test]
fn settle_returns_interactions_when_completed() {
    let settled = settle(response(json!({
        "success": true,
        "status": "completed",
        "data": { "interactions": [{ "username": "alice" }] }
    })))
    .unwrap();

    let interactions = settled.expect("completed job should settle");
    assert_eq!(interactions.len(), 1);
    assert_eq!(interactions[0].username.as_deref(), Some("alice"));
}

#[test]
fn settle_treats_completed_without_data_as_empty() {
    let settled = settle(response(json!({
        "success": true,
        "status": "completed",
        "data": { "interactions": null }
    })))
    .unwrap();
    assert_eq!(settled, Some(Vec::new()));
}

#[test]
fn settle_drops_only_malformed_interactions() {
    let settled = settle(response(json!({
        "success": true,
        "status": "completed",
        "data": { "interactions": [
            { "username": ["not", "a", "string"] },
            { "username": "bob", "upvotes": "1.2K", "links": ["https://shop.example", null] },
            null
        ] }
    })))
    .unwrap();

    let interactions = settled.expect("completed job should settle");
    assert_eq!(interactions.len(), 1);
    assert_eq!(interactions[0].username.as_deref(), Some("bob"));
    assert_eq!(interactions[0].upvotes, Some(1200));
    assert_eq!(
        interactions[0].links.as_deref(),
        Some(&["https://shop.example".to_owned()][..])
    );
}

#[test]
fn settle_keeps_waiting_while_processing() {
    let settled = settle(response(json!({ "success": true, "status": "processing" }))).unwrap();
    assert!(settled.is_none());
}

#[test]
fn settle_rejects_failed_jobs() {
    let err = settle(response(json!({ "success": true, "status": "failed" }))).unwrap_err();
    assert!(matches!(err, FirecrawlError::ExtractNotCompleted { ref status } if status == "failed"));
}

#[test]
fn settle_surfaces_api_error_message() {
    let err = settle(response(json!({ "success": false, "error": "Insufficient credits" })))
        .unwrap_err();
    assert!(matches!(err, FirecrawlError::Api(ref msg) if msg == "Insufficient credits"));
}
