//! Shared test utilities for Herald integration tests.

#![allow(dead_code)]

use herald::api::{create_router, AppState};
use herald::cascade::Composer;
use herald::config::HeraldConfig;
use std::sync::Arc;

/// Environment variable that is never set, so resolved keys come only from config.
pub const UNSET_KEY_ENV: &str = "HERALD_TEST_KEY_THAT_IS_NEVER_SET";

/// Config pointing at a mock Gemini server, with no inter-attempt delay.
pub fn mock_config(base_url: &str, backends: &[&str], api_key: Option<&str>) -> HeraldConfig {
    let mut config = HeraldConfig::default();
    config.generation.base_url = base_url.to_string();
    config.generation.backends = backends.iter().map(|b| b.to_string()).collect();
    config.generation.api_key = api_key.map(str::to_string);
    config.generation.api_key_env = Some(UNSET_KEY_ENV.to_string());
    config.generation.retry_delay_ms = 0;
    config.generation.request_timeout_seconds = 5;
    config.message.product_name = "Streaky".to_string();
    config.message.cta_base_url = "https://streaky.example/app".to_string();
    config
}

pub fn composer(config: &HeraldConfig) -> Composer {
    Composer::from_config(config, Arc::new(reqwest::Client::new()))
}

pub fn app(config: HeraldConfig) -> axum::Router {
    let config = Arc::new(config);
    let state = AppState::new(config).expect("http client");
    create_router(Arc::new(state))
}

/// Gemini generateContent path for a model.
pub fn model_path(model: &str) -> String {
    format!("/v1beta/models/{}:generateContent", model)
}

/// A successful generateContent body whose text is `{"subject":..,"body":..}`.
pub fn gemini_success(subject: &str, body: &str) -> serde_json::Value {
    let text = serde_json::json!({ "subject": subject, "body": body }).to_string();
    serde_json::json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

pub fn gemini_error(code: u16, message: &str) -> serde_json::Value {
    serde_json::json!({
        "error": { "code": code, "message": message, "status": "ERROR" }
    })
}
