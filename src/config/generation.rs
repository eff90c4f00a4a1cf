//! Generation cascade configuration

use crate::backend::BackendId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ordered backend list and the credential they share.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Backend identifiers in priority order (first = most preferred).
    pub backends: Vec<String>,
    pub base_url: String,
    /// Inline API key. Prefer `api_key_env` outside of local testing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Environment variable holding the API key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    /// Pause between a retryable failure and the next backend.
    pub retry_delay_ms: u64,
    /// Deadline for a single backend attempt.
    pub request_timeout_seconds: u64,
    /// Shortest accepted prompt, counted after trimming.
    pub min_prompt_chars: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            backends: vec![
                "gemini-2.0-flash".to_string(),
                "gemini-1.5-flash".to_string(),
                "gemini-1.5-flash-8b".to_string(),
            ],
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key: None,
            api_key_env: Some("GEMINI_API_KEY".to_string()),
            retry_delay_ms: 1000,
            request_timeout_seconds: 30,
            min_prompt_chars: 5,
        }
    }
}

impl GenerationConfig {
    /// Resolve the credential: inline key first, then the named env var.
    ///
    /// Absence is a valid state and yields `None`.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.trim().is_empty()) {
            return Some(key.clone());
        }
        self.api_key_env
            .as_ref()
            .and_then(|var| std::env::var(var).ok())
            .filter(|k| !k.trim().is_empty())
    }

    pub fn backend_ids(&self) -> Vec<BackendId> {
        self.backends.iter().map(|b| BackendId::new(b.trim())).collect()
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_config_defaults() {
        let config = GenerationConfig::default();
        assert_eq!(config.backends.len(), 3);
        assert_eq!(config.backends[0], "gemini-2.0-flash");
        assert_eq!(config.retry_delay(), Duration::from_millis(1000));
        assert_eq!(config.min_prompt_chars, 5);
    }

    #[test]
    fn test_resolve_inline_key_wins() {
        let config = GenerationConfig {
            api_key: Some("inline".to_string()),
            api_key_env: Some("HERALD_TEST_KEY_INLINE_WINS".to_string()),
            ..Default::default()
        };
        std::env::set_var("HERALD_TEST_KEY_INLINE_WINS", "from-env");
        assert_eq!(config.resolve_api_key().as_deref(), Some("inline"));
        std::env::remove_var("HERALD_TEST_KEY_INLINE_WINS");
    }

    #[test]
    fn test_resolve_key_from_env() {
        let config = GenerationConfig {
            api_key: None,
            api_key_env: Some("HERALD_TEST_KEY_FROM_ENV".to_string()),
            ..Default::default()
        };
        std::env::set_var("HERALD_TEST_KEY_FROM_ENV", "from-env");
        assert_eq!(config.resolve_api_key().as_deref(), Some("from-env"));
        std::env::remove_var("HERALD_TEST_KEY_FROM_ENV");
    }

    #[test]
    fn test_resolve_missing_key_is_none() {
        let config = GenerationConfig {
            api_key: Some("  ".to_string()),
            api_key_env: Some("HERALD_TEST_KEY_NEVER_SET".to_string()),
            ..Default::default()
        };
        assert!(config.resolve_api_key().is_none());
    }

    #[test]
    fn test_backend_ids_preserve_order() {
        let config = GenerationConfig {
            backends: vec!["b".to_string(), " a ".to_string()],
            ..Default::default()
        };
        let ids = config.backend_ids();
        assert_eq!(ids[0].as_str(), "b");
        assert_eq!(ids[1].as_str(), "a");
    }
}
