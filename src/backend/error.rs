//! Error types for backend operations.

use super::AttemptOutcome;
use thiserror::Error;

/// Reason recorded when a response lacks a usable subject and body.
pub const MALFORMED_RESPONSE: &str = "malformed response";

/// Errors that can occur during a generation attempt.
///
/// These never leave the adapter; [`BackendError::classify`] turns each one
/// into an [`AttemptOutcome`] for the cascade.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Network connectivity error (DNS, connection refused, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded deadline.
    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    /// Backend returned a non-2xx response.
    #[error("Backend error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Backend safety layer refused to produce content.
    #[error("Content blocked: {0}")]
    Blocked(String),

    /// Response lacked the expected subject/body structure.
    #[error("malformed response")]
    Malformed,

    /// Adapter configuration error (e.g. missing credential).
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl BackendError {
    /// Map the error onto the cascade's retry/abort policy.
    ///
    /// - 401/403 abort the cascade: the credential is shared by every backend.
    /// - 429/503, blocked content, malformed output, transport errors and any
    ///   other upstream status move on to the next backend.
    pub fn classify(self) -> AttemptOutcome {
        match self {
            BackendError::Upstream { status, message } => match status {
                401 | 403 => AttemptOutcome::fatal(
                    format!("authentication failed: {}", summarize_body(&message)),
                    Some(status),
                ),
                429 => AttemptOutcome::retryable("rate limited", Some(status)),
                503 => AttemptOutcome::retryable("service unavailable", Some(status)),
                _ => AttemptOutcome::retryable(summarize_body(&message), Some(status)),
            },
            BackendError::Configuration(msg) => AttemptOutcome::fatal(msg, None),
            BackendError::Malformed => AttemptOutcome::retryable(MALFORMED_RESPONSE, None),
            other => AttemptOutcome::retryable(other.to_string(), None),
        }
    }
}

/// Pull `error.message` out of a JSON error body, else trim the raw text.
fn summarize_body(body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string));

    let text = from_json.unwrap_or_else(|| body.trim().to_string());
    if text.is_empty() {
        return "empty error body".to_string();
    }

    const MAX: usize = 200;
    if text.chars().count() > MAX {
        format!("{}...", text.chars().take(MAX).collect::<String>())
    } else {
        text
    }
}
