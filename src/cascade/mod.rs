//! # Backend cascade
//!
//! Drives an ordered list of backend identifiers through a
//! [`GenerationBackend`], one attempt at a time.
//!
//! ## Policy
//!
//! - The first `Success` wins and no later backend is invoked.
//! - A `RetryableFailure` is recorded and, unless it came from the last
//!   backend, followed by a fixed pause before the next attempt.
//! - A `FatalFailure` is recorded and ends the cascade immediately: the
//!   credential is shared, so every remaining backend would fail the same way.
//!
//! Attempts are strictly sequential. Early success and fatal aborts both
//! depend on seeing each outcome before deciding whether to continue.

pub mod composer;

pub use composer::{ComposeError, Composer, GenerationRequest, MessageSource, RenderedMessage};

use crate::backend::{AttemptOutcome, BackendId, GeneratedContent, GenerationBackend, GenerationPrompt};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Reason recorded when the cascade is skipped entirely.
pub const NOT_CONFIGURED: &str = "not configured";

/// Outcome of one cascade run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeResult {
    /// Generated content, or `None` when every backend failed or was skipped.
    pub content: Option<GeneratedContent>,
    /// Backend that produced `content`.
    pub source_backend: Option<BackendId>,
    /// One formatted entry per backend actually attempted.
    pub attempt_errors: Vec<String>,
    /// Set when no attempt was made at all.
    pub skipped: Option<String>,
}

impl CascadeResult {
    fn not_configured() -> Self {
        Self {
            content: None,
            source_backend: None,
            attempt_errors: Vec::new(),
            skipped: Some(NOT_CONFIGURED.to_string()),
        }
    }

    fn exhausted(attempt_errors: Vec<String>) -> Self {
        Self {
            content: None,
            source_backend: None,
            attempt_errors,
            skipped: None,
        }
    }

    /// Number of backends that were invoked.
    pub fn attempts(&self) -> usize {
        self.attempt_errors.len() + usize::from(self.content.is_some())
    }
}

/// Ordered backend cascade.
pub struct Cascade {
    backend: Arc<dyn GenerationBackend>,
    order: Vec<BackendId>,
    retry_delay: Duration,
}

impl Cascade {
    pub fn new(backend: Arc<dyn GenerationBackend>, order: Vec<BackendId>, retry_delay: Duration) -> Self {
        Self {
            backend,
            order,
            retry_delay,
        }
    }

    /// Backend identifiers in the order they are tried.
    pub fn order(&self) -> &[BackendId] {
        &self.order
    }

    /// False when there is nothing to try: no backends or no credential.
    pub fn is_configured(&self) -> bool {
        !self.order.is_empty() && self.backend.is_configured()
    }

    /// Run the cascade for one prompt.
    pub async fn run(&self, prompt: &GenerationPrompt) -> CascadeResult {
        if !self.is_configured() {
            debug!(
                adapter = self.backend.name(),
                backends = self.order.len(),
                "generation not configured, skipping cascade"
            );
            return CascadeResult::not_configured();
        }

        let mut attempt_errors = Vec::new();
        let last = self.order.len() - 1;

        for (attempt, backend) in self.order.iter().enumerate() {
            let start = Instant::now();
            let outcome = self.backend.generate(backend, prompt).await;
            let elapsed = start.elapsed();

            metrics::counter!("herald_backend_attempts_total",
                "backend" => backend.to_string(),
                "outcome" => outcome.label()
            )
            .increment(1);
            metrics::histogram!("herald_backend_latency_seconds",
                "backend" => backend.to_string()
            )
            .record(elapsed.as_secs_f64());

            match outcome {
                AttemptOutcome::Success(content) => {
                    info!(
                        backend = %backend,
                        attempt,
                        latency_ms = elapsed.as_millis() as u64,
                        "cascade succeeded"
                    );
                    return CascadeResult {
                        content: Some(content),
                        source_backend: Some(backend.clone()),
                        attempt_errors,
                        skipped: None,
                    };
                }
                AttemptOutcome::RetryableFailure {
                    reason,
                    status_code,
                } => {
                    warn!(
                        backend = %backend,
                        attempt,
                        status = ?status_code,
                        reason = %reason,
                        "backend attempt failed, trying next"
                    );
                    attempt_errors.push(format_attempt_error(backend, &reason, status_code));
                    if attempt < last && !self.retry_delay.is_zero() {
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
                AttemptOutcome::FatalFailure {
                    reason,
                    status_code,
                } => {
                    warn!(
                        backend = %backend,
                        attempt,
                        status = ?status_code,
                        reason = %reason,
                        skipped = last - attempt,
                        "fatal backend failure, aborting cascade"
                    );
                    attempt_errors.push(format_attempt_error(backend, &reason, status_code));
                    metrics::counter!("herald_cascade_aborts_total").increment(1);
                    break;
                }
            }
        }

        CascadeResult::exhausted(attempt_errors)
    }
}

/// `"<backend>: <reason>"`, with ` (HTTP <code>)` when a status is known.
pub fn format_attempt_error(backend: &BackendId, reason: &str, status_code: Option<u16>) -> String {
    match status_code {
        Some(code) => format!("{}: {} (HTTP {})", backend, reason, code),
        None => format!("{}: {}", backend, reason),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::backend::{AttemptOutcome, BackendId, GeneratedContent, GenerationBackend, GenerationPrompt};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Backend double returning a fixed outcome per identifier and recording calls.
    pub struct ScriptedBackend {
        outcomes: HashMap<String, AttemptOutcome>,
        configured: bool,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedBackend {
        pub fn new(outcomes: &[(&str, AttemptOutcome)]) -> Self {
            Self {
                outcomes: outcomes
                    .iter()
                    .map(|(id, o)| (id.to_string(), o.clone()))
                    .collect(),
                configured: true,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn unconfigured() -> Self {
            Self {
                configured: false,
                ..Self::new(&[])
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerationBackend for ScriptedBackend {
        fn name(&self) -> &str {
            "scripted"
        }

        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn generate(&self, backend: &BackendId, _prompt: &GenerationPrompt) -> AttemptOutcome {
            self.calls.lock().unwrap().push(backend.to_string());
            self.outcomes
                .get(backend.as_str())
                .cloned()
                .unwrap_or_else(|| AttemptOutcome::retryable("unscripted", None))
        }
    }

    pub fn success(subject: &str, body: &str) -> AttemptOutcome {
        AttemptOutcome::Success(GeneratedContent {
            subject: subject.to_string(),
            body: body.to_string(),
        })
    }

    pub fn ids(names: &[&str]) -> Vec<BackendId> {
        names.iter().map(|n| BackendId::new(*n)).collect()
    }
}
