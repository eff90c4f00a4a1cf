//! Generation backend abstraction.
//!
//! This module provides the `GenerationBackend` trait and the types that
//! describe a single generation attempt: the prompt value object sent to a
//! backend and the normalized [`AttemptOutcome`] it produces.

use async_trait::async_trait;

pub mod error;
pub mod extract;
pub mod gemini;
pub mod types;

// Re-export key types for convenience
pub use error::BackendError;
pub use gemini::GeminiBackend;
pub use types::{AttemptOutcome, BackendId, GeneratedContent, GenerationPrompt, SYSTEM_INSTRUCTION};

/// Adapter that performs one generation attempt against a named backend.
///
/// Implementations are stateless with respect to requests: the same adapter
/// is shared by every concurrent cascade run as `Arc<dyn GenerationBackend>`.
///
/// # Failure handling
///
/// `generate` never returns an error. Transport failures, non-2xx statuses,
/// blocked content and unparseable output are all folded into
/// [`AttemptOutcome::RetryableFailure`] or [`AttemptOutcome::FatalFailure`].
#[async_trait]
pub trait GenerationBackend: Send + Sync + 'static {
    /// Short adapter name for logs (e.g. "gemini").
    fn name(&self) -> &str;

    /// Whether a credential is available at all.
    ///
    /// When this is false the cascade skips straight to the template
    /// fallback without recording an attempt.
    fn is_configured(&self) -> bool {
        true
    }

    /// Run one attempt against `backend`.
    async fn generate(&self, backend: &BackendId, prompt: &GenerationPrompt) -> AttemptOutcome;
}
