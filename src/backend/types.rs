//! Supporting types for generation attempts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed system instruction sent with every generation attempt.
pub const SYSTEM_INSTRUCTION: &str = "You write short, friendly product emails for a developer \
tool that helps people keep their GitHub contribution streaks alive. Keep the tone warm and \
direct, avoid hype, and never invent discounts, prices or dates. The subject must be under 70 \
characters. The body must be plain text with short paragraphs and no Markdown. Use the \
placeholders {user} for the recipient name, {appName} for the product name and {ctaLink} for \
the call-to-action link exactly as written. Respond with only a JSON object of the form \
{\"subject\": \"...\", \"body\": \"...\"}.";

/// Opaque name of one generation backend.
///
/// The position of an identifier in the configured list is its priority.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BackendId(String);

impl BackendId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BackendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BackendId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BackendId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// System instruction paired with the caller's prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPrompt {
    pub system_instruction: String,
    pub user_prompt: String,
}

impl GenerationPrompt {
    /// Pair `user_prompt` with the standard [`SYSTEM_INSTRUCTION`].
    pub fn new(user_prompt: impl Into<String>) -> Self {
        Self::with_instruction(SYSTEM_INSTRUCTION, user_prompt)
    }

    pub fn with_instruction(
        system_instruction: impl Into<String>,
        user_prompt: impl Into<String>,
    ) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            user_prompt: user_prompt.into(),
        }
    }
}

/// Subject and body produced by a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub subject: String,
    pub body: String,
}

/// Result of a single backend attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Both fields present and non-empty.
    Success(GeneratedContent),

    /// Failure isolated to this backend; the next one may succeed.
    RetryableFailure {
        reason: String,
        status_code: Option<u16>,
    },

    /// Failure that will recur on every backend sharing the credential.
    FatalFailure {
        reason: String,
        status_code: Option<u16>,
    },
}

impl AttemptOutcome {
    pub fn retryable(reason: impl Into<String>, status_code: Option<u16>) -> Self {
        Self::RetryableFailure {
            reason: reason.into(),
            status_code,
        }
    }

    pub fn fatal(reason: impl Into<String>, status_code: Option<u16>) -> Self {
        Self::FatalFailure {
            reason: reason.into(),
            status_code,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AttemptOutcome::Success(_))
    }

    /// Short label used for log fields and metric labels.
    pub fn label(&self) -> &'static str {
        match self {
            AttemptOutcome::Success(_) => "success",
            AttemptOutcome::RetryableFailure { .. } => "retryable",
            AttemptOutcome::FatalFailure { .. } => "fatal",
        }
    }
}
