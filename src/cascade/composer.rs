//! Top-level compose entry point.
//!
//! Runs the cascade and, when it yields nothing, renders the best-matching
//! template instead. Either way the caller gets a usable subject and body
//! unless the prompt itself was rejected.

use super::{Cascade, CascadeResult};
use crate::backend::{GeminiBackend, GenerationBackend, GenerationPrompt};
use crate::config::HeraldConfig;
use crate::template::{match_template, substitute, MessageVariables, TemplateCatalog, VariableDefaults};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// A compose request as received from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    #[serde(default)]
    pub variables: MessageVariables,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            variables: MessageVariables::default(),
        }
    }

    pub fn with_variables(mut self, variables: MessageVariables) -> Self {
        self.variables = variables;
        self
    }
}

/// Where a rendered message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSource {
    Generated,
    Template,
}

impl MessageSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageSource::Generated => "generated",
            MessageSource::Template => "template",
        }
    }
}

/// Final subject/body handed back to the caller.
///
/// Exactly one of `backend_used` and `template_name` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedMessage {
    pub subject: String,
    pub body: String,
    pub source: MessageSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_used: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Errors surfaced to the caller. Backend failures never appear here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComposeError {
    #[error("Prompt must be at least {min} characters (got {actual})")]
    InvalidPrompt { min: usize, actual: usize },
}

/// Cascade plus template fallback.
pub struct Composer {
    cascade: Cascade,
    catalog: Arc<TemplateCatalog>,
    defaults: VariableDefaults,
    min_prompt_chars: usize,
    log_prompts: bool,
}

impl Composer {
    pub fn new(
        cascade: Cascade,
        catalog: Arc<TemplateCatalog>,
        defaults: VariableDefaults,
        min_prompt_chars: usize,
    ) -> Self {
        Self {
            cascade,
            catalog,
            defaults,
            min_prompt_chars: min_prompt_chars.max(1),
            log_prompts: false,
        }
    }

    /// Include truncated prompt previews in logs.
    pub fn with_prompt_logging(mut self, enabled: bool) -> Self {
        self.log_prompts = enabled;
        self
    }

    /// Wire a Gemini-backed composer from configuration.
    pub fn from_config(config: &HeraldConfig, client: Arc<reqwest::Client>) -> Self {
        let backend: Arc<dyn GenerationBackend> =
            Arc::new(GeminiBackend::from_config(&config.generation, client));
        let cascade = Cascade::new(
            backend,
            config.generation.backend_ids(),
            config.generation.retry_delay(),
        );

        Self::new(
            cascade,
            Arc::new(TemplateCatalog::builtin()),
            VariableDefaults::from(&config.message),
            config.generation.min_prompt_chars,
        )
        .with_prompt_logging(config.logging.log_prompts)
    }

    pub fn cascade(&self) -> &Cascade {
        &self.cascade
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// Reject prompts that are blank or too short.
    pub fn validate(&self, prompt: &str) -> Result<(), ComposeError> {
        let actual = prompt.trim().chars().count();
        if actual < self.min_prompt_chars {
            return Err(ComposeError::InvalidPrompt {
                min: self.min_prompt_chars,
                actual,
            });
        }
        Ok(())
    }

    /// Produce a subject/body for `request`.
    pub async fn compose(&self, request: &GenerationRequest) -> Result<RenderedMessage, ComposeError> {
        self.validate(&request.prompt)?;

        let preview = crate::logging::prompt_preview(&request.prompt, self.log_prompts);
        info!(
            prompt_preview = preview.as_deref(),
            backends = self.cascade.order().len(),
            "compose request"
        );

        let prompt = GenerationPrompt::new(request.prompt.trim());
        let result = self.cascade.run(&prompt).await;
        let message = self.render(request, result);

        metrics::counter!("herald_compose_total", "source" => message.source.as_str()).increment(1);
        Ok(message)
    }

    fn render(&self, request: &GenerationRequest, result: CascadeResult) -> RenderedMessage {
        let vars = &request.variables;

        if let (Some(content), Some(backend)) = (result.content, result.source_backend) {
            return RenderedMessage {
                subject: substitute(&content.subject, vars, &self.defaults),
                body: substitute(&content.body, vars, &self.defaults),
                source: MessageSource::Generated,
                backend_used: Some(backend.to_string()),
                template_name: None,
                warning: None,
            };
        }

        let template = match_template(&self.catalog, &request.prompt);
        let (subject, body) = template.render(vars, &self.defaults);
        let warning = summarize_errors(&result.attempt_errors);

        match &warning {
            Some(w) => warn!(template = %template.name, warning = %w, "falling back to template"),
            None => info!(
                template = %template.name,
                reason = result.skipped.as_deref().unwrap_or_default(),
                "using template"
            ),
        }

        RenderedMessage {
            subject,
            body,
            source: MessageSource::Template,
            backend_used: None,
            template_name: Some(template.name.clone()),
            warning,
        }
    }
}

/// Human-readable summary of failed attempts; `None` when nothing was tried.
pub fn summarize_errors(attempt_errors: &[String]) -> Option<String> {
    let last = attempt_errors.last()?;
    Some(format!(
        "AI generation failed after {} attempt(s); used a template instead. Last error: {}",
        attempt_errors.len(),
        last
    ))
}
