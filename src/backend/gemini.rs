//! Google Gemini backend implementation.

use super::extract::extract_content;
use super::{
    AttemptOutcome, BackendError, BackendId, GeneratedContent, GenerationBackend, GenerationPrompt,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Finish reasons that mean the safety layer withheld the content.
const BLOCKED_FINISH_REASONS: &[&str] = &[
    "SAFETY",
    "BLOCKLIST",
    "PROHIBITED_CONTENT",
    "SPII",
    "RECITATION",
    "IMAGE_SAFETY",
];

/// Gemini adapter.
///
/// Every configured backend identifier is a Gemini model name, and all of
/// them share one API key:
/// - Generation via POST /v1beta/models/{model}:generateContent
/// - System instruction sent in the `systemInstruction` field
/// - JSON output requested via `responseMimeType`
pub struct GeminiBackend {
    /// Base URL (e.g., "https://generativelanguage.googleapis.com")
    base_url: String,
    /// API key sent in the x-goog-api-key header
    api_key: Option<String>,
    /// Per-attempt deadline
    timeout: Duration,
    /// Shared HTTP client for connection pooling
    client: Arc<Client>,
}

impl GeminiBackend {
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        timeout: Duration,
        client: Arc<Client>,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            timeout,
            client,
        }
    }

    /// Build the adapter from the `[generation]` config section.
    pub fn from_config(config: &crate::config::GenerationConfig, client: Arc<Client>) -> Self {
        Self::new(
            config.base_url.clone(),
            config.resolve_api_key(),
            Duration::from_secs(config.request_timeout_seconds),
            client,
        )
    }

    fn build_request(prompt: &GenerationPrompt) -> GeminiRequest {
        GeminiRequest {
            system_instruction: GeminiSystemInstruction {
                parts: vec![GeminiPart {
                    text: prompt.system_instruction.clone(),
                }],
            },
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: prompt.user_prompt.clone(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: 0.7,
                response_mime_type: "application/json".to_string(),
            },
        }
    }

    /// Turn a 2xx response body into content, or the reason it has none.
    fn interpret_response(response: GeminiResponse) -> Result<GeneratedContent, BackendError> {
        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return Err(BackendError::Blocked(format!("prompt blocked ({})", reason)));
        }

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or(BackendError::Malformed)?;

        if let Some(reason) = candidate.finish_reason.as_deref() {
            if BLOCKED_FINISH_REASONS.contains(&reason) {
                return Err(BackendError::Blocked(format!(
                    "response blocked ({})",
                    reason
                )));
            }
        }

        let text = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        extract_content(&text)
    }

    async fn try_generate(
        &self,
        backend: &BackendId,
        prompt: &GenerationPrompt,
    ) -> Result<GeneratedContent, BackendError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| BackendError::Configuration("no Gemini API key configured".to_string()))?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url,
            backend.as_str()
        );

        let timeout_ms = self.timeout.as_millis() as u64;
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .header("content-type", "application/json")
            .json(&Self::build_request(prompt))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BackendError::Timeout(timeout_ms)
                } else {
                    BackendError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(BackendError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                BackendError::Timeout(timeout_ms)
            } else {
                BackendError::Network(e.to_string())
            }
        })?;

        let parsed: GeminiResponse =
            serde_json::from_str(&body).map_err(|_| BackendError::Malformed)?;

        Self::interpret_response(parsed)
    }
}

/// Gemini generateContent request format
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    system_instruction: GeminiSystemInstruction,
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiSystemInstruction {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    response_mime_type: String,
}

/// Gemini generateContent response format
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    fn name(&self) -> &str {
        "gemini"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, backend: &BackendId, prompt: &GenerationPrompt) -> AttemptOutcome {
        tracing::debug!(
            adapter = "gemini",
            backend = %backend,
            "initiating generation"
        );

        let start = Instant::now();
        let result = self.try_generate(backend, prompt).await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(content) => {
                tracing::info!(
                    adapter = "gemini",
                    backend = %backend,
                    latency_ms,
                    "generation succeeded"
                );
                AttemptOutcome::Success(content)
            }
            Err(e) => {
                tracing::info!(
                    adapter = "gemini",
                    backend = %backend,
                    latency_ms,
                    error = %e,
                    "generation failed"
                );
                e.classify()
            }
        }
    }
}
