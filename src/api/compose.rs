//! Compose endpoint handler.

use crate::api::{ApiError, AppState};
use crate::cascade::{GenerationRequest, RenderedMessage};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, warn, Instrument};

/// POST /v1/compose - Generate a subject/body, falling back to a template.
pub async fn handle(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<RenderedMessage>, ApiError> {
    let Json(request) = payload?;

    let request_id = crate::logging::generate_request_id();
    let span = tracing::info_span!("compose", request_id = %request_id);

    let composed = tokio::time::timeout(
        state.request_timeout(),
        state.composer.compose(&request).instrument(span),
    )
    .await;

    match composed {
        Ok(Ok(message)) => {
            info!(
                request_id = %request_id,
                source = message.source.as_str(),
                backend = message.backend_used.as_deref(),
                template = message.template_name.as_deref(),
                "compose completed"
            );
            Ok(Json(message))
        }
        Ok(Err(e)) => {
            info!(request_id = %request_id, error = %e, "compose rejected");
            Err(e.into())
        }
        Err(_) => {
            warn!(
                request_id = %request_id,
                timeout_secs = state.config.server.request_timeout_seconds,
                "compose timed out"
            );
            Err(ApiError::gateway_timeout())
        }
    }
}
