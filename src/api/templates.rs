//! Template catalog listing.

use crate::api::AppState;
use crate::cli::output::TemplateView;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct TemplatesResponse {
    pub object: String,
    pub data: Vec<TemplateView>,
}

/// GET /v1/templates - List the catalog in match order.
pub async fn handle(State(state): State<Arc<AppState>>) -> Json<TemplatesResponse> {
    let data = state
        .composer
        .catalog()
        .templates()
        .iter()
        .map(TemplateView::from)
        .collect();

    Json(TemplatesResponse {
        object: "list".to_string(),
        data,
    })
}
