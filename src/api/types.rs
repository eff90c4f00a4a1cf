//! API error envelope.

use crate::cascade::ComposeError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error response body.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: ApiErrorBody,
}

/// Error details.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorBody {
    pub message: String,
    pub r#type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ApiError {
    /// Create an error for a request body the JSON extractor refused,
    /// keeping the extractor's status (413, 415, 422 or 400).
    pub fn rejected(status: StatusCode, message: &str) -> Self {
        let code = match status {
            StatusCode::PAYLOAD_TOO_LARGE => "payload_too_large",
            StatusCode::UNSUPPORTED_MEDIA_TYPE => "unsupported_media_type",
            StatusCode::UNPROCESSABLE_ENTITY => "unprocessable_entity",
            _ => "invalid_request_error",
        };
        Self {
            error: ApiErrorBody {
                message: message.to_string(),
                r#type: "invalid_request_error".to_string(),
                param: None,
                code: Some(code.to_string()),
            },
        }
    }

    /// Create an invalid prompt error (400).
    pub fn invalid_prompt(message: &str) -> Self {
        Self {
            error: ApiErrorBody {
                message: message.to_string(),
                r#type: "invalid_request_error".to_string(),
                param: Some("prompt".to_string()),
                code: Some("invalid_prompt".to_string()),
            },
        }
    }

    /// Create a gateway timeout error (504).
    pub fn gateway_timeout() -> Self {
        Self {
            error: ApiErrorBody {
                message: "Compose request timed out".to_string(),
                r#type: "server_error".to_string(),
                param: None,
                code: Some("gateway_timeout".to_string()),
            },
        }
    }

    /// Get the HTTP status code for this error.
    fn status_code(&self) -> StatusCode {
        match self.error.code.as_deref() {
            Some("invalid_request_error") | Some("invalid_prompt") => StatusCode::BAD_REQUEST,
            Some("payload_too_large") => StatusCode::PAYLOAD_TOO_LARGE,
            Some("unsupported_media_type") => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Some("unprocessable_entity") => StatusCode::UNPROCESSABLE_ENTITY,
            Some("gateway_timeout") => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ComposeError> for ApiError {
    fn from(err: ComposeError) -> Self {
        match err {
            ComposeError::InvalidPrompt { .. } => ApiError::invalid_prompt(&err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::rejected(rejection.status(), &rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
