use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

const BODY_TOO_LARGE: &str = "Request body too large";
const GENERIC_INTERNAL_MESSAGE: &str = "An unexpected error occurred";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// `expose_detail` is false in production; the detail is then only logged.
    #[error("Internal server error: {source}")]
    Internal {
        source: anyhow::Error,
        expose_detail: bool,
    },
}

impl AppError {
    pub fn internal(source: impl Into<anyhow::Error>, expose_detail: bool) -> Self {
        AppError::Internal {
            source: source.into(),
            expose_detail,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "Text is required for analysis",
                msg.clone(),
            ),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, BODY_TOO_LARGE, msg.clone())
            }
            AppError::Internal {
                source,
                expose_detail,
            } => {
                tracing::error!("Internal error: {source:?}");
                let message = if *expose_detail {
                    source.to_string()
                } else {
                    GENERIC_INTERNAL_MESSAGE.to_string()
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to analyze text",
                    message,
                )
            }
        };

        let body = Json(json!({
            "error": error,
            "message": message
        }));

        (status, body).into_response()
    }
}
