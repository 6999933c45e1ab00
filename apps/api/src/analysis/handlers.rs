//! Axum route handlers for the Analysis API.

use axum::{
    async_trait,
    extract::{FromRequest, Request, State},
    http::{header, StatusCode},
    Form, Json,
};
use serde::Deserialize;
use tracing::info;

use crate::analysis::models::AnalysisResult;
use crate::analysis::orchestrator::{analyze, AnalysisError};
use crate::errors::AppError;
use crate::state::AppState;

const MISSING_TEXT_MESSAGE: &str = "Please provide some content to analyze";

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Missing is handled like blank.
    #[serde(default)]
    pub text: Option<String>,
}

/// `AnalyzeRequest` read from either a JSON or a URL-encoded form body.
/// Body rejections become `AppError`s, so callers always get `{error, message}`.
pub struct AnalyzeBody(pub AnalyzeRequest);

#[async_trait]
impl<S> FromRequest<S> for AnalyzeBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(request) = Form::<AnalyzeRequest>::from_request(req, state)
                .await
                .map_err(|r| rejection_error(r.status(), r.body_text()))?;
            return Ok(AnalyzeBody(request));
        }

        let Json(request) = Json::<AnalyzeRequest>::from_request(req, state)
            .await
            .map_err(|r| rejection_error(r.status(), r.body_text()))?;
        Ok(AnalyzeBody(request))
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

/// Oversized bodies keep their 413; every other rejection is a 400.
fn rejection_error(status: StatusCode, detail: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(detail)
    } else {
        AppError::Validation(detail)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/analyze
///
/// Returns ranked keywords plus readability and density metrics for the submitted text.
/// Accepts `application/json` or `application/x-www-form-urlencoded` bodies.
/// Extraction-service failures never surface here; the engine falls back locally.
pub async fn handle_analyze(
    State(state): State<AppState>,
    AnalyzeBody(request): AnalyzeBody,
) -> Result<Json<AnalysisResult>, AppError> {
    let text = request.text.unwrap_or_default();
    if text.trim().is_empty() {
        return Err(AppError::Validation(MISSING_TEXT_MESSAGE.to_string()));
    }

    info!("Analyzing text ({} characters)", text.chars().count());

    match analyze(&text, state.extractor.as_ref()).await {
        Ok(analysis) => {
            info!(
                source = analysis.source.as_str(),
                "Analysis complete. Found {} keywords.",
                analysis.result.keywords.len()
            );
            Ok(Json(analysis.result))
        }
        Err(AnalysisError::InvalidInput) => {
            Err(AppError::Validation(MISSING_TEXT_MESSAGE.to_string()))
        }
        Err(AnalysisError::Unexpected(e)) => {
            Err(AppError::internal(e, !state.config.production))
        }
    }
}
