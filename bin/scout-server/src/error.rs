//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors are converted to a JSON body of
//! the form `{"error": "..."}` with an appropriate status code.
//!
//! Upstream model failures are relayed with the provider's message so that
//! quota and credential problems are visible to the caller. Template errors
//! are logged in full and answered with a generic message.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use scout_core::PipelineError;
use serde_json::json;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// All errors that can occur in the scout-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The caller sent an invalid or incomplete request.
    #[error("{0}")]
    BadRequest(String),

    /// The body was missing, not JSON, or the wrong shape.
    #[error(transparent)]
    Json(#[from] JsonRejection),

    /// Propagated from the generation pipeline.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, client_message) = match &self {
            ServerError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            ServerError::Json(rejection) => (rejection.status(), rejection.body_text()),
            ServerError::Pipeline(PipelineError::Upstream(e)) => {
                error!(error = %e, "generation request failed upstream");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            ServerError::Pipeline(e @ PipelineError::Template(_)) => {
                error!(error = %e, "prompt rendering failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
        };
        (status, Json(json!({ "error": client_message }))).into_response()
    }
}

impl From<ValidationErrors> for ServerError {
    fn from(errors: ValidationErrors) -> Self {
        // Request schemas give every rule a client-facing message; fall back to
        // the validator's own rendering for any that do not.
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| errors.to_string());
        ServerError::BadRequest(message)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
