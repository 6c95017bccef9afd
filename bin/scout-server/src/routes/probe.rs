//! Model connectivity check.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use scout_core::PipelineError;
use serde_json::Value;
use tracing::{info, warn};
use utoipa::OpenApi;

use crate::schemas::system::ProbeResponse;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(test_ai), components(schemas(ProbeResponse)))]
pub struct ProbeApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/test-ai", get(test_ai))
}

/// Send a one-line prompt to the configured provider.
///
/// Unlike other routes, failure is reported in the same body shape as
/// success, with `status: "error"`.
#[utoipa::path(
    get,
    path = "/api/test-ai",
    tag = "health",
    responses(
        (status = 200, description = "Provider answered", body = ProbeResponse),
        (status = 500, description = "Provider call failed", body = ProbeResponse),
    )
)]
pub async fn test_ai(State(state): State<Arc<AppState>>) -> Response {
    let provider = state.pipeline.provider().to_owned();
    info!(%provider, "testing model connection");

    match state.pipeline.probe().await {
        Ok(message) => Json(ProbeResponse {
            status: "success".to_owned(),
            message,
            provider,
            model: Some(state.pipeline.model_name().to_owned()),
            details: None,
        })
        .into_response(),
        Err(e) => {
            warn!(%provider, error = %e, "model connection test failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ProbeResponse {
                    status: "error".to_owned(),
                    message: e.to_string(),
                    provider,
                    model: None,
                    details: Some(failure_details(&e)),
                }),
            )
                .into_response()
        }
    }
}

fn failure_details(e: &PipelineError) -> Value {
    let body = match e {
        PipelineError::Upstream(m) => m.provider_body(),
        PipelineError::Template(_) => None,
    };
    match body {
        Some(raw) => serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned())),
        None => Value::String("No additional details".to_owned()),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
