//! Per-request trace span.
//!
//! Reuses a valid inbound `x-trace-id` or mints a v4 UUID, runs the request
//! inside an `http_request` span carrying it, echoes the id on the response
//! and logs status and latency. Small JSON request bodies are logged at debug
//! level; model output is not, since plans run to several kilobytes.
//!
//! Bodies are buffered up to [`MAX_REQUEST_BODY`]. Larger ones are answered
//! with 413 before reaching a handler.

use std::time::Instant;

use axum::body::{Body, Bytes};
use axum::extract::Request;
use axum::Json;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use serde_json::json;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

pub static X_TRACE_ID: &str = "x-trace-id";

const MAX_LOGGED_BODY: usize = 1024;

/// Same ceiling as axum's default body limit.
pub const MAX_REQUEST_BODY: usize = 2 * 1024 * 1024;

pub async fn trace_middleware(req: Request<Body>, next: Next) -> Response {
    let start_time = Instant::now();

    let trace_id = req
        .headers()
        .get(X_TRACE_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);

    let span = info_span!(
        "http_request",
        trace_id = %trace_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    async move {
        info!("→ request started");
        let (mut parts, body) = req.into_parts();
        let header_value = HeaderValue::from_str(&trace_id.to_string()).ok();

        let mut response = match buffer_and_log(&parts.headers, body).await {
            Ok(req_bytes) => {
                if let Some(v) = &header_value {
                    parts.headers.insert(X_TRACE_ID, v.clone());
                }
                next.run(Request::from_parts(parts, Body::from(req_bytes))).await
            }
            Err(rejected) => rejected,
        };
        if let Some(v) = header_value {
            response.headers_mut().insert(X_TRACE_ID, v);
        }

        info!(
            status = response.status().as_u16(),
            latency_ms = start_time.elapsed().as_millis(),
            "← response finished"
        );
        response
    }
    .instrument(span)
    .await
}

async fn buffer_and_log(headers: &HeaderMap, body: Body) -> Result<Bytes, Response> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let bytes = match Limited::new(body, MAX_REQUEST_BODY).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.is::<LengthLimitError>() => {
            warn!(limit = MAX_REQUEST_BODY, "request body too large");
            return Err(error_response(
                StatusCode::PAYLOAD_TOO_LARGE,
                "Request body too large",
            ));
        }
        Err(e) => {
            warn!(error = %e, "failed to read request body");
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "Failed to read request body",
            ));
        }
    };

    if content_type.contains("application/json") && bytes.len() < MAX_LOGGED_BODY {
        if let Ok(text) = std::str::from_utf8(&bytes) {
            debug!(body = text, "request body");
        }
    } else if !bytes.is_empty() {
        debug!(content_type, size = bytes.len(), "request body skipped");
    }

    Ok(bytes)
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

// ── Tests ──────────────────────────────────────────────────────────────────────
