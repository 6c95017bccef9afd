//! Request extractors.

use axum::extract::FromRequest;

use crate::error::ServerError;

/// [`axum::Json`] whose rejections are answered with the usual
/// `{"error": "..."}` body instead of plain text.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ServerError))]
pub struct ApiJson<T>(pub T);

// ── Tests ──────────────────────────────────────────────────────────────────────
