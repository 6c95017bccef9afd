use std::error::Error as StdError;

use thiserror::Error;

/// Failures from the model provider. Messages are carried through unchanged
/// so callers can show them to the end user.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Network failure or an undecodable body. The message includes the
    /// underlying causes (DNS, TLS, timeout).
    #[error("HTTP request failed: {}", with_sources(.0))]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status. `message` is the
    /// provider's `error.message` when present; `body` is the raw response.
    #[error("API returned {status}: {message}")]
    Api {
        status: u16,
        message: String,
        body: String,
    },

    /// A success response that carried no completion text.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ModelError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ModelError::Api { status, .. } => Some(*status),
            ModelError::Http(e) => e.status().map(|s| s.as_u16()),
            ModelError::InvalidResponse(_) => None,
        }
    }

    /// The provider's raw error response, if it sent one.
    pub fn provider_body(&self) -> Option<&str> {
        match self {
            ModelError::Api { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// `err` followed by each of its sources, joined with `": "`.
fn with_sources(err: &dyn StdError) -> String {
    let mut text = err.to_string();
    let mut cause = err.source();
    while let Some(e) = cause {
        let part = e.to_string();
        if !text.contains(&part) {
            text.push_str(": ");
            text.push_str(&part);
        }
        cause = e.source();
    }
    text
}

// ── Tests ──────────────────────────────────────────────────────────────────────
