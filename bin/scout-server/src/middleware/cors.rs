use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::config::Config;

/// Build the CORS layer from `SCOUT_CORS_ORIGINS`.
///
/// Unset, or a list in which no entry parses, allows any origin.
pub fn cors_layer(config: &Config) -> CorsLayer {
    let base = CorsLayer::new().allow_headers(Any).allow_methods(Any);

    let Some(origins_str) = &config.cors_allowed_origins else {
        return base.allow_origin(Any);
    };

    let origins: Vec<HeaderValue> = origins_str
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();
    if origins.is_empty() {
        warn!(origins = %origins_str, "SCOUT_CORS_ORIGINS has no valid origin; allowing any");
        base.allow_origin(Any)
    } else {
        base.allow_origin(origins)
    }
}
