//! Axum router construction.
//!
//! [`build`] assembles the complete application router, including:
//! - Middleware layers (CORS, per-request trace-ID injection)
//! - Optional OpenAPI document (disable with `SCOUT_ENABLE_OPENAPI=false`)
//! - Health and model-connectivity routes
//! - Chat, research, plan and conversation routes, all under `/api`

mod chat;
mod conversation;
pub mod doc;
mod health;
mod plan;
mod probe;
mod research;

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router, middleware};
use tower::ServiceBuilder;

use crate::middleware::{cors, trace};
use crate::state::AppState;

// ── Router builder ────────────────────────────────────────────────────────────

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    let mut api_router = Router::new()
        .merge(health::router())
        .merge(probe::router())
        .merge(chat::router())
        .merge(research::router())
        .merge(plan::router())
        .merge(conversation::router());

    if state.config.enable_openapi {
        let api_doc = doc::get_docs();
        api_router = api_router.route(
            "/openapi.json",
            get(move || {
                let api_doc = api_doc.clone();
                async move { Json(api_doc) }
            }),
        );
    }

    Router::new()
        .nest("/api", api_router)
        // Outermost layers execute first on the way in.
        .layer(ServiceBuilder::new().layer(cors::cors_layer(&state.config)))
        .layer(middleware::from_fn(trace::trace_middleware))
        .with_state(state)
}


// ── Tests ──────────────────────────────────────────────────────────────────────
