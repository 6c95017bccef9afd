//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use scout_core::{ConversationStore, GenerationPipeline};

use crate::config::Config;

/// State shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Model-backed generation operations.
    pub pipeline: Arc<GenerationPipeline>,
    /// Process-lifetime chat history, keyed by client-supplied id.
    pub conversations: Arc<dyn ConversationStore>,
}
