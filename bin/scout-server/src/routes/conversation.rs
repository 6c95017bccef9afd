use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use scout_core::ConversationMessage;
use utoipa::OpenApi;

use crate::schemas::conversation::ConversationResponse;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(get_conversation),
    components(schemas(ConversationResponse, ConversationMessage))
)]
pub struct ConversationApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/conversation/{id}", get(get_conversation))
}

/// Recorded history for one conversation. Unknown ids yield an empty list.
#[utoipa::path(
    get,
    path = "/api/conversation/{id}",
    tag = "chat",
    params(("id" = String, Path, description = "Client-chosen conversation id")),
    responses(
        (status = 200, description = "Conversation history, oldest first", body = ConversationResponse)
    )
)]
pub async fn get_conversation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<ConversationResponse> {
    Json(ConversationResponse {
        history: state.conversations.get(&id),
    })
}

// ── Tests ──────────────────────────────────────────────────────────────────────
