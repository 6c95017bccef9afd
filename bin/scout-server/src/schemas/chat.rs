use scout_core::{PromptTurn, Role};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::null_as_default;

/// One prior turn supplied by the client.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistoryEntry {
    /// `"user"`, `"assistant"` or `"system"`. Anything else is sent as a user turn.
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
}

impl HistoryEntry {
    pub fn to_turn(&self) -> PromptTurn {
        PromptTurn::new(Role::from_wire(&self.role), self.content.clone())
    }
}

/// Request body for `POST /api/chat`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// When present, the exchange is recorded under this id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
    /// Prior turns replayed into the prompt, oldest first.
    #[serde(default, deserialize_with = "null_as_default")]
    pub history: Vec<HistoryEntry>,
}

/// Response body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub message: String,
    /// Always `"assistant"`.
    pub role: Role,
}

impl ChatResponse {
    pub fn assistant(message: String) -> Self {
        Self {
            message,
            role: Role::Assistant,
        }
    }
}
