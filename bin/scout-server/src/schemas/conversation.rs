use scout_core::ConversationMessage;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response body for `GET /api/conversation/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConversationResponse {
    /// Oldest first. Empty for an unknown id.
    pub history: Vec<ConversationMessage>,
}
