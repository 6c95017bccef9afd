//! Process-lifetime conversation history.
//!
//! History here is advisory prompt context, not a system of record: nothing
//! is persisted and nothing is evicted. [`ConversationStore`] is the seam for
//! swapping in another backend; [`InMemoryConversationStore`] is the default.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::llm::{PromptTurn, Role};

/// A single stored message. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ConversationMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn to_turn(&self) -> PromptTurn {
        PromptTurn::new(self.role, self.content.clone())
    }
}

pub trait ConversationStore: Send + Sync + 'static {
    /// Append `messages` to the conversation, creating it if unseen. The
    /// batch lands contiguously.
    fn append(&self, conversation_id: &str, messages: Vec<ConversationMessage>);

    /// Full ordered history; empty for an unknown id.
    fn get(&self, conversation_id: &str) -> Vec<ConversationMessage>;

    /// Number of known conversations.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
pub struct InMemoryConversationStore {
    conversations: Mutex<HashMap<String, Vec<ConversationMessage>>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock still holds consistent data: appends are a single
    // `extend` and never observed half-done.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<ConversationMessage>>> {
        self.conversations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ConversationStore for InMemoryConversationStore {
    fn append(&self, conversation_id: &str, messages: Vec<ConversationMessage>) {
        let count = messages.len();
        let mut map = self.lock();
        let log = map.entry(conversation_id.to_owned()).or_default();
        log.extend(messages);
        debug!(conversation_id, appended = count, total = log.len(), "conversation appended");
    }

    fn get(&self, conversation_id: &str) -> Vec<ConversationMessage> {
        self.lock().get(conversation_id).cloned().unwrap_or_default()
    }

    fn len(&self) -> usize {
        self.lock().len()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
