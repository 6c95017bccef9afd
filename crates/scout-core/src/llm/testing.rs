//! Deterministic [`ChatModel`] for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ChatModel, GenerationParams, ModelError, PromptTurn};

/// One recorded call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub turns: Vec<PromptTurn>,
    pub params: GenerationParams,
}

/// Replays queued replies in order and records every call.
///
/// When the queue is empty the model echoes the last user turn, so tests
/// that only care about prompt shape need not script anything.
#[derive(Debug, Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, (u16, String)>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful completion.
    pub fn reply(self, text: impl Into<String>) -> Self {
        self.lock_replies().push_back(Ok(text.into()));
        self
    }

    /// Queue a provider failure.
    pub fn fail(self, status: u16, message: impl Into<String>) -> Self {
        self.lock_replies().push_back(Err((status, message.into())));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls().pop()
    }

    fn lock_replies(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<String, (u16, String)>>> {
        self.replies.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn complete(
        &self,
        turns: &[PromptTurn],
        params: &GenerationParams,
    ) -> Result<String, ModelError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedCall {
                turns: turns.to_vec(),
                params: *params,
            });

        match self.lock_replies().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err((status, message))) => Err(ModelError::Api {
                status,
                body: serde_json::json!({ "error": { "message": message } }).to_string(),
                message,
            }),
            None => Ok(turns
                .iter()
                .rev()
                .find(|t| t.role == super::Role::User)
                .map(|t| format!("echo: {}", t.content))
                .unwrap_or_default()),
        }
    }

    fn provider(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }
}
