//! Language-model collaborator.
//!
//! Every generation call goes through [`ChatModel`]: an ordered list of
//! role-tagged turns plus sampling parameters in, completion text out.
//! [`OpenAiCompatClient`] is the production implementation; tests substitute
//! [`testing::ScriptedModel`].

mod error;
mod openai;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use error::ModelError;
pub use openai::{DEFAULT_BASE_URL, DEFAULT_MODEL, OpenAiCompatClient};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Author of a prompt turn or stored message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Map a free-form role string from a client. Anything unrecognised is
    /// treated as a user turn.
    pub fn from_wire(role: &str) -> Self {
        match role {
            "system" => Role::System,
            "assistant" => Role::Assistant,
            _ => Role::User,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTurn {
    pub role: Role,
    pub content: String,
}

impl PromptTurn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Sampling parameters for one call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    /// `None` leaves the completion length to the provider.
    pub max_tokens: Option<u32>,
}

impl GenerationParams {
    pub const fn new(temperature: f32, max_tokens: Option<u32>) -> Self {
        Self {
            temperature,
            max_tokens,
        }
    }
}

/// The three parameter profiles used by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationProfiles {
    /// Free-form chat and company research.
    pub chat: GenerationParams,
    /// Full account-plan generation.
    pub plan: GenerationParams,
    /// Single-section rewrites.
    pub section_update: GenerationParams,
}

impl Default for GenerationProfiles {
    fn default() -> Self {
        Self {
            chat: GenerationParams::new(0.7, None),
            plan: GenerationParams::new(0.6, Some(3000)),
            section_update: GenerationParams::new(0.6, Some(1000)),
        }
    }
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Run one completion. Fails with the provider's error; never retries.
    async fn complete(
        &self,
        turns: &[PromptTurn],
        params: &GenerationParams,
    ) -> Result<String, ModelError>;

    /// Short provider label, e.g. `"groq"`.
    fn provider(&self) -> &str;

    /// Model identifier sent to the provider.
    fn model(&self) -> &str;
}
