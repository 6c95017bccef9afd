//! scout-core – account-plan generation core.
//!
//! - [`plan`]: section parser and the editable [`PlanDocument`].
//! - [`llm`]: the model-collaborator seam ([`ChatModel`]) and an
//!   OpenAI-compatible HTTP client.
//! - [`prompts`]: prompt templates.
//! - [`pipeline`]: chat / research / plan / section-update orchestration.
//! - [`conversation`]: process-lifetime conversation history.

pub mod conversation;
pub mod llm;
pub mod pipeline;
pub mod plan;
pub mod prompts;

pub use conversation::{ConversationMessage, ConversationStore, InMemoryConversationStore};
pub use llm::{
    ChatModel, GenerationParams, GenerationProfiles, ModelError, OpenAiCompatClient, PromptTurn,
    Role,
};
pub use pipeline::{GenerationPipeline, PipelineError, PipelineResult, ResearchPhase, research_phases};
pub use plan::{CANONICAL_TITLES, PlanDocument, PlanError, Sections, parse_sections};
