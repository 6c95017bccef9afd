//! Generation pipeline.
//!
//! Each operation fills its prompt template, makes exactly one call to the
//! [`ChatModel`] with the matching parameter profile, and returns the result.
//! Nothing is retried and nothing partial is returned: a model failure comes
//! back as [`PipelineError::Upstream`] carrying the provider's message.

mod research;

pub use research::{ResearchPhase, research_phases};

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

use crate::llm::{ChatModel, GenerationParams, GenerationProfiles, ModelError, PromptTurn};
use crate::plan::{CANONICAL_TITLES, PlanDocument, parse_sections};
use crate::prompts::PromptLibrary;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The model call failed; the message is the provider's.
    #[error(transparent)]
    Upstream(#[from] ModelError),

    #[error("prompt template error: {0}")]
    Template(#[from] minijinja::Error),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

pub struct GenerationPipeline {
    model: Arc<dyn ChatModel>,
    profiles: GenerationProfiles,
    prompts: PromptLibrary,
}

impl GenerationPipeline {
    pub fn new(model: Arc<dyn ChatModel>, profiles: GenerationProfiles) -> PipelineResult<Self> {
        Ok(Self {
            model,
            profiles,
            prompts: PromptLibrary::new()?,
        })
    }

    pub fn profiles(&self) -> &GenerationProfiles {
        &self.profiles
    }

    pub fn provider(&self) -> &str {
        self.model.provider()
    }

    pub fn model_name(&self) -> &str {
        self.model.model()
    }

    /// Free-form assistant chat.
    ///
    /// The prompt is the assistant persona, then `prior_history` as given by
    /// the caller, then `user_message`. Recording the exchange in a
    /// conversation store is left to the caller.
    pub async fn chat(
        &self,
        conversation_id: Option<&str>,
        user_message: &str,
        prior_history: &[PromptTurn],
    ) -> PipelineResult<String> {
        let mut turns = Vec::with_capacity(prior_history.len() + 2);
        turns.push(PromptTurn::system(self.prompts.chat_system()?));
        turns.extend_from_slice(prior_history);
        turns.push(PromptTurn::user(user_message));

        info!(
            conversation_id = conversation_id.unwrap_or("-"),
            history_len = prior_history.len(),
            "chat request"
        );
        self.call("chat", turns, self.profiles.chat).await
    }

    /// Unstructured research report on `company_name`.
    pub async fn research_company(&self, company_name: &str) -> PipelineResult<String> {
        let turns = vec![
            PromptTurn::system(self.prompts.research_system()),
            PromptTurn::user(self.prompts.research_user(company_name)?),
        ];
        info!(company = company_name, "research request");
        self.call("research", turns, self.profiles.chat).await
    }

    /// Generate a ten-section account plan and split it into sections.
    pub async fn generate_account_plan(
        &self,
        company_name: &str,
        research_data: &str,
        additional_context: Option<&str>,
    ) -> PipelineResult<PlanDocument> {
        let turns = vec![
            PromptTurn::system(self.prompts.plan_system()),
            PromptTurn::user(self.prompts.plan_user(
                company_name,
                research_data,
                additional_context,
            )?),
        ];
        info!(company = company_name, research_len = research_data.len(), "plan request");

        let text = self.call("plan", turns, self.profiles.plan).await?;
        let plan = parse_sections(&text, &CANONICAL_TITLES);
        if plan.is_full_text_only() {
            info!(company = company_name, "no known section headings found; plan is full text only");
        }
        Ok(plan)
    }

    /// Rewrite one section. Returns only the replacement body; merging it
    /// into a held [`PlanDocument`] is the caller's job
    /// (see [`PlanDocument::apply_section_update`]).
    pub async fn update_section(
        &self,
        section_name: &str,
        current_content: &str,
        instructions: &str,
    ) -> PipelineResult<String> {
        let turns = vec![
            PromptTurn::system(self.prompts.update_system()),
            PromptTurn::user(self.prompts.update_user(
                section_name,
                current_content,
                instructions,
            )?),
        ];
        info!(section = section_name, "section update request");
        self.call("section_update", turns, self.profiles.section_update)
            .await
    }

    /// Minimal round trip to confirm the provider is reachable.
    pub async fn probe(&self) -> PipelineResult<String> {
        let turns = vec![PromptTurn::user(self.prompts.probe_user(self.model.provider())?)];
        let params = GenerationParams::new(self.profiles.chat.temperature, Some(50));
        self.call("probe", turns, params).await
    }

    async fn call(
        &self,
        operation: &'static str,
        turns: Vec<PromptTurn>,
        params: GenerationParams,
    ) -> PipelineResult<String> {
        self.model
            .complete(&turns, &params)
            .await
            .map_err(|e| {
                error!(operation, error = %e, "model call failed");
                PipelineError::Upstream(e)
            })
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
