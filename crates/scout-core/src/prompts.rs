//! Prompt templates, rendered with minijinja.

use minijinja::{Environment, context};

use crate::plan::CANONICAL_TITLES;

/// Substituted when a plan request carries no additional context.
pub const NO_ADDITIONAL_CONTEXT: &str = "None provided";

const CHAT_SYSTEM: &str = "\
You are an intelligent Company Research Assistant specialized in creating comprehensive account plans.

Your capabilities:
1. Research companies from multiple sources and synthesize findings
2. Provide real-time updates during research with conversational insights
3. Ask clarifying questions when you encounter conflicting information
4. Generate structured account plans with key sections
5. Help users update specific sections of account plans

When researching:
- Be thorough but concise
- Highlight important findings
- Ask for clarification when needed
- Suggest areas that need more investigation

When generating account plans, include these sections:
{% for title in sections -%}
{{ loop.index }}. {{ title }}
{% endfor %}
Always maintain a professional yet conversational tone.";

const RESEARCH_SYSTEM: &str =
    "You are a professional business researcher. Provide factual, well-structured company research.";

const RESEARCH_USER: &str = "\
Research the company \"{{ company_name }}\" and provide comprehensive information including:
1. Company overview (founding, mission, size, location)
2. Products/Services
3. Market position and key competitors
4. Recent news and developments
5. Financial highlights (if public)
6. Key leadership
7. Strategic initiatives

Format the response as a detailed but structured report.";

const PLAN_SYSTEM: &str =
    "You are an expert account planner. Create comprehensive, actionable account plans.";

const PLAN_USER: &str = "\
Based on the following research about {{ company_name }}, generate a comprehensive account plan.

Research Data:
{{ research_data }}

Additional Context:
{{ additional_context }}

Create a detailed account plan with all {{ sections|length }} sections:
{% for title in sections -%}
{{ loop.index }}. {{ title }}
{% endfor %}
Format each section with a clear heading (use ## for section titles) and detailed content.";

const UPDATE_SYSTEM: &str =
    "You are an expert account planner helping to refine account plan sections.";

const UPDATE_USER: &str = "\
You are updating the \"{{ section_name }}\" section of an account plan.

Current Content:
{{ current_content }}

Update Instructions:
{{ instructions }}

Provide the updated content for this section only. Maintain the same format and style.";

const PROBE_USER: &str = "Say \"Hello, {{ provider }} is working!\"";

/// Compiled prompt templates.
pub struct PromptLibrary {
    env: Environment<'static>,
}

impl PromptLibrary {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("chat_system", CHAT_SYSTEM)?;
        env.add_template("research_user", RESEARCH_USER)?;
        env.add_template("plan_user", PLAN_USER)?;
        env.add_template("update_user", UPDATE_USER)?;
        env.add_template("probe_user", PROBE_USER)?;
        Ok(Self { env })
    }

    pub fn chat_system(&self) -> Result<String, minijinja::Error> {
        self.render("chat_system", context! { sections => CANONICAL_TITLES })
    }

    pub fn research_system(&self) -> &'static str {
        RESEARCH_SYSTEM
    }

    pub fn research_user(&self, company_name: &str) -> Result<String, minijinja::Error> {
        self.render("research_user", context! { company_name })
    }

    pub fn plan_system(&self) -> &'static str {
        PLAN_SYSTEM
    }

    /// `additional_context` falls back to [`NO_ADDITIONAL_CONTEXT`] when
    /// absent or empty.
    pub fn plan_user(
        &self,
        company_name: &str,
        research_data: &str,
        additional_context: Option<&str>,
    ) -> Result<String, minijinja::Error> {
        let additional_context = additional_context
            .filter(|c| !c.is_empty())
            .unwrap_or(NO_ADDITIONAL_CONTEXT);
        self.render(
            "plan_user",
            context! {
                company_name,
                research_data,
                additional_context,
                sections => CANONICAL_TITLES,
            },
        )
    }

    pub fn update_system(&self) -> &'static str {
        UPDATE_SYSTEM
    }

    pub fn update_user(
        &self,
        section_name: &str,
        current_content: &str,
        instructions: &str,
    ) -> Result<String, minijinja::Error> {
        self.render(
            "update_user",
            context! { section_name, current_content, instructions },
        )
    }

    pub fn probe_user(&self, provider: &str) -> Result<String, minijinja::Error> {
        self.render("probe_user", context! { provider })
    }

    fn render(&self, name: &str, ctx: minijinja::Value) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(ctx)
    }
}
