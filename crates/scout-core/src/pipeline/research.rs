use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A fixed progress label shown while research runs.
///
/// These are display states for the client to reveal on its own timer; they
/// do not track the progress of the model call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ResearchPhase {
    pub phase: String,
    pub update: String,
}

impl ResearchPhase {
    fn new(phase: &str, update: String) -> Self {
        Self {
            phase: phase.to_owned(),
            update,
        }
    }
}

pub fn research_phases(company_name: &str) -> Vec<ResearchPhase> {
    vec![
        ResearchPhase::new(
            "basic_info",
            format!("Starting research on {company_name}... Gathering basic company information."),
        ),
        ResearchPhase::new(
            "market_analysis",
            "Analyzing market position and competitors...".to_owned(),
        ),
        ResearchPhase::new(
            "financials",
            "Looking into financial data and business model...".to_owned(),
        ),
        ResearchPhase::new(
            "synthesis",
            "Synthesizing findings from multiple sources...".to_owned(),
        ),
    ]
}
