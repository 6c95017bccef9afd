//! Account plans: the canonical section list, the section parser and the
//! editable plan document.

mod document;
mod parser;

pub use document::{PlanDocument, Sections};
pub use parser::parse_sections;

use thiserror::Error;

/// The ten account-plan sections the generation prompt asks for, in the order
/// they are requested.
pub const CANONICAL_TITLES: [&str; 10] = [
    "Executive Summary",
    "Company Overview",
    "Market Position & Competitors",
    "Key Stakeholders",
    "Business Challenges & Opportunities",
    "Product/Service Fit",
    "Engagement Strategy",
    "Success Metrics",
    "Timeline & Milestones",
    "Risk Assessment",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    /// Section updates may only replace a section the parser produced.
    #[error("plan has no section named {0:?}")]
    UnknownSection(String),
}
