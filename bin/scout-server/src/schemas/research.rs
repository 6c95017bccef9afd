use scout_core::ResearchPhase;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::null_as_default;

/// Request body for `POST /api/research`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResearchRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 1, message = "Company name is required"))]
    pub company_name: String,
}

/// Response body for `POST /api/research`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResearchResponse {
    /// Fixed progress labels for the client to display; not real progress.
    pub phases: Vec<ResearchPhase>,
    /// Unstructured research report.
    pub research: String,
}
