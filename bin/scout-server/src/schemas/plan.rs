use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::null_as_default;

/// Request body for `POST /api/generate-plan`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePlanRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 1, message = "Company name and research data are required"))]
    pub company_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 1, message = "Company name and research data are required"))]
    pub research_data: String,
    /// Free-text steering for the plan. Empty is the same as absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<String>,
}

/// Request body for `POST /api/update-section`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSectionRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(
        min = 1,
        message = "Section name, current content, and update instructions are required"
    ))]
    pub section_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(
        min = 1,
        message = "Section name, current content, and update instructions are required"
    ))]
    pub current_content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(
        min = 1,
        message = "Section name, current content, and update instructions are required"
    ))]
    pub update_instructions: String,
}

/// Response body for `POST /api/update-section`.
///
/// Only the replacement body; the client merges it into its own plan.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSectionResponse {
    pub updated_content: String,
}
