use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
    pub message: String,
    pub version: String,
}

/// Response body for `GET /api/test-ai`, on success and on failure.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProbeResponse {
    /// `"success"` or `"error"`.
    pub status: String,
    /// The model's reply, or the provider error text.
    pub message: String,
    pub provider: String,
    /// Present on success only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Present on failure only: the provider's error response, parsed as JSON
    /// when possible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
}
