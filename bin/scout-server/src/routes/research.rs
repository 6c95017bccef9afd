use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use scout_core::{ResearchPhase, research_phases};
use tracing::info;
use utoipa::OpenApi;
use validator::Validate;

use crate::error::ServerError;
use crate::extract::ApiJson;
use crate::schemas::research::{ResearchRequest, ResearchResponse};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(research),
    components(schemas(ResearchRequest, ResearchResponse, ResearchPhase))
)]
pub struct ResearchApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/research", post(research))
}

/// Research a company.
///
/// `phases` are fixed display labels returned alongside the report.
#[utoipa::path(
    post,
    path = "/api/research",
    tag = "research",
    request_body = ResearchRequest,
    responses(
        (status = 200, description = "Research report", body = ResearchResponse),
        (status = 400, description = "Company name is required"),
        (status = 500, description = "Model provider error"),
    )
)]
pub async fn research(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<ResearchRequest>,
) -> Result<Json<ResearchResponse>, ServerError> {
    req.validate()?;

    let research = state.pipeline.research_company(&req.company_name).await?;
    info!(company = %req.company_name, len = research.len(), "research completed");

    Ok(Json(ResearchResponse {
        phases: research_phases(&req.company_name),
        research,
    }))
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use axum::http::{Method, StatusCode};
    use scout_core::llm::testing::ScriptedModel;
    use serde_json::json;

    use super::*;
    use crate::routes::build;
    use crate::routes::test_support::{send, test_state};

    #[tokio::test]
    async fn missing_company_is_rejected() {
        let (state, model) = test_state(ScriptedModel::new());
        for body in [json!({}), json!({ "companyName": null })] {
            let (status, res) =
                send(build(state.clone()), Method::POST, "/api/research", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(res, json!({ "error": "Company name is required" }));
        }
        assert!(model.calls().is_empty());
    }

    #[tokio::test]
    async fn returns_phases_and_report() {
        let (state, _) = test_state(ScriptedModel::new().reply("Acme makes anvils."));
        let (status, res) = send(
            build(state),
            Method::POST,
            "/api/research",
            Some(json!({ "companyName": "Acme Corp" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(res["research"], "Acme makes anvils.");
        let phases = res["phases"].as_array().unwrap();
        assert_eq!(phases.len(), 4);
        assert_eq!(phases[0]["phase"], "basic_info");
        assert!(phases[0]["update"].as_str().unwrap().contains("Acme Corp"));
    }

    #[tokio::test]
    async fn upstream_error_is_relayed() {
        let (state, _) = test_state(ScriptedModel::new().fail(429, "Rate limit reached"));
        let (status, res) = send(
            build(state),
            Method::POST,
            "/api/research",
            Some(json!({ "companyName": "Acme" })),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res, json!({ "error": "API returned 429: Rate limit reached" }));
    }
}
