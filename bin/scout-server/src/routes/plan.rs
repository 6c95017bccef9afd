//! Account-plan generation and single-section rewrites.
//!
//! The server holds no plans. `generate-plan` returns the parsed document and
//! `update-section` returns only a replacement body; the client keeps the
//! plan and merges updates into it.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use scout_core::PlanDocument;
use tracing::info;
use utoipa::OpenApi;
use validator::Validate;

use crate::error::ServerError;
use crate::extract::ApiJson;
use crate::schemas::plan::{GeneratePlanRequest, UpdateSectionRequest, UpdateSectionResponse};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(generate_plan, update_section),
    components(schemas(
        GeneratePlanRequest,
        PlanDocument,
        UpdateSectionRequest,
        UpdateSectionResponse
    ))
)]
pub struct PlanApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generate-plan", post(generate_plan))
        .route("/update-section", post(update_section))
}

/// Generate an account plan from research notes.
///
/// `sections` maps each recognised heading to its body, in the order the
/// headings appear. It is empty when the model used none of the expected
/// headings; show `fullText` instead.
#[utoipa::path(
    post,
    path = "/api/generate-plan",
    tag = "plan",
    request_body = GeneratePlanRequest,
    responses(
        (status = 200, description = "Generated plan", body = PlanDocument),
        (status = 400, description = "Company name and research data are required"),
        (status = 500, description = "Model provider error"),
    )
)]
pub async fn generate_plan(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<GeneratePlanRequest>,
) -> Result<Json<PlanDocument>, ServerError> {
    req.validate()?;

    let plan = state
        .pipeline
        .generate_account_plan(
            &req.company_name,
            &req.research_data,
            req.additional_context.as_deref(),
        )
        .await?;
    info!(
        company = %req.company_name,
        sections = plan.sections.len(),
        "account plan generated"
    );
    Ok(Json(plan))
}

/// Rewrite one plan section according to free-text instructions.
#[utoipa::path(
    post,
    path = "/api/update-section",
    tag = "plan",
    request_body = UpdateSectionRequest,
    responses(
        (status = 200, description = "Replacement section body", body = UpdateSectionResponse),
        (status = 400, description = "Section name, current content, and update instructions are required"),
        (status = 500, description = "Model provider error"),
    )
)]
pub async fn update_section(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<UpdateSectionRequest>,
) -> Result<Json<UpdateSectionResponse>, ServerError> {
    req.validate()?;

    let updated_content = state
        .pipeline
        .update_section(
            &req.section_name,
            &req.current_content,
            &req.update_instructions,
        )
        .await?;
    Ok(Json(UpdateSectionResponse { updated_content }))
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use axum::http::{Method, StatusCode};
    use scout_core::llm::testing::ScriptedModel;
    use serde_json::{Value, json};

    use super::*;
    use crate::routes::build;
    use crate::routes::test_support::{send, send_raw, test_state};

    const PLAN_TEXT: &str = "\
# Account Plan: Acme
## Executive Summary
Grow the account.
## Company Overview
Anvils since 1949.
## Risk Assessment
Coyote.";

    #[tokio::test]
    async fn plan_requires_company_and_research() {
        let (state, model) = test_state(ScriptedModel::new());
        for body in [
            json!({ "researchData": "notes" }),
            json!({ "companyName": "Acme" }),
            json!({ "companyName": "", "researchData": "" }),
            json!({ "companyName": null, "researchData": "notes" }),
        ] {
            let (status, res) =
                send(build(state.clone()), Method::POST, "/api/generate-plan", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(res["error"], "Company name and research data are required");
        }
        assert!(model.calls().is_empty());
    }

    #[tokio::test]
    async fn plan_sections_keep_encounter_order() {
        let text = "## Risk Assessment\nCoyote.\n## Executive Summary\nGrow.\n## Company Overview\nAnvils.";
        let (state, _) = test_state(ScriptedModel::new().reply(text));
        let (status, raw) = send_raw(
            build(state),
            Method::POST,
            "/api/generate-plan",
            Some(json!({ "companyName": "Acme", "researchData": "notes" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let plan: PlanDocument = serde_json::from_str(&raw).unwrap();
        assert_eq!(plan.full_text, text);
        let titles: Vec<_> = plan.sections.titles().collect();
        assert_eq!(titles, ["Risk Assessment", "Executive Summary", "Company Overview"]);
        assert_eq!(plan.section("Risk Assessment"), Some("Coyote."));

        let risk = raw.find("\"Risk Assessment\":").unwrap();
        let summary = raw.find("\"Executive Summary\":").unwrap();
        assert!(risk < summary, "sections must be emitted in encounter order: {raw}");
    }

    #[tokio::test]
    async fn plan_without_headings_is_full_text_only() {
        let (state, _) = test_state(ScriptedModel::new().reply("Sorry, no plan today."));
        let (status, res) = send(
            build(state),
            Method::POST,
            "/api/generate-plan",
            Some(json!({ "companyName": "Acme", "researchData": "notes" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(res["sections"], json!({}));
        assert_eq!(res["fullText"], "Sorry, no plan today.");
    }

    #[tokio::test]
    async fn additional_context_reaches_prompt() {
        let (state, model) = test_state(ScriptedModel::new());
        send(
            build(state),
            Method::POST,
            "/api/generate-plan",
            Some(json!({
                "companyName": "Acme",
                "researchData": "notes",
                "additionalContext": "Focus on EMEA",
            })),
        )
        .await;
        let call = model.last_call().unwrap();
        let prompt = &call.turns[1].content;
        assert!(prompt.contains("Focus on EMEA"));
        assert!(!prompt.contains("None provided"));
    }

    #[tokio::test]
    async fn update_requires_all_three_fields() {
        let (state, model) = test_state(ScriptedModel::new());
        let full = json!({
            "sectionName": "Executive Summary",
            "currentContent": "old",
            "updateInstructions": "shorter",
        });
        for field in ["sectionName", "currentContent", "updateInstructions"] {
            let mut body = full.clone();
            body.as_object_mut().unwrap().remove(field);
            let (status, res) =
                send(build(state.clone()), Method::POST, "/api/update-section", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "without {field}");
            assert_eq!(
                res["error"],
                "Section name, current content, and update instructions are required"
            );
        }
        assert!(model.calls().is_empty());
    }

    #[tokio::test]
    async fn update_treats_null_fields_as_missing() {
        let (state, model) = test_state(ScriptedModel::new());
        let (status, res) = send(
            build(state),
            Method::POST,
            "/api/update-section",
            Some(json!({
                "sectionName": "Executive Summary",
                "currentContent": null,
                "updateInstructions": "shorter",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            res["error"],
            "Section name, current content, and update instructions are required"
        );
        assert!(model.calls().is_empty());
    }

    #[tokio::test]
    async fn update_returns_only_replacement_body() {
        let (state, model) = test_state(ScriptedModel::new().reply("Tighter summary."));
        let (status, res) = send(
            build(state),
            Method::POST,
            "/api/update-section",
            Some(json!({
                "sectionName": "Executive Summary",
                "currentContent": "Grow the account.",
                "updateInstructions": "Add a revenue target",
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(res, json!({ "updatedContent": "Tighter summary." }));
        let call = model.last_call().unwrap();
        assert_eq!(call.params.max_tokens, Some(1000));
        assert!(call.turns[1].content.contains("Add a revenue target"));
    }

    #[tokio::test]
    async fn generate_then_update_round_trip_through_client_merge() {
        let (state, _) = test_state(ScriptedModel::new().reply(PLAN_TEXT).reply("New summary."));
        let (_, plan_json) = send(
            build(state.clone()),
            Method::POST,
            "/api/generate-plan",
            Some(json!({ "companyName": "Acme", "researchData": "notes" })),
        )
        .await;
        let mut plan: PlanDocument = serde_json::from_value(plan_json).unwrap();
        let before = plan.clone();

        let (_, res) = send(
            build(state),
            Method::POST,
            "/api/update-section",
            Some(json!({
                "sectionName": "Executive Summary",
                "currentContent": plan.section("Executive Summary"),
                "updateInstructions": "rewrite",
            })),
        )
        .await;
        let Value::String(body) = &res["updatedContent"] else {
            panic!("updatedContent missing: {res}");
        };
        plan.apply_section_update("Executive Summary", body.as_str())
            .unwrap();

        assert_eq!(plan.section("Executive Summary"), Some("New summary."));
        assert_eq!(plan.section("Company Overview"), before.section("Company Overview"));
        assert_eq!(plan.section("Risk Assessment"), before.section("Risk Assessment"));
    }
}
