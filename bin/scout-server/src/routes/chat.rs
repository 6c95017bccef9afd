//! Assistant chat.
//!
//! The client owns the transcript and sends prior turns as `history`; the
//! server-side store only records exchanges for `GET /api/conversation/{id}`.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use scout_core::{ConversationMessage, PromptTurn, Role};
use tracing::debug;
use utoipa::OpenApi;
use validator::Validate;

use crate::error::ServerError;
use crate::extract::ApiJson;
use crate::schemas::chat::{ChatRequest, ChatResponse, HistoryEntry};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(chat),
    components(schemas(ChatRequest, ChatResponse, HistoryEntry, Role))
)]
pub struct ChatApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/chat", post(chat))
}

/// Chat with the research assistant.
///
/// When `conversationId` is non-empty, the user message and the reply are
/// appended to that conversation after the model answers. A failed call
/// records nothing.
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse),
        (status = 400, description = "Message is required"),
        (status = 500, description = "Model provider error"),
    )
)]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<ChatRequest>,
) -> Result<Json<ChatResponse>, ServerError> {
    req.validate()?;

    let conversation_id = req.conversation_id.as_deref().filter(|id| !id.is_empty());
    let history: Vec<PromptTurn> = req.history.iter().map(HistoryEntry::to_turn).collect();

    let reply = state
        .pipeline
        .chat(conversation_id, &req.message, &history)
        .await?;

    if let Some(id) = conversation_id {
        state.conversations.append(
            id,
            vec![
                ConversationMessage::new(Role::User, req.message.as_str()),
                ConversationMessage::new(Role::Assistant, reply.as_str()),
            ],
        );
        debug!(conversation_id = id, "exchange recorded");
    }

    Ok(Json(ChatResponse::assistant(reply)))
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
    async fn missing_message_is_rejected_without_model_call() {
        let (state, model) = test_state(ScriptedModel::new());
        for body in [json!({}), json!({ "message": "" })] {
            let (status, res) = send(build(state.clone()), Method::POST, "/api/chat", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(res, json!({ "error": "Message is required" }));
        }
        assert!(model.calls().is_empty());
    }

    #[tokio::test]
    async fn null_message_reads_as_missing() {
        let (state, model) = test_state(ScriptedModel::new());
        let (status, res) = send(
            build(state),
            Method::POST,
            "/api/chat",
            Some(json!({ "message": null })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(res, json!({ "error": "Message is required" }));
        assert!(model.calls().is_empty());
    }

    #[tokio::test]
    async fn null_history_reads_as_empty() {
        let (state, model) = test_state(ScriptedModel::new().reply("ok"));
        let (status, res) = send(
            build(state),
            Method::POST,
            "/api/chat",
            Some(json!({ "message": "hi", "history": null, "conversationId": null })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(res["message"], "ok");
        assert_eq!(model.last_call().unwrap().turns.len(), 2);
    }

    #[tokio::test]
    async fn wrong_shape_gets_error_body() {
        let (state, _) = test_state(ScriptedModel::new());
        let (status, res) = send(
            build(state),
            Method::POST,
            "/api/chat",
            Some(json!({ "message": 5 })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(res["error"].is_string());
    }

    #[tokio::test]
    async fn missing_body_gets_error_body() {
        let (state, _) = test_state(ScriptedModel::new());
        let (status, res) = send(build(state), Method::POST, "/api/chat", None).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(res["error"].is_string());
    }

    #[tokio::test]
    async fn reply_is_tagged_assistant() {
        let (state, _) = test_state(ScriptedModel::new().reply("Which company?"));
        let (status, res) = send(
            build(state),
            Method::POST,
            "/api/chat",
            Some(json!({ "message": "Help me plan" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(res, json!({ "message": "Which company?", "role": "assistant" }));
    }

    #[tokio::test]
    async fn history_is_forwarded_with_unknown_roles_as_user() {
        let (state, model) = test_state(ScriptedModel::new());
        send(
            build(state),
            Method::POST,
            "/api/chat",
            Some(json!({
                "message": "next",
                "history": [
                    { "role": "user", "content": "a" },
                    { "role": "assistant", "content": "b" },
                    { "role": "tool", "content": "c" },
                ],
            })),
        )
        .await;

        let turns = model.last_call().unwrap().turns;
        let roles: Vec<_> = turns.iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            [Role::System, Role::User, Role::Assistant, Role::User, Role::User]
        );
        assert_eq!(turns[3].content, "c");
    }

    #[tokio::test]
    async fn exchange_is_recorded_under_conversation_id() {
        let (state, _) = test_state(ScriptedModel::new().reply("r1").reply("r2"));
        for msg in ["q1", "q2"] {
            send(
                build(state.clone()),
                Method::POST,
                "/api/chat",
                Some(json!({ "conversationId": "c-1", "message": msg })),
            )
            .await;
        }

        let log = state.conversations.get("c-1");
        let pairs: Vec<_> = log.iter().map(|m| (m.role, m.content.as_str())).collect();
        assert_eq!(
            pairs,
            [
                (Role::User, "q1"),
                (Role::Assistant, "r1"),
                (Role::User, "q2"),
                (Role::Assistant, "r2"),
            ]
        );
    }

    #[tokio::test]
    async fn nothing_is_recorded_without_id_or_on_failure() {
        let (state, _) = test_state(ScriptedModel::new().reply("ok").fail(500, "boom"));
        send(
            build(state.clone()),
            Method::POST,
            "/api/chat",
            Some(json!({ "conversationId": "", "message": "hi" })),
        )
        .await;
        let (status, res) = send(
            build(state.clone()),
            Method::POST,
            "/api/chat",
            Some(json!({ "conversationId": "c-2", "message": "hi" })),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res["error"], "API returned 500: boom");
        assert!(state.conversations.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_chats_on_distinct_ids_stay_isolated() {
        let (state, _) = test_state(ScriptedModel::new());
        let mut handles = Vec::new();
        for n in 0..16 {
            let app = build(state.clone());
            handles.push(tokio::spawn(async move {
                send(
                    app,
                    Method::POST,
                    "/api/chat",
                    Some(json!({ "conversationId": format!("conv-{}", n % 4), "message": format!("m{n}") })),
                )
                .await
            }));
        }
        for h in handles {
            assert_eq!(h.await.unwrap().0, StatusCode::OK);
        }

        for id in 0..4 {
            let log = state.conversations.get(&format!("conv-{id}"));
            assert_eq!(log.len(), 8);
            for pair in log.chunks(2) {
                let n: usize = pair[0].content[1..].parse().unwrap();
                assert_eq!(n % 4, id, "foreign message in conv-{id}");
                assert_eq!(pair[1].content, format!("echo: m{n}"));
            }
        }
    }
}
