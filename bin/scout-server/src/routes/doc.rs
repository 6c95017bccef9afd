use utoipa::OpenApi;

use crate::routes::{chat, conversation, health, plan, probe, research};

#[derive(OpenApi)]
#[openapi(info(
    title = "scout-server",
    description = "Company research and account-plan generation API"
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(probe::ProbeApi::openapi());
    root.merge(chat::ChatApi::openapi());
    root.merge(research::ResearchApi::openapi());
    root.merge(plan::PlanApi::openapi());
    root.merge(conversation::ConversationApi::openapi());
    root
}
