use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use supplylink_common::assistant::{self, AssistantContext, Capability, Suggestion, WELCOME_MESSAGE};
use supplylink_common::identity::UserRole;
use supplylink_common::seed;

use super::orders::orders_for;
use crate::error::AppError;
use crate::session::Session;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AskRequest {
    prompt: String,
    #[serde(default)]
    context: Option<AssistantContext>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct InsightsRequest {
    context: Option<AssistantContext>,
}

#[derive(Serialize)]
pub struct AskResponse {
    capability: Capability,
    reply: String,
}

#[derive(Serialize)]
pub struct SuggestionsResponse {
    welcome: &'static str,
    suggestions: &'static [Suggestion],
}

pub async fn ask(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, AppError> {
    let prompt = req.prompt.trim();
    if prompt.is_empty() {
        return Err(AppError::BadRequest("Prompt must not be empty.".into()));
    }
    let context = session_context(&session, req.context);

    let capability = Capability::classify(prompt);
    let reply = state.assistant.respond(prompt, &context);
    tracing::debug!(user = %session.id(), ?capability, "assistant answered");
    Ok(Json(AskResponse { capability, reply }))
}

/// Cost optimization for vendors, market insights for suppliers.
pub async fn insights(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(req): Json<InsightsRequest>,
) -> Json<AskResponse> {
    let context = session_context(&session, req.context);
    let (capability, reply) = state.assistant.insights(&context);
    tracing::debug!(user = %session.id(), ?capability, "insights generated");
    Json(AskResponse { capability, reply })
}

/// The caller's context with the gaps filled from their own data. The role
/// always comes from the session.
fn session_context(session: &Session, supplied: Option<AssistantContext>) -> AssistantContext {
    let role = session.role();
    let mut base = AssistantContext::from_orders(role, &orders_for(role));
    match role {
        UserRole::Vendor => {
            base.ingredient_costs = seed::ingredient_costs();
            base.menu_items = seed::menu_items();
        }
        UserRole::Supplier => base.categories = seed::insight_categories(),
    }
    let mut context = supplied.unwrap_or_default().or_else(base);
    context.role = role;
    context
}

pub async fn suggestions(session: Session) -> Json<SuggestionsResponse> {
    Json(SuggestionsResponse {
        welcome: WELCOME_MESSAGE,
        suggestions: assistant::suggestions(session.role()),
    })
}
