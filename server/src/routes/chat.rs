use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use supplylink_common::conversation::{Conversation, ConversationId, ConversationSummary, Participant};
use supplylink_common::directory::SupplierId;
use supplylink_common::identity::UserId;
use supplylink_common::message::Message;

use crate::error::AppError;
use crate::session::Session;
use crate::state::AppState;
use crate::store::StoreError;

#[derive(Deserialize)]
pub struct StartConversation {
    other_id: UserId,
}

#[derive(Serialize)]
pub struct ConversationRef {
    id: ConversationId,
}

#[derive(Deserialize)]
pub struct SendMessage {
    text: String,
}

/// The other side of a new conversation: a registered user, or failing that a
/// directory supplier that has not signed up yet.
fn resolve_participant(state: &AppState, id: &UserId) -> Result<Participant, AppError> {
    if let Some(profile) = state.users.profile(id) {
        return Ok(Participant::from(&profile));
    }
    state
        .catalog
        .supplier(&SupplierId::new(id.as_str()))
        .map(|entry| Participant {
            id: id.clone(),
            name: entry.name.clone(),
            company: entry.name.clone(),
        })
        .ok_or_else(|| AppError::NotFound(format!("user {id}")))
}

/// The conversation `id`, provided the session takes part in it.
pub fn joined_conversation(
    state: &AppState,
    session: &Session,
    id: ConversationId,
) -> Result<Conversation, AppError> {
    let conversation = state.conversations.conversation(id)?;
    if !conversation.has_participant(session.id()) {
        return Err(StoreError::NotParticipant(session.id().clone()).into());
    }
    Ok(conversation)
}

pub async fn list(State(state): State<Arc<AppState>>, session: Session) -> Json<Vec<ConversationSummary>> {
    Json(state.conversations.list_conversations(session.id()))
}

pub async fn find_or_create(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(req): Json<StartConversation>,
) -> Result<Json<ConversationRef>, AppError> {
    let other = resolve_participant(&state, &req.other_id)?;
    let me = Participant::from(&session.user);
    let id = state.conversations.find_or_create_conversation(&me, &other)?;
    Ok(Json(ConversationRef { id }))
}

pub async fn messages(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<ConversationId>,
) -> Result<Json<Vec<Message>>, AppError> {
    joined_conversation(&state, &session, id)?;
    Ok(Json(state.conversations.list_messages(id)?))
}

pub async fn send(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<ConversationId>,
    Json(req): Json<SendMessage>,
) -> Result<(StatusCode, Json<Message>), AppError> {
    let message = state.conversations.append_message(
        id,
        session.id(),
        session.user.display_name(),
        &req.text,
    )?;
    Ok((StatusCode::CREATED, Json(message)))
}
