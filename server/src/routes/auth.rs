use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use supplylink_common::identity::{UserProfile, UserRole};

use crate::error::AppError;
use crate::session::Session;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SignupRequest {
    email: String,
    password: String,
    company_name: String,
    role: UserRole,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    token: String,
    user: UserProfile,
}

pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<UserProfile>), AppError> {
    let company_name = req.company_name.trim();
    if company_name.is_empty() {
        return Err(AppError::BadRequest("Company name is required.".into()));
    }
    let id = state.identity.sign_up(&req.email, &req.password)?;
    let profile = UserProfile::new(id, &req.email.trim().to_lowercase(), company_name, req.role);
    state.users.insert_profile(profile.clone());
    tracing::info!(user = %profile.id, role = %profile.role, "account created");
    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let id = state.identity.sign_in(&req.email, &req.password)?;
    let user = state.users.profile(&id).ok_or_else(|| {
        tracing::warn!(user = %id, "identity without a profile");
        AppError::ProfileNotFound
    })?;
    let token = state.identity.issue_token(&id);
    tracing::info!(user = %id, "signed in");
    Ok(Json(LoginResponse { token, user }))
}

pub async fn logout(State(state): State<Arc<AppState>>, session: Session) -> StatusCode {
    state.identity.revoke(&session.token);
    tracing::info!(user = %session.id(), "signed out");
    StatusCode::NO_CONTENT
}

pub async fn me(session: Session) -> Json<UserProfile> {
    Json(session.user)
}
