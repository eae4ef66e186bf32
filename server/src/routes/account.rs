use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use supplylink_common::dashboard::{navigation as nav_for, render_dashboard, DashboardView, NavItem};
use supplylink_common::identity::UserProfile;

use crate::error::AppError;
use crate::session::Session;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ProfileView {
    #[serde(flatten)]
    user: UserProfile,
    role_label: &'static str,
    company_label: String,
}

impl From<UserProfile> for ProfileView {
    fn from(user: UserProfile) -> Self {
        Self {
            role_label: user.role.label(),
            company_label: user.company_label(),
            user,
        }
    }
}

#[derive(Deserialize)]
pub struct ProfileUpdate {
    company_name: String,
}

pub async fn profile(session: Session) -> Json<ProfileView> {
    Json(session.user.into())
}

pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<ProfileView>, AppError> {
    let company_name = update.company_name.trim();
    if company_name.is_empty() {
        return Err(AppError::BadRequest("Company name is required.".into()));
    }
    let user = state.users.update_company_name(session.id(), company_name)?;
    Ok(Json(user.into()))
}

pub async fn dashboard(session: Session) -> Json<DashboardView> {
    Json(render_dashboard(session.role()))
}

pub async fn navigation(session: Session) -> Json<&'static [NavItem]> {
    Json(nav_for(session.role()))
}
