//! Per-request session resolved from the bearer token.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Query};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use serde::Deserialize;
use supplylink_common::guard::{guard, RequiredRoles};
use supplylink_common::identity::{UserId, UserProfile, UserRole};

use crate::auth::AuthError;
use crate::error::AppError;
use crate::state::AppState;

/// The signed-in user behind a request. Resolved on every request from the
/// identity provider and the `users` collection.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: UserProfile,
    pub token: String,
}

impl Session {
    pub fn id(&self) -> &UserId {
        &self.user.id
    }

    pub fn role(&self) -> UserRole {
        self.user.role
    }

    /// Fail with the restricted view unless the session's role is allowed.
    pub fn require(&self, required: impl Into<RequiredRoles>) -> Result<(), AppError> {
        match guard(required, self.role()) {
            Some(view) => {
                tracing::debug!(user = %self.user.id, role = %self.role(), "restricted");
                Err(AppError::Restricted(view))
            }
            None => Ok(()),
        }
    }
}

#[derive(Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

fn bearer(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
}

/// WebSocket clients cannot set headers from the browser, so they pass
/// `?token=` instead.
fn query_token(parts: &Parts) -> Option<String> {
    Query::<TokenQuery>::try_from_uri(&parts.uri)
        .ok()
        .and_then(|Query(q)| q.token)
}

impl FromRequestParts<Arc<AppState>> for Session {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let token = bearer(parts)
            .or_else(|| query_token(parts))
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;
        let user_id = state.identity.resolve(&token)?;
        let user = state.users.profile(&user_id).ok_or(AppError::ProfileNotFound)?;
        Ok(Session { user, token })
    }
}
