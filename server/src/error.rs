use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use supplylink_common::guard::RestrictedView;
use thiserror::Error;

use crate::auth::AuthError;
use crate::catalog::CatalogError;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("User profile not found.")]
    ProfileNotFound,

    #[error("{}", .0.message)]
    Restricted(RestrictedView),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Auth(AuthError::EmailTaken) => StatusCode::CONFLICT,
            AppError::Auth(AuthError::InvalidEmail | AuthError::WeakPassword) => StatusCode::BAD_REQUEST,
            AppError::Auth(_) | AppError::ProfileNotFound => StatusCode::UNAUTHORIZED,
            AppError::Restricted(_) => StatusCode::FORBIDDEN,
            AppError::Store(StoreError::ConversationNotFound(_) | StoreError::UserNotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            AppError::Store(StoreError::NotParticipant(_)) => StatusCode::FORBIDDEN,
            AppError::Store(StoreError::EmptyMessage | StoreError::SelfConversation) => StatusCode::BAD_REQUEST,
            AppError::Catalog(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{self}");
        } else {
            tracing::debug!(%status, "{self}");
        }

        match self {
            AppError::Restricted(view) => (
                status,
                [(header::LOCATION, view.redirect_to.clone())],
                Json(view),
            )
                .into_response(),
            other => (status, Json(ErrorBody { error: other.to_string() })).into_response(),
        }
    }
}
