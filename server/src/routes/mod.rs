use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

mod account;
mod assistant;
mod auth;
mod catalog;
mod chat;
mod orders;
mod ws;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .route("/profile", get(account::profile).put(account::update_profile))
        .route("/dashboard", get(account::dashboard))
        .route("/navigation", get(account::navigation))
        .route("/products", get(catalog::my_products).post(catalog::add_product))
        .route("/marketplace", get(catalog::marketplace))
        .route("/suppliers", get(catalog::suppliers))
        .route("/suppliers/{id}", get(catalog::supplier))
        .route("/orders", get(orders::list))
        .route("/conversations", get(chat::list).post(chat::find_or_create))
        .route(
            "/conversations/{id}/messages",
            get(chat::messages).post(chat::send),
        )
        .route("/assistant", post(assistant::ask))
        .route("/assistant/insights", post(assistant::insights))
        .route("/assistant/suggestions", get(assistant::suggestions))
        .route("/ws/conversations", get(ws::conversations))
        .route("/ws/conversations/{id}/messages", get(ws::messages))
}
