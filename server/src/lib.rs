//! SupplyLink marketplace API.
//!
//! Vendors browse the marketplace and supplier directory, suppliers manage
//! their listings, and both sides chat through conversations that push live
//! snapshots over WebSocket. Identity, the document store and the assistant
//! backend sit behind traits with in-memory implementations.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub mod auth;
pub mod catalog;
pub mod config;
pub mod demo;
pub mod error;
pub mod routes;
pub mod session;
pub mod state;
pub mod store;

pub use error::AppError;
pub use state::AppState;

pub fn app(state: Arc<AppState>, cors: CorsLayer) -> Router {
    routes::router().layer(cors).with_state(state)
}

/// Serve until the listener fails.
pub async fn serve(listener: TcpListener, state: Arc<AppState>, cors: CorsLayer) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "listening");
    }
    axum::serve(listener, app(state, cors)).await
}
