//! # Roster Server
//!
//! HTTP front end for the Roster user directory. Requests carry the caller's
//! role in the `X-User-Type` header; handlers consult the role hierarchy in
//! `roster-core` before touching the user store.
//!
//! ## Endpoints
//!
//! - `POST /users`: create a user
//! - `GET /users`: list users
//! - `GET /users/{id}`: fetch a user
//! - `DELETE /users/{id}`: delete a user
//! - `PUT /users/roles/{id}`: replace a user's roles
//! - `GET /ping`, `GET /health`: probes

pub mod infra;
pub mod routes;
pub mod users;

use axum::{Json, Router, extract::State, routing::get};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;
use tracing::debug;

pub use infra::app_state::AppState;

/// Build the complete application router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping_handler))
        .route("/health", get(health_handler))
        .merge(routes::create_api_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn ping_handler() -> Json<Value> {
    debug!("Ping endpoint called");
    Json(json!({
        "status": "ok",
        "message": "Roster is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let uptime = chrono::Utc::now() - state.started_at;
    Json(json!({
        "status": "healthy",
        "users": state.users().len(),
        "uptime_seconds": uptime.num_seconds(),
        "started_at": state.started_at.to_rfc3339(),
    }))
}
