//! HTTP API surface.
//!
//! Thin axum handlers over the storage layer: authentication happens in the
//! [`crate::auth::AuthUser`] extractor, ownership scoping in the db queries,
//! and every request flows one direction: auth check, store read/write,
//! serialized response.

pub mod invites;
pub mod responses;
pub mod tasks;

use axum::Router;
use axum::response::Json;
use axum::routing::{get, post};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::auth::TokenIssuer;
use crate::db::Database;
use crate::mail::Mailer;

/// Shared state across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub tokens: Arc<TokenIssuer>,
    pub mailer: Arc<dyn Mailer>,
    /// Public host used when building invitation links.
    pub public_host: String,
}

/// Health check response.
#[derive(serde::Serialize)]
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

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/send-email", post(invites::send_email))
        .route("/tasks", post(tasks::create_task).get(tasks::list_tasks))
        .route("/tasks/{id}", get(tasks::get_task))
        .route("/tasks/{id}/start", post(tasks::start_timer))
        .route("/tasks/{id}/stop", post(tasks::stop_timer))
        .route("/responses", post(responses::create_response))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Serve the API on the given port until the process is stopped.
pub async fn serve(state: AppState, port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "huddle backend listening");

    axum::serve(listener, router(state)).await?;
    Ok(())
}
