//! Liveness responder
//!
//! A minimal HTTP surface answering the hosting platform's health probes
//! with fixed bodies. It shares nothing with the dispatcher: in polling
//! mode it is served from its own task so a busy update loop never delays
//! a probe; in webhook mode its routes are merged into the webhook server.

use std::net::SocketAddr;

use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use tracing::info;

use crate::utils::errors::Result;

/// Health and status routes with a fixed not-found fallback.
pub fn health_router() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .fallback(not_found)
}

async fn health() -> Json<Value> {
    Json(json!({"status": "OK", "message": "Bot is running"}))
}

async fn index() -> Json<Value> {
    Json(json!({
        "message": format!("{} is running", crate::info()),
        "status": "active",
        "endpoints": {
            "health": "/health",
            "webhook": "/webhook"
        }
    }))
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({"status": "Not Found"})))
}

/// Serve the health router until the process exits. Used in polling mode
/// only; webhook mode merges `health_router` into the webhook server.
pub async fn serve_health(addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Liveness responder listening on {addr}");
    axum::serve(listener, health_router()).await?;
    Ok(())
}
