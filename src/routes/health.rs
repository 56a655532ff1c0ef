//! Health check and discovery endpoints

use axum::{routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::APP_VERSION;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: Endpoints,
}

#[derive(Serialize)]
pub struct Endpoints {
    pub upload: &'static str,
    pub ask: &'static str,
    pub health: &'static str,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: APP_VERSION,
        timestamp: Utc::now(),
    })
}

pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the AI Document Q&A Service",
        version: APP_VERSION,
        endpoints: Endpoints {
            upload: "POST /documents",
            ask: "POST /ask",
            health: "GET /health",
        },
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health_check))
}
