//! 健康检查路由
//!
//! 公共路由 (无需认证)

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

/// 健康检查路由 - 公共路由 (无需认证)
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
}

#[derive(Serialize)]
pub struct IndexResponse {
    message: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    environment: String,
    uptime_seconds: u64,
}

async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Public route, no permission required",
    })
}

async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        uptime_seconds: state.uptime_secs(),
    })
}
