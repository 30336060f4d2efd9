//! Observability HTTP Routes
//!
//! Greeting, liveness and store readiness endpoints.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use crate::students::{StudentResult, StudentService};

/// Greeting returned by `GET /`
pub const GREETING: &str = "CosmoCloud Backend assignment";

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Root greeting route
pub fn root_routes() -> Router {
    Router::new().route("/", get(root_handler))
}

/// Liveness and store readiness routes
pub fn health_routes(service: StudentService) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/health/store", get(store_health_handler))
        .with_state(service)
}

async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: GREETING.to_string(),
    })
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

async fn store_health_handler(
    State(service): State<StudentService>,
) -> StudentResult<Json<HealthResponse>> {
    service.ping().await?;
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
