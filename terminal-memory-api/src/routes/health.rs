//! Health check endpoints

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde::Serialize;

use crate::AppState;

const SERVICE_NAME: &str = "moorcheh-analysis-service";

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check handler
///
/// Reflects only whether the Moorcheh client initialized at startup.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    if state.memory.is_some() {
        return (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                service: SERVICE_NAME,
                error: None,
            }),
        );
    }

    let reason = state
        .init_error
        .as_deref()
        .unwrap_or("unknown initialization failure");

    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(HealthResponse {
            status: "unhealthy",
            service: SERVICE_NAME,
            error: Some(format!("Moorcheh client not initialized: {}", reason)),
        }),
    )
}

/// Simple liveness check (always returns OK if server is running)
async fn liveness() -> &'static str {
    "OK"
}

/// Create health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
}
