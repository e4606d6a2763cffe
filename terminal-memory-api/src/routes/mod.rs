//! API route definitions

mod health;
mod info;
mod memory;

use axum::{
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Error body for requests that can't be served
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl ErrorResponse {
    fn respond(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Create all routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(info::routes())
        .merge(health::routes())
        .merge(memory::routes())
}

/// Build the full application with middleware
pub fn app(state: AppState) -> Router {
    // The terminal backend and frontend call from other origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    api_routes()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use terminal_memory::{AnalysisMemory, MemoryConfig};
    use terminal_moorcheh::{MoorchehClient, MoorchehConfig};
    use tower::ServiceExt;
    use wiremock::MockServer;

    use crate::AppState;

    pub fn state_for(server: &MockServer) -> AppState {
        let client =
            MoorchehClient::new(MoorchehConfig::new("test-key").with_base_url(server.uri()))
                .unwrap();
        AppState::with_memory(AnalysisMemory::new(client, MemoryConfig::default()))
    }

    pub async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        send(app, Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(
        app: Router,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(app, request).await
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }
}
