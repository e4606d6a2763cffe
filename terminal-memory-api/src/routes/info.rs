//! Service descriptor

use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};

use crate::AppState;

async fn root() -> Json<Value> {
    Json(json!({
        "service": "Moorcheh Analysis Service",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "GET /health",
            "store_analysis": "POST /store-analysis",
            "find_similar": "POST /find-similar"
        }
    }))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(root))
}
