//! Analysis memory endpoints

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use terminal_core::{AnalysisRecord, MarketRecord};
use terminal_memory::{AnalysisMemory, SimilarAnalysis};
use tracing::{error, info};

use super::ErrorResponse;
use crate::AppState;

/// Create analysis memory routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/store-analysis", post(store_analysis))
        .route("/find-similar", post(find_similar))
}

#[derive(Debug, Deserialize)]
struct StoreAnalysisRequest {
    ticker: String,
    analysis: AnalysisRecord,
    market: MarketRecord,
}

#[derive(Debug, Serialize)]
struct StoreAnalysisResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    memory_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ticker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FindSimilarRequest {
    ticker: String,
    #[serde(default)]
    analysis: Option<AnalysisRecord>,
    #[serde(default)]
    limit: Option<usize>,
}

#[derive(Debug, Serialize)]
struct FindSimilarResponse {
    status: &'static str,
    similar_markets: Vec<SimilarAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn memory_unavailable() -> Response {
    ErrorResponse {
        error: "Moorcheh client not initialized. Check MOORCHEH_API_KEY.".to_string(),
    }
    .respond(StatusCode::SERVICE_UNAVAILABLE)
}

fn require_memory(state: &AppState) -> Result<&AnalysisMemory, Response> {
    state.memory.as_deref().ok_or_else(memory_unavailable)
}

/// Store an analysis result
///
/// Backend failures are reported in the body with `status: "error"`.
async fn store_analysis(
    State(state): State<AppState>,
    Json(request): Json<StoreAnalysisRequest>,
) -> Response {
    let memory = match require_memory(&state) {
        Ok(memory) => memory,
        Err(response) => return response,
    };

    let ticker = request.ticker.trim();
    if ticker.is_empty() {
        return ErrorResponse {
            error: "ticker must not be empty".to_string(),
        }
        .respond(StatusCode::BAD_REQUEST);
    }

    info!("Storing analysis for {}", ticker);

    let response = match memory
        .store_analysis(ticker, &request.analysis, &request.market)
        .await
    {
        Ok(stored) => StoreAnalysisResponse {
            status: "success",
            memory_id: Some(stored.memory_id),
            ticker: Some(stored.ticker),
            error: None,
        },
        Err(e) => {
            error!("Failed to store analysis for {}: {}", ticker, e);
            StoreAnalysisResponse {
                status: "error",
                memory_id: None,
                ticker: None,
                error: Some(e.to_string()),
            }
        }
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Find similar past analyses
async fn find_similar(
    State(state): State<AppState>,
    Json(request): Json<FindSimilarRequest>,
) -> Response {
    let memory = match require_memory(&state) {
        Ok(memory) => memory,
        Err(response) => return response,
    };

    let ticker = request.ticker.trim();
    let limit = request.limit.unwrap_or(memory.config().default_limit);
    info!("Finding up to {} analyses similar to {}", limit, ticker);

    let similar_markets = memory
        .find_similar_analyses(ticker, request.analysis.as_ref(), limit)
        .await;

    (
        StatusCode::OK,
        Json(FindSimilarResponse {
            status: "success",
            similar_markets,
            error: None,
        }),
    )
        .into_response()
}
