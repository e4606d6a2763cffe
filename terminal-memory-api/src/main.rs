//! Moorcheh Analysis Service
//!
//! HTTP API that stores market suspicion analyses in Moorcheh and recalls
//! similar past analyses.

mod routes;

use std::net::SocketAddr;
use std::sync::Arc;
use terminal_memory::AnalysisMemory;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Analysis memory (None when the Moorcheh client failed to initialize)
    pub memory: Option<Arc<AnalysisMemory>>,
    /// Why initialization failed, reported by the health check
    pub init_error: Option<String>,
}

impl AppState {
    pub fn with_memory(memory: AnalysisMemory) -> Self {
        Self {
            memory: Some(Arc::new(memory)),
            init_error: None,
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            memory: None,
            init_error: Some(reason.into()),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if the file doesn't exist
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("info,terminal_memory=debug,terminal_memory_api=debug")
        }))
        .init();

    info!("Starting Moorcheh Analysis Service");

    // Data endpoints answer 503 if the client can't be built
    let state = match AnalysisMemory::from_env() {
        Ok(memory) => {
            info!(
                "Moorcheh client initialized (namespace: {})",
                memory.namespace()
            );
            AppState::with_memory(memory)
        }
        Err(e) => {
            warn!("Failed to initialize Moorcheh client: {}", e);
            AppState::unavailable(e.to_string())
        }
    };

    let app = routes::app(state);

    // Start server
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
