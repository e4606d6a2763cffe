//! Analysis memory service
//!
//! Explicitly constructed handle around the Moorcheh client. One instance is
//! shared across all request handlers.

use chrono::{DateTime, Utc};
use terminal_core::{AnalysisRecord, MarketRecord, TerminalError, TerminalResult};
use terminal_moorcheh::{MoorchehClient, MoorchehError, NamespaceType, SearchRequest};
use tokio::sync::OnceCell;
use tracing::{error, info, instrument, warn};

use crate::config::MemoryConfig;
use crate::document::{build_document, similarity_query};
use crate::types::{SimilarAnalysis, StoredAnalysis};

/// Stores analyses in Moorcheh and recalls similar ones
pub struct AnalysisMemory {
    client: MoorchehClient,
    config: MemoryConfig,
    /// Set once the namespace is known to exist
    namespace_ready: OnceCell<()>,
}

impl AnalysisMemory {
    pub fn new(client: MoorchehClient, config: MemoryConfig) -> Self {
        Self {
            client,
            config,
            namespace_ready: OnceCell::new(),
        }
    }

    /// Build from environment variables
    ///
    /// Requires MOORCHEH_API_KEY; fails if it is missing or blank.
    pub fn from_env() -> TerminalResult<Self> {
        let client = MoorchehClient::from_env()?;
        Ok(Self::new(client, MemoryConfig::from_env()))
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    pub fn namespace(&self) -> &str {
        &self.config.namespace
    }

    /// Create the namespace on first use
    ///
    /// Concurrent callers share one creation attempt. "Already exists" counts
    /// as success; other failures leave the namespace unmarked so the next
    /// call tries again.
    async fn ensure_namespace(&self) -> TerminalResult<()> {
        self.namespace_ready
            .get_or_try_init(|| async {
                let namespace = self.namespace();
                match self
                    .client
                    .create_namespace(namespace, NamespaceType::Text)
                    .await
                {
                    Ok(()) => {
                        info!("Created Moorcheh namespace: {}", namespace);
                        Ok(())
                    }
                    Err(MoorchehError::Conflict(_)) => {
                        info!("Moorcheh namespace '{}' already exists", namespace);
                        Ok(())
                    }
                    Err(e) => {
                        warn!("Error creating Moorcheh namespace '{}': {}", namespace, e);
                        Err(TerminalError::from(e))
                    }
                }
            })
            .await
            .map(|_| ())
    }

    /// Store an analysis result
    ///
    /// Errors from Moorcheh are propagated to the caller.
    pub async fn store_analysis(
        &self,
        ticker: &str,
        analysis: &AnalysisRecord,
        market: &MarketRecord,
    ) -> TerminalResult<StoredAnalysis> {
        self.store_analysis_at(ticker, analysis, market, Utc::now())
            .await
    }

    #[instrument(skip(self, analysis, market))]
    pub(crate) async fn store_analysis_at(
        &self,
        ticker: &str,
        analysis: &AnalysisRecord,
        market: &MarketRecord,
        at: DateTime<Utc>,
    ) -> TerminalResult<StoredAnalysis> {
        self.ensure_namespace().await?;

        let document = build_document(ticker, analysis, market, at);
        let memory_id = document.id.clone();

        if let Err(e) = self
            .client
            .upload_documents(self.namespace(), std::slice::from_ref(&document))
            .await
        {
            error!("Moorcheh error storing analysis for {}: {}", ticker, e);
            return Err(e.into());
        }

        info!("Stored analysis in Moorcheh: {} (ID: {})", ticker, memory_id);

        Ok(StoredAnalysis {
            memory_id,
            ticker: ticker.to_string(),
        })
    }

    /// Find past analyses similar to the given one
    ///
    /// Results for `ticker` itself are excluded and at most `limit` entries are
    /// returned. Search failures are logged and yield an empty list.
    #[instrument(skip(self, analysis))]
    pub async fn find_similar_analyses(
        &self,
        ticker: &str,
        analysis: Option<&AnalysisRecord>,
        limit: usize,
    ) -> Vec<SimilarAnalysis> {
        let limit = self.config.clamp_limit(limit);
        if limit == 0 {
            return Vec::new();
        }

        match self.search_similar(ticker, analysis, limit).await {
            Ok(similar) => {
                info!("Found {} similar analyses for {}", similar.len(), ticker);
                similar
            }
            Err(e) => {
                error!("Moorcheh error searching for {}: {}", ticker, e);
                Vec::new()
            }
        }
    }

    async fn search_similar(
        &self,
        ticker: &str,
        analysis: Option<&AnalysisRecord>,
        limit: usize,
    ) -> TerminalResult<Vec<SimilarAnalysis>> {
        self.ensure_namespace().await?;

        // One extra hit leaves room for the self-match that gets filtered out
        let request = SearchRequest {
            query: similarity_query(ticker, analysis),
            namespaces: vec![self.namespace().to_string()],
            top_k: limit + 1,
            threshold: None,
        };

        let response = self.client.search(&request).await?;

        Ok(response
            .results
            .iter()
            .filter(|result| ticker.is_empty() || !result.id.contains(ticker))
            .filter_map(SimilarAnalysis::from_search_result)
            .take(limit)
            .collect())
    }
}
