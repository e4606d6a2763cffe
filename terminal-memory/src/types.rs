//! Analysis memory result types

use serde::{Deserialize, Serialize};
use terminal_core::RiskLevel;
use terminal_moorcheh::SearchResult;

use crate::document::{parse_analysis_text, parse_metadata, snippet, ParsedAnalysis};

/// Receipt for an analysis written to memory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAnalysis {
    /// Moorcheh document id
    pub memory_id: String,
    pub ticker: String,
}

/// A past analysis similar to the one being queried
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarAnalysis {
    pub ticker: String,
    /// Suspicion score of the past analysis
    pub score: u32,
    pub risk_level: RiskLevel,
    /// Similarity to the query (0.0 - 1.0)
    pub similarity: f64,
    /// Leading excerpt of the stored document
    pub text: String,
}

impl SimilarAnalysis {
    /// Build from a search hit, preferring stored metadata over the text labels
    ///
    /// Returns `None` when no ticker can be recovered.
    pub fn from_search_result(result: &SearchResult) -> Option<Self> {
        let from_metadata = result
            .metadata
            .as_ref()
            .map(parse_metadata)
            .unwrap_or_default();
        let ParsedAnalysis {
            ticker,
            score,
            risk_level,
        } = from_metadata.or(parse_analysis_text(&result.text));

        Some(Self {
            ticker: ticker?,
            score: score.unwrap_or(0),
            risk_level: risk_level.unwrap_or_default(),
            similarity: result.score,
            text: snippet(&result.text),
        })
    }
}
