//! Analysis memory for the Prediction Market Terminal
//!
//! Persists suspicion analyses as text documents in a Moorcheh namespace and
//! recalls semantically similar past analyses for a market.
//!
//! ## Features
//! - Fixed-format analysis documents with structured metadata attached
//! - Label-based recovery of ticker, score and risk level from document text
//! - Lazy, race-free namespace bootstrap
//! - Similarity search with self-match exclusion

pub mod config;
pub mod document;
pub mod service;
pub mod types;

pub use config::MemoryConfig;
pub use service::AnalysisMemory;
pub use types::{SimilarAnalysis, StoredAnalysis};
