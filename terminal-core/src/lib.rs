//! Core types for the Prediction Market Terminal
//!
//! This crate defines the shared data structures used by the analysis memory
//! service: suspicion analyses, the market snapshot they were computed on, and
//! the terminal-wide error type.

pub mod analysis;
pub mod error;

pub use analysis::{AnalysisRecord, MarketRecord, RiskLevel, Signal};
pub use error::{TerminalError, TerminalResult};
