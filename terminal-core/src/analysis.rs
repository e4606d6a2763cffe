//! Market analysis records exchanged with the analysis memory service

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Risk bucket assigned to a market by the suspicion analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
    InsufficientData,
    #[default]
    #[serde(other)]
    Unknown,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
            RiskLevel::InsufficientData => "INSUFFICIENT_DATA",
            RiskLevel::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = std::convert::Infallible;

    /// Unrecognised labels map to `Unknown` rather than failing
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_uppercase().as_str() {
            "LOW" => RiskLevel::Low,
            "MEDIUM" => RiskLevel::Medium,
            "HIGH" => RiskLevel::High,
            "CRITICAL" => RiskLevel::Critical,
            "INSUFFICIENT_DATA" => RiskLevel::InsufficientData,
            _ => RiskLevel::Unknown,
        })
    }
}

/// A single triggered detection signal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    /// Signal type, e.g. "high_vpin" or "volume_spike"
    #[serde(rename = "type", default)]
    pub signal_type: String,
    /// Severity on a 1-5 scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<u8>,
}

/// Result of a suspicion analysis over a market's trade flow
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    /// Suspicion score (0-100)
    #[serde(default)]
    pub suspicion_score: u32,
    #[serde(default)]
    pub risk_level: RiskLevel,
    /// Confidence percentage (0-100)
    #[serde(default)]
    pub confidence: u32,
    #[serde(default)]
    pub signals: Vec<Signal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl AnalysisRecord {
    /// True when no field carries information
    pub fn is_empty(&self) -> bool {
        *self == AnalysisRecord::default()
    }

    /// Types of all triggered signals, in order
    pub fn signal_types(&self) -> Vec<&str> {
        self.signals.iter().map(|s| s.signal_type.as_str()).collect()
    }
}

/// Snapshot of the market an analysis was run against
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Total contracts traded
    #[serde(default)]
    pub volume: Option<u64>,
    #[serde(default)]
    pub status: Option<String>,
    /// Last traded price as a probability (0-1)
    #[serde(default)]
    pub last_price: Option<Decimal>,
}
