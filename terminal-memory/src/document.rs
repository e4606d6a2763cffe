//! Analysis document format
//!
//! Analyses are stored as a fixed-format block of labelled lines so the
//! semantic index sees readable prose. The same labels are used to recover
//! ticker, score and risk level from search hits that carry no metadata.

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use terminal_core::{AnalysisRecord, MarketRecord, RiskLevel};
use terminal_moorcheh::Document;

pub const TICKER_LABEL: &str = "Market Analysis:";
pub const SCORE_LABEL: &str = "Suspicion Score:";
pub const RISK_LABEL: &str = "Risk Level:";

/// Characters of document text kept in a search snippet
pub const SNIPPET_CHARS: usize = 200;

/// Signal types included in a similarity query
const QUERY_SIGNALS: usize = 3;

/// Metadata keys written alongside each document
pub mod keys {
    pub const TICKER: &str = "ticker";
    pub const SUSPICION_SCORE: &str = "suspicion_score";
    pub const RISK_LEVEL: &str = "risk_level";
    pub const CONFIDENCE: &str = "confidence";
    pub const SIGNALS: &str = "signals";
    pub const ANALYZED_AT: &str = "analyzed_at";
}

/// Fields recovered from a stored document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedAnalysis {
    pub ticker: Option<String>,
    pub score: Option<u32>,
    pub risk_level: Option<RiskLevel>,
}

impl ParsedAnalysis {
    /// Fill any missing field from `fallback`
    pub fn or(self, fallback: ParsedAnalysis) -> ParsedAnalysis {
        ParsedAnalysis {
            ticker: self.ticker.or(fallback.ticker),
            score: self.score.or(fallback.score),
            risk_level: self.risk_level.or(fallback.risk_level),
        }
    }
}

/// Document id for an analysis: `{ticker}_{unix seconds}`
pub fn document_id(ticker: &str, at: DateTime<Utc>) -> String {
    format!("{}_{}", ticker, at.timestamp())
}

/// Render an analysis and its market as the stored text block
pub fn format_analysis_text(ticker: &str, analysis: &AnalysisRecord, market: &MarketRecord) -> String {
    let signals = analysis.signal_types();
    let signals = if signals.is_empty() {
        "None".to_string()
    } else {
        signals.join(", ")
    };

    let price = format_price(market.last_price);

    format!(
        "{TICKER_LABEL} {ticker}\n\
         Title: {title}\n\
         {SCORE_LABEL} {score}/100\n\
         {RISK_LABEL} {risk}\n\
         Confidence: {confidence}%\n\
         \n\
         Signals Triggered: {signals}\n\
         \n\
         Market Context:\n\
         - Category: {category}\n\
         - Volume: {volume}\n\
         - Status: {status}\n\
         - Current Price: {price}%\n\
         \n\
         Summary: {summary}",
        title = market.title.as_deref().unwrap_or("N/A"),
        score = analysis.suspicion_score,
        risk = analysis.risk_level,
        confidence = analysis.confidence,
        category = market.category.as_deref().unwrap_or("N/A"),
        volume = group_thousands(market.volume.unwrap_or(0)),
        status = market.status.as_deref().unwrap_or("N/A"),
        summary = analysis
            .summary
            .as_deref()
            .unwrap_or("No summary available"),
    )
}

/// Structured copy of the fields the search side needs back
pub fn analysis_metadata(ticker: &str, analysis: &AnalysisRecord, at: DateTime<Utc>) -> Map<String, Value> {
    let mut metadata = Map::new();
    metadata.insert(keys::TICKER.to_string(), Value::from(ticker));
    metadata.insert(
        keys::SUSPICION_SCORE.to_string(),
        Value::from(analysis.suspicion_score),
    );
    metadata.insert(
        keys::RISK_LEVEL.to_string(),
        Value::from(analysis.risk_level.as_str()),
    );
    metadata.insert(keys::CONFIDENCE.to_string(), Value::from(analysis.confidence));
    metadata.insert(
        keys::SIGNALS.to_string(),
        Value::from(analysis.signal_types()),
    );
    metadata.insert(
        keys::ANALYZED_AT.to_string(),
        Value::from(at.to_rfc3339_opts(SecondsFormat::Secs, true)),
    );
    metadata
}

/// Build the document uploaded for one analysis
pub fn build_document(
    ticker: &str,
    analysis: &AnalysisRecord,
    market: &MarketRecord,
    at: DateTime<Utc>,
) -> Document {
    Document {
        id: document_id(ticker, at),
        text: format_analysis_text(ticker, analysis, market),
        metadata: analysis_metadata(ticker, analysis, at),
    }
}

/// Recover ticker, score and risk level from document text
///
/// The first line carrying each label wins. Missing or malformed values are
/// left as `None`.
pub fn parse_analysis_text(text: &str) -> ParsedAnalysis {
    let mut parsed = ParsedAnalysis::default();

    for line in text.lines() {
        if let Some(rest) = after_label(line, TICKER_LABEL) {
            if parsed.ticker.is_none() && !rest.is_empty() {
                parsed.ticker = Some(rest.to_string());
            }
        } else if let Some(rest) = after_label(line, SCORE_LABEL) {
            if parsed.score.is_none() {
                parsed.score = rest.split('/').next().and_then(|s| s.trim().parse().ok());
            }
        } else if let Some(rest) = after_label(line, RISK_LABEL) {
            if parsed.risk_level.is_none() && !rest.is_empty() {
                parsed.risk_level = rest.parse().ok();
            }
        }
    }

    parsed
}

/// Read the structured fields back out of search-result metadata
pub fn parse_metadata(metadata: &Map<String, Value>) -> ParsedAnalysis {
    ParsedAnalysis {
        ticker: metadata
            .get(keys::TICKER)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string),
        score: metadata
            .get(keys::SUSPICION_SCORE)
            .and_then(Value::as_u64)
            .and_then(|s| u32::try_from(s).ok()),
        risk_level: metadata
            .get(keys::RISK_LEVEL)
            .and_then(Value::as_str)
            .and_then(|r| r.parse().ok()),
    }
}

/// Truncate document text for display
pub fn snippet(text: &str) -> String {
    match text.char_indices().nth(SNIPPET_CHARS) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

/// Natural-language query used to find analyses like this one
pub fn similarity_query(ticker: &str, analysis: Option<&AnalysisRecord>) -> String {
    match analysis.filter(|a| !a.is_empty()) {
        Some(analysis) => {
            let signals = analysis.signal_types();
            let signals = if signals.is_empty() {
                "none".to_string()
            } else {
                signals
                    .into_iter()
                    .take(QUERY_SIGNALS)
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            format!(
                "Market with suspicion score {}, risk level {}, signals: {}",
                analysis.suspicion_score, analysis.risk_level, signals
            )
        }
        None => format!("Market analysis {} prediction trading", ticker),
    }
}

/// Render a 0-1 price as a percentage rounded to one decimal place
///
/// Prices too large to scale render as "N/A".
fn format_price(last_price: Option<Decimal>) -> String {
    match last_price {
        None => "0.0".to_string(),
        Some(p) => p
            .checked_mul(Decimal::ONE_HUNDRED)
            .map(|pct| format!("{:.1}", pct.round_dp(1)))
            .unwrap_or_else(|| "N/A".to_string()),
    }
}

fn after_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    line.split_once(label).map(|(_, rest)| rest.trim())
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
