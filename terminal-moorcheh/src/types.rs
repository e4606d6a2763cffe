//! Moorcheh API request/response types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of data a namespace holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamespaceType {
    Text,
    Vector,
}

#[derive(Debug, Serialize)]
pub struct CreateNamespaceRequest {
    pub namespace_name: String,
    #[serde(rename = "type")]
    pub namespace_type: NamespaceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector_dimension: Option<usize>,
}

/// A text document to index
///
/// Extra fields are stored by Moorcheh as document metadata and echoed back
/// in search results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub id: String,
    pub text: String,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct UploadDocumentsRequest<'a> {
    pub documents: &'a [Document],
}

#[derive(Debug, Default, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub submitted_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub namespaces: Vec<String>,
    pub top_k: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
    #[serde(default)]
    pub execution_time: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub text: String,
    /// Similarity of this document to the query (0.0 - 1.0)
    #[serde(default, alias = "similarity")]
    pub score: f64,
    /// Moorcheh relevance label, e.g. "Close Match"
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}
