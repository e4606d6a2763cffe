//! Moorcheh API client
//!
//! Typed async client for the hosted Moorcheh semantic search service.
//! Covers the namespace, text document upload and similarity search endpoints.

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::MoorchehClient;
pub use config::MoorchehConfig;
pub use error::MoorchehError;
pub use types::{
    CreateNamespaceRequest, Document, NamespaceType, SearchRequest, SearchResponse, SearchResult,
    UploadDocumentsRequest, UploadResponse,
};
