//! Moorcheh REST client

use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::config::MoorchehConfig;
use crate::error::MoorchehError;
use crate::types::{
    CreateNamespaceRequest, Document, NamespaceType, SearchRequest, SearchResponse,
    UploadDocumentsRequest, UploadResponse,
};

#[derive(Clone)]
struct ApiKey(String);

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Moorcheh API client
#[derive(Debug, Clone)]
pub struct MoorchehClient {
    client: Client,
    api_key: ApiKey,
    base_url: String,
}

impl MoorchehClient {
    /// Create a new client from explicit configuration
    pub fn new(config: MoorchehConfig) -> Result<Self, MoorchehError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                MoorchehError::InvalidConfig(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            api_key: ApiKey(config.api_key),
            base_url: config.base_url,
        })
    }

    /// Create a client from MOORCHEH_* environment variables
    pub fn from_env() -> Result<Self, MoorchehError> {
        Self::new(MoorchehConfig::from_env()?)
    }

    /// Create a namespace
    ///
    /// Returns `MoorchehError::Conflict` if the namespace already exists.
    #[instrument(skip(self))]
    pub async fn create_namespace(
        &self,
        namespace: &str,
        namespace_type: NamespaceType,
    ) -> Result<(), MoorchehError> {
        let request = CreateNamespaceRequest {
            namespace_name: namespace.to_string(),
            namespace_type,
            vector_dimension: None,
        };

        self.post("/namespaces", &request).await?;
        debug!("Created namespace {}", namespace);
        Ok(())
    }

    /// Upload text documents into a namespace
    ///
    /// Moorcheh indexes uploads asynchronously, so documents may not be
    /// searchable immediately after this returns.
    #[instrument(skip(self, documents), fields(count = documents.len()))]
    pub async fn upload_documents(
        &self,
        namespace: &str,
        documents: &[Document],
    ) -> Result<UploadResponse, MoorchehError> {
        let path = format!("/namespaces/{}/documents", namespace);
        let response = self
            .post(&path, &UploadDocumentsRequest { documents })
            .await?;

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(UploadResponse::default());
        }

        serde_json::from_str(&body).map_err(|e| {
            MoorchehError::ParseError(format!("Failed to parse upload response: {}", e))
        })
    }

    /// Run a similarity search across one or more namespaces
    #[instrument(skip(self, request), fields(top_k = request.top_k))]
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, MoorchehError> {
        let response = self.post("/search", request).await?;

        let search_response: SearchResponse = response.json().await.map_err(|e| {
            MoorchehError::ParseError(format!("Failed to parse search response: {}", e))
        })?;

        debug!("Search returned {} results", search_response.results.len());
        Ok(search_response)
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, MoorchehError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key.0)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::CONFLICT => MoorchehError::Conflict(message),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                MoorchehError::Unauthorized(message)
            }
            _ => MoorchehError::ApiError {
                status: status.as_u16(),
                message,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> MoorchehClient {
        MoorchehClient::new(MoorchehConfig::new("test-key").with_base_url(server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_create_namespace_sends_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/namespaces"))
            .and(header("x-api-key", "test-key"))
            .and(body_json(json!({"namespace_name": "kalshi-analyses", "type": "text"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"status": "success"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        client
            .create_namespace("kalshi-analyses", NamespaceType::Text)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_namespace_conflict() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/namespaces"))
            .respond_with(ResponseTemplate::new(409).set_body_string("already exists"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let result = client
            .create_namespace("kalshi-analyses", NamespaceType::Text)
            .await;
        match result {
            Err(MoorchehError::Conflict(message)) => assert!(message.contains("already exists")),
            other => panic!("expected Conflict, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let request = SearchRequest {
            query: "q".to_string(),
            namespaces: vec!["ns".to_string()],
            top_k: 3,
            threshold: None,
        };
        let result = client.search(&request).await;
        assert!(matches!(result, Err(MoorchehError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_upload_documents() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/namespaces/kalshi-analyses/documents"))
            .and(body_json(json!({
                "documents": [{"id": "BTC_1", "text": "hello", "ticker": "BTC"}]
            })))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({
                "status": "queued",
                "submitted_ids": ["BTC_1"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut metadata = Map::new();
        metadata.insert("ticker".to_string(), json!("BTC"));
        let documents = vec![Document {
            id: "BTC_1".to_string(),
            text: "hello".to_string(),
            metadata,
        }];

        let client = test_client(&server);
        let response = client
            .upload_documents("kalshi-analyses", &documents)
            .await
            .unwrap();
        assert_eq!(response.status.as_deref(), Some("queued"));
        assert_eq!(response.submitted_ids, vec!["BTC_1"]);
    }

    #[tokio::test]
    async fn test_upload_documents_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/namespaces/ns/documents"))
            .respond_with(ResponseTemplate::new(202))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let response = client.upload_documents("ns", &[]).await.unwrap();
        assert!(response.status.is_none());
        assert!(response.submitted_ids.is_empty());
    }

    #[tokio::test]
    async fn test_search_parses_results() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(body_json(json!({
                "query": "Market with suspicion score 70",
                "namespaces": ["kalshi-analyses"],
                "top_k": 6
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    {"id": "ETH_1", "text": "Market Analysis: ETH", "score": 0.91, "label": "Close Match"},
                    {"id": "SOL_2", "text": "Market Analysis: SOL", "score": 0.55,
                     "metadata": {"ticker": "SOL"}}
                ],
                "execution_time": 0.12
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let request = SearchRequest {
            query: "Market with suspicion score 70".to_string(),
            namespaces: vec!["kalshi-analyses".to_string()],
            top_k: 6,
            threshold: None,
        };
        let response = client.search(&request).await.unwrap();

        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].id, "ETH_1");
        assert_eq!(response.results[0].label.as_deref(), Some("Close Match"));
        assert_eq!(
            response.results[1].metadata.as_ref().unwrap()["ticker"],
            json!("SOL")
        );
    }

    #[tokio::test]
    async fn test_search_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let request = SearchRequest {
            query: "q".to_string(),
            namespaces: vec!["ns".to_string()],
            top_k: 1,
            threshold: None,
        };
        match client.search(&request).await {
            Err(MoorchehError::ApiError { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "internal");
            }
            other => panic!("expected ApiError, got: {:?}", other),
        }
    }
}
