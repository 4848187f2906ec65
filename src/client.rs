//! HTTP client for the RAG backend.
//!
//! [`RagClient`] speaks the backend's three-endpoint contract: `DELETE
//! /delete` purges ingested state, `POST /ingest` fetches and indexes a
//! repository, and `POST /chat` answers one question grounded by a trimmed
//! history window. The [`Backend`] trait is the seam between the session
//! controller and the wire; tests substitute scripted implementations.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response};
use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};
use crate::observability::{
    CHAT_ERRORS, CHAT_REQUESTS, INGEST_ERRORS, INGEST_REQUESTS, PURGE_ERRORS, PURGE_REQUESTS,
};
use crate::types::{ChatParams, ChatResponse, ChatTurn, IngestParams, IngestResponse};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8004/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// The backend operations the session controller sequences.
///
/// `RagClient` is the production implementation; tests use scripted doubles.
/// Implementations must convert every transport or decode fault into
/// [`Error`] — nothing may panic or propagate a raw fault past this boundary.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Best-effort idempotent purge of backend-side ingested state.
    ///
    /// Callers treat any failure as non-fatal.
    async fn reset(&self) -> Result<()>;

    /// Fetch and index a repository.
    ///
    /// A rejected repository surfaces as [`Error::Validation`] carrying the
    /// backend's reason; an unreachable backend surfaces as a connectivity
    /// error.
    async fn ingest(&self, repository: &str) -> Result<IngestResponse>;

    /// Answer one question grounded by the trimmed history window.
    async fn chat(&self, question: &str, history: &[ChatTurn]) -> Result<ChatResponse>;
}

/// HTTP client for the RAG backend.
#[derive(Debug, Clone)]
pub struct RagClient {
    client: ReqwestClient,
    base_url: Url,
    timeout: Duration,
}

impl RagClient {
    /// Create a client against the default local backend address.
    pub fn new() -> Result<Self> {
        Self::with_options(None, None)
    }

    /// Create a client with a custom base URL and timeout.
    pub fn with_options(base_url: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let base_url = Url::parse(&base_url)
            .map_err(|e| Error::url(format!("invalid backend base URL: {e}"), Some(e)))?;

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// The backend address this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::url(format!("invalid endpoint path {path:?}: {e}"), Some(e)))
    }

    /// Create and return default headers for backend requests.
    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    fn map_transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::timeout(
                format!("Request timed out: {}", e),
                Some(self.timeout.as_secs_f64()),
            )
        } else if e.is_connect() {
            Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
        } else {
            Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
        }
    }

    /// Convert a non-success backend response into our Error type.
    async fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();

        // The backend reports rejections as {"detail": "<reason>"}.
        #[derive(Deserialize)]
        struct ErrorBody {
            detail: Option<String>,
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };

        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.detail);

        match detail {
            Some(detail) => Error::validation(detail),
            None => Error::api(
                status_code,
                format!("backend request failed with status {status_code}"),
            ),
        }
    }
}

#[async_trait]
impl Backend for RagClient {
    async fn reset(&self) -> Result<()> {
        let url = self.endpoint("delete")?;
        PURGE_REQUESTS.click();

        let response = self
            .client
            .delete(url)
            .headers(self.default_headers())
            .send()
            .await
            .map_err(|e| {
                PURGE_ERRORS.click();
                self.map_transport_error(e)
            })?;

        if !response.status().is_success() {
            PURGE_ERRORS.click();
            return Err(Self::process_error_response(response).await);
        }

        // Response body is ignored by contract.
        Ok(())
    }

    async fn ingest(&self, repository: &str) -> Result<IngestResponse> {
        let url = self.endpoint("ingest")?;
        INGEST_REQUESTS.click();

        let response = self
            .client
            .post(url)
            .headers(self.default_headers())
            .json(&IngestParams::new(repository))
            .send()
            .await
            .map_err(|e| {
                INGEST_ERRORS.click();
                self.map_transport_error(e)
            })?;

        if !response.status().is_success() {
            INGEST_ERRORS.click();
            return Err(Self::process_error_response(response).await);
        }

        response.json::<IngestResponse>().await.map_err(|e| {
            INGEST_ERRORS.click();
            Error::serialization(
                format!("Failed to parse ingest response: {}", e),
                Some(Box::new(e)),
            )
        })
    }

    async fn chat(&self, question: &str, history: &[ChatTurn]) -> Result<ChatResponse> {
        let url = self.endpoint("chat")?;
        CHAT_REQUESTS.click();

        let response = self
            .client
            .post(url)
            .headers(self.default_headers())
            .json(&ChatParams::new(question, history.to_vec()))
            .send()
            .await
            .map_err(|e| {
                CHAT_ERRORS.click();
                self.map_transport_error(e)
            })?;

        if !response.status().is_success() {
            CHAT_ERRORS.click();
            return Err(Self::process_error_response(response).await);
        }

        response.json::<ChatResponse>().await.map_err(|e| {
            CHAT_ERRORS.click();
            Error::serialization(
                format!("Failed to parse chat response: {}", e),
                Some(Box::new(e)),
            )
        })
    }
}
