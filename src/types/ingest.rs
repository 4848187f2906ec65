use serde::{Deserialize, Serialize};

/// Request body for `POST /ingest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestParams {
    /// The repository to fetch and index, e.g. a GitHub URL.
    pub url: String,
}

impl IngestParams {
    /// Create ingest parameters for the given repository.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Success body for `POST /ingest`.
///
/// `files_processed` is the contract; the remaining fields are extra detail
/// some backend versions send and are tolerated when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestResponse {
    /// Number of files fetched and indexed.
    pub files_processed: u64,

    /// Backend status string, e.g. "completed".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// The repository the backend ingested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,

    /// Number of chunks written to the vector store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunks_stored: Option<u64>,
}

impl IngestResponse {
    /// Create a response carrying only the processed-file count.
    pub fn new(files_processed: u64) -> Self {
        Self {
            files_processed,
            status: None,
            repo: None,
            chunks_stored: None,
        }
    }
}
