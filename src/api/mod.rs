/// Query service module for Gov Terms AI
///
/// The remote service answers a natural-language question with an answer and a ranked
/// list of source citations. It also exposes a health probe.
///
/// # Architecture
///
/// - `client` - `HttpQueryService`, the reqwest-backed implementation
/// - `wire` - JSON request/response shapes
/// - `answer` - turning a response into display text and a display citation
///
/// # Usage
///
/// ```rust,no_run
/// use govterms::api::{HttpQueryService, QueryRequest, QueryService};
///
/// # async fn example() -> Result<(), govterms::api::ApiError> {
/// let service = HttpQueryService::new("http://localhost:8000");
/// service.health().await?;
/// let _response = service.query(&QueryRequest::new("What is NDIS?", vec![])).await?;
/// # Ok(())
/// # }
/// ```
pub mod answer;
mod client;
pub mod wire;

use async_trait::async_trait;

pub use client::HttpQueryService;
pub use wire::{HistoryEntry, MAX_SOURCES, QueryRequest, QueryResponse};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Transport(String),

    #[error("{}", status_message(.status, .detail))]
    Status { status: u16, detail: Option<String> },

    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl ApiError {
    /// Transport failures and non-success statuses; everything the banner reports.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::Status { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Malformed(err.to_string())
    }
}

fn status_message(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => detail.clone(),
        None => format!("HTTP error! status: {status}"),
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[async_trait]
pub trait QueryService: Send + Sync {
    /// Single availability probe. `Ok` means the service answered with a success status.
    async fn health(&self) -> ApiResult<()>;

    async fn query(&self, request: &QueryRequest) -> ApiResult<QueryResponse>;
}
