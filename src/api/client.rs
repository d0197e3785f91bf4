use super::wire::{ErrorBody, QueryRequest, QueryResponse};
use super::{ApiError, ApiResult, QueryService};
use async_trait::async_trait;
use reqwest::Client;

const QUERY_PATH: &str = "/api/query";
const HEALTH_PATH: &str = "/health";

/// Query service reached over HTTP.
pub struct HttpQueryService {
    client: Client,
    base_url: String,
}

impl HttpQueryService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl QueryService for HttpQueryService {
    async fn health(&self) -> ApiResult<()> {
        let url = self.url(HEALTH_PATH);
        let response = match self
            .client
            .get(&url)
            .header("content-type", "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(%url, error = %err, "backend availability check failed");
                return Err(ApiError::from(err));
            }
        };

        let status = response.status();
        if status.is_success() {
            tracing::info!(base_url = %self.base_url, "backend connected");
            Ok(())
        } else {
            tracing::info!(base_url = %self.base_url, %status, "backend unavailable");
            Err(ApiError::Status {
                status: status.as_u16(),
                detail: None,
            })
        }
    }

    async fn query(&self, request: &QueryRequest) -> ApiResult<QueryResponse> {
        tracing::debug!(
            query = %request.query,
            history = request.chat_history.len(),
            "sending query"
        );
        let response = self
            .client
            .post(self.url(QUERY_PATH))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|parsed| parsed.detail_text());
            tracing::warn!(%status, ?detail, "query failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        let parsed = serde_json::from_str::<QueryResponse>(&body)?;
        tracing::debug!(
            sources = parsed.citations().len(),
            selected = parsed.selected_source.is_some(),
            "query answered"
        );
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::HttpQueryService;

    #[test]
    fn trailing_slash_is_trimmed() {
        let service = HttpQueryService::new("http://localhost:8000/");
        assert_eq!(service.base_url(), "http://localhost:8000");
        assert_eq!(service.url("/health"), "http://localhost:8000/health");
    }
}
