use crate::types::{ChatMessage, Citation, Role};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of citations requested per query.
pub const MAX_SOURCES: u32 = 3;

/// One prior turn, in the `{role, content}` shape the service expects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

impl From<&ChatMessage> for HistoryEntry {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role,
            content: msg.text.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    pub chat_history: Vec<HistoryEntry>,
    pub max_sources: u32,
}

impl QueryRequest {
    pub fn new(query: impl Into<String>, chat_history: Vec<HistoryEntry>) -> Self {
        Self {
            query: query.into(),
            chat_history,
            max_sources: MAX_SOURCES,
        }
    }
}

/// Success body of `POST /api/query`.
///
/// Every field is optional and held as raw JSON, so a field of the wrong type never
/// rejects the body; `answer` decides what to make of it.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct QueryResponse {
    pub ai_response: Option<Value>,
    pub sources: Option<Value>,
    pub selected_source: Option<Value>,
    pub source_entity: Option<Value>,
    pub query: Option<Value>,
    pub timestamp: Option<Value>,
}

impl QueryResponse {
    /// Service-side timestamp, when it was sent as text.
    pub fn timestamp_text(&self) -> Option<&str> {
        self.timestamp.as_ref()?.as_str()
    }

    /// Citations in service order. Entries that do not look like a citation are skipped.
    pub fn citations(&self) -> Vec<Citation> {
        match &self.sources {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| serde_json::from_value::<Citation>(item.clone()).ok())
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// `detail` as display text. FastAPI sends a string, validation errors send a list.
    pub fn detail_text(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::String(text) if !text.is_empty() => Some(text.clone()),
            Value::Null => None,
            Value::String(_) => None,
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_in_service_shape() {
        let request = QueryRequest::new(
            "What is IOF?",
            vec![HistoryEntry {
                role: Role::Assistant,
                content: "Hello".into(),
            }],
        );
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "query": "What is IOF?",
                "chat_history": [{"role": "assistant", "content": "Hello"}],
                "max_sources": 3
            })
        );
    }

    #[test]
    fn citations_skip_unusable_entries() {
        let response: QueryResponse = serde_json::from_value(json!({
            "ai_response": "x",
            "sources": [
                {"entity": "NDIS", "score": 0.9, "url": "https://ndis.gov.au", "portfolio": "Social Services"},
                "garbage",
                {"entity": "IOF", "score": "high"}
            ]
        }))
        .unwrap();
        let citations = response.citations();
        assert_eq!(citations.len(), 1);
        assert_eq!(citations[0].entity, "NDIS");
    }

    #[test]
    fn missing_sources_yield_empty_list() {
        let response: QueryResponse = serde_json::from_value(json!({"sources": null})).unwrap();
        assert!(response.citations().is_empty());
    }

    #[test]
    fn wrongly_typed_fields_do_not_reject_the_body() {
        let response: QueryResponse = serde_json::from_str(
            r#"{"ai_response":"NDIS means...","timestamp":1718000000,"query":7,"source_entity":{"name":"NDIS"}}"#,
        )
        .unwrap();
        assert_eq!(response.ai_response, Some(json!("NDIS means...")));
        assert!(response.timestamp_text().is_none());
    }

    #[test]
    fn error_body_detail_text() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail":"Invalid query"}"#).unwrap();
        assert_eq!(body.detail_text().as_deref(), Some("Invalid query"));
        let empty: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(empty.detail_text().is_none());
    }
}
