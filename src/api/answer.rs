//! Interpretation of a query response for display.

use super::wire::QueryResponse;
use crate::types::Citation;
use serde_json::Value;

/// Shown when the service answers with something that carries no usable text.
pub const FALLBACK_ANSWER: &str =
    "Sorry, I received an unexpected response format. Please try again.";

/// Display text for `ai_response`.
///
/// Strings are used verbatim. Objects fall back to an embedded `msg` or `message` string.
/// Anything else yields [`FALLBACK_ANSWER`].
pub fn extract_answer(ai_response: Option<&Value>) -> String {
    match ai_response {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Object(fields)) => ["msg", "message"]
            .iter()
            .find_map(|key| match fields.get(*key) {
                Some(Value::String(text)) if !text.is_empty() => Some(text.clone()),
                _ => None,
            })
            .unwrap_or_else(|| FALLBACK_ANSWER.to_string()),
        _ => FALLBACK_ANSWER.to_string(),
    }
}

/// Entity the service says its answer is based on, if it named one.
fn named_entity(response: &QueryResponse) -> Option<&str> {
    if let Some(entity) = response.source_entity.as_ref().and_then(Value::as_str)
        && !entity.is_empty()
    {
        return Some(entity);
    }
    match response.ai_response.as_ref()? {
        Value::Object(fields) => fields
            .get("source_entity")
            .and_then(Value::as_str)
            .filter(|entity| !entity.is_empty()),
        _ => None,
    }
}

/// Picks the single citation to show with an answer.
///
/// A named source entity that matches one of `citations` wins. Otherwise the
/// service's `selected_source` is used as-is.
pub fn resolve_citation(response: &QueryResponse, citations: &[Citation]) -> Option<Citation> {
    if let Some(entity) = named_entity(response)
        && let Some(found) = citations.iter().find(|c| c.entity == entity)
    {
        return Some(found.clone());
    }

    let selected = response.selected_source.as_ref()?;
    if !selected.is_object() {
        return None;
    }
    serde_json::from_value::<Citation>(selected.clone()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: Value) -> QueryResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn string_answer_is_verbatim() {
        assert_eq!(
            extract_answer(Some(&json!("NDIS means..."))),
            "NDIS means..."
        );
    }

    #[test]
    fn object_answer_uses_message_fields() {
        assert_eq!(extract_answer(Some(&json!({"message": "X"}))), "X");
        assert_eq!(extract_answer(Some(&json!({"msg": "Y", "message": "X"}))), "Y");
        assert_eq!(extract_answer(Some(&json!({"other": 1}))), FALLBACK_ANSWER);
    }

    #[test]
    fn missing_or_odd_answer_falls_back() {
        assert_eq!(extract_answer(None), FALLBACK_ANSWER);
        assert_eq!(extract_answer(Some(&json!(42))), FALLBACK_ANSWER);
        assert_eq!(extract_answer(Some(&Value::Null)), FALLBACK_ANSWER);
    }

    #[test]
    fn entity_match_beats_selected_source() {
        let resp = response(json!({
            "ai_response": "answer",
            "source_entity": "Department of Social Services",
            "sources": [
                {"entity": "NDIS", "score": 0.9},
                {"entity": "Department of Social Services", "score": 0.7}
            ],
            "selected_source": {"entity": "NDIS", "score": 0.9}
        }));
        let citations = resp.citations();
        let chosen = resolve_citation(&resp, &citations).unwrap();
        assert_eq!(chosen.entity, "Department of Social Services");
    }

    #[test]
    fn entity_inside_object_answer_is_honoured() {
        let resp = response(json!({
            "ai_response": {"message": "m", "source_entity": "IOF"},
            "sources": [{"entity": "IOF", "score": 0.5}]
        }));
        let citations = resp.citations();
        assert_eq!(resolve_citation(&resp, &citations).unwrap().entity, "IOF");
    }

    #[test]
    fn unmatched_entity_falls_back_to_selected_source() {
        let resp = response(json!({
            "ai_response": "answer",
            "source_entity": "Unknown",
            "sources": [{"entity": "NDIS", "score": 0.9}],
            "selected_source": {"entity": "FaHCSIA", "score": 0.4}
        }));
        let citations = resp.citations();
        assert_eq!(resolve_citation(&resp, &citations).unwrap().entity, "FaHCSIA");
    }

    #[test]
    fn non_text_entity_is_ignored() {
        let resp = response(json!({
            "ai_response": "answer",
            "source_entity": {"entity": "NDIS"},
            "sources": [{"entity": "NDIS", "score": 0.9}],
            "selected_source": {"entity": "IOF", "score": 0.4}
        }));
        let citations = resp.citations();
        assert_eq!(resolve_citation(&resp, &citations).unwrap().entity, "IOF");
    }

    #[test]
    fn nothing_resolves_without_entity_or_selection() {
        let resp = response(json!({
            "ai_response": "NDIS means...",
            "sources": [{"entity": "NDIS", "score": 0.9}],
            "selected_source": null
        }));
        let citations = resp.citations();
        assert!(resolve_citation(&resp, &citations).is_none());
    }
}
