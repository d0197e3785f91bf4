//! Conversation state and its transitions.
//!
//! Every transition is synchronous. Network calls happen between a `begin_send` and
//! `finish_send` (or around `apply_health`) so callers never hold the state across an
//! await point.

use crate::api::answer::{extract_answer, resolve_citation};
use crate::api::{ApiResult, HistoryEntry, QueryRequest, QueryResponse};
use crate::summary;
use crate::types::{ChatMessage, ConnectionStatus, Overlay};

pub const CONNECTION_ERROR: &str = "Unable to connect to backend service";
pub const SEND_FAILED_REPLY: &str =
    "Sorry, I encountered an error processing your request. Please try again.";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    messages: Vec<ChatMessage>,
    pub input: String,
    connection: ConnectionStatus,
    last_error: Option<String>,
    in_flight: bool,
    overlay: Overlay,
    summary: String,
    generating_summary: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn connection(&self) -> ConnectionStatus {
        self.connection
    }

    pub fn is_connected(&self) -> bool {
        self.connection == ConnectionStatus::Connected
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn generating_summary(&self) -> bool {
        self.generating_summary
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Whether the send control should be enabled.
    pub fn can_send(&self) -> bool {
        self.is_connected() && !self.in_flight && !self.input.trim().is_empty()
    }

    /// Whether the welcome text should be shown in place of the message list.
    pub fn shows_welcome(&self) -> bool {
        self.messages.is_empty() && !self.in_flight
    }

    // ---------------
    // Connectivity
    // ---------------

    pub fn apply_health(&mut self, result: ApiResult<()>) {
        match result {
            Ok(()) => {
                self.connection = ConnectionStatus::Connected;
                self.last_error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "backend unavailable");
                self.connection = ConnectionStatus::Disconnected;
                self.last_error = Some(CONNECTION_ERROR.to_string());
            }
        }
    }

    // ---------------
    // Send message
    // ---------------

    /// Appends the user's message and returns the request to issue.
    ///
    /// Returns `None` and leaves the state untouched when the input is blank or a
    /// request is already outstanding.
    pub fn begin_send(&mut self) -> Option<QueryRequest> {
        let text = self.input.trim();
        if text.is_empty() || self.in_flight {
            return None;
        }
        let text = text.to_string();

        // History is the conversation before this turn.
        let history: Vec<HistoryEntry> = self.messages.iter().map(HistoryEntry::from).collect();

        self.messages.push(ChatMessage::user(text.clone()));
        self.input.clear();
        self.in_flight = true;
        self.last_error = None;

        Some(QueryRequest::new(text, history))
    }

    pub fn finish_send(&mut self, result: ApiResult<QueryResponse>) {
        match result {
            Ok(response) => {
                let text = extract_answer(response.ai_response.as_ref());
                let sources = response.citations();
                let citation = resolve_citation(&response, &sources);
                tracing::debug!(
                    sources = sources.len(),
                    citation = citation.as_ref().map(|c| c.entity.as_str()),
                    "answer received"
                );
                self.messages
                    .push(ChatMessage::assistant(text, sources, citation));
            }
            Err(err) => {
                tracing::warn!(error = %err, "chat request failed");
                self.last_error = Some(err.to_string());
                self.messages
                    .push(ChatMessage::assistant_error(SEND_FAILED_REPLY));
            }
        }
        self.in_flight = false;
    }

    // ---------------
    // Summary
    // ---------------

    pub fn summarize(&mut self) {
        if self.messages.is_empty() {
            self.summary = summary::EMPTY_SUMMARY.to_string();
            self.overlay = Overlay::Summary;
            return;
        }

        self.generating_summary = true;
        self.overlay = Overlay::Summary;
        self.summary = summary::summarize(&self.messages);
        self.generating_summary = false;
    }

    // ---------------
    // Overlays
    // ---------------

    pub fn open_overlay(&mut self, overlay: Overlay) {
        self.overlay = overlay;
    }

    pub fn close_overlay(&mut self) {
        self.overlay = Overlay::None;
    }

    pub fn toggle_settings(&mut self) {
        self.overlay = if self.overlay == Overlay::Settings {
            Overlay::None
        } else {
            Overlay::Settings
        };
    }

    /// Interaction outside the settings menu and header. Only the settings menu reacts.
    pub fn dismiss_settings(&mut self) {
        if self.overlay == Overlay::Settings {
            self.overlay = Overlay::None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::types::Role;

    fn connected() -> SessionState {
        let mut state = SessionState::new();
        state.apply_health(Ok(()));
        state
    }

    #[test]
    fn starts_empty_and_disconnected() {
        let state = SessionState::new();
        assert!(state.messages().is_empty());
        assert_eq!(state.connection(), ConnectionStatus::Disconnected);
        assert_eq!(state.overlay(), Overlay::None);
        assert!(state.shows_welcome());
    }

    #[test]
    fn health_failure_sets_fixed_message() {
        let mut state = connected();
        state.apply_health(Err(ApiError::Status {
            status: 500,
            detail: Some("db down".into()),
        }));
        assert_eq!(state.connection(), ConnectionStatus::Disconnected);
        assert_eq!(state.last_error(), Some(CONNECTION_ERROR));

        state.apply_health(Ok(()));
        assert!(state.is_connected());
        assert!(state.last_error().is_none());
    }

    #[test]
    fn begin_send_uses_prior_turns_only() {
        let mut state = connected();
        state.set_input("  first  ");
        let first = state.begin_send().unwrap();
        assert_eq!(first.query, "first");
        assert!(first.chat_history.is_empty());
        assert_eq!(first.max_sources, 3);
        assert!(state.input.is_empty());
        assert!(state.in_flight());

        state.finish_send(Ok(QueryResponse {
            ai_response: Some("reply".into()),
            ..QueryResponse::default()
        }));

        state.set_input("second");
        let second = state.begin_send().unwrap();
        let roles: Vec<Role> = second.chat_history.iter().map(|h| h.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant]);
        assert_eq!(second.chat_history[0].content, "first");
        assert_eq!(second.chat_history[1].content, "reply");
    }

    #[test]
    fn blank_input_or_in_flight_is_a_no_op() {
        let mut state = connected();
        state.set_input("   \n\t");
        let before = state.clone();
        assert!(state.begin_send().is_none());
        assert_eq!(state, before);

        state.set_input("question");
        state.begin_send().unwrap();
        state.set_input("another");
        let before = state.clone();
        assert!(state.begin_send().is_none());
        assert_eq!(state, before);
    }

    #[test]
    fn settings_dismissal_only_affects_settings() {
        let mut state = SessionState::new();
        state.open_overlay(Overlay::Help);
        state.dismiss_settings();
        assert_eq!(state.overlay(), Overlay::Help);

        state.toggle_settings();
        assert_eq!(state.overlay(), Overlay::Settings);
        state.dismiss_settings();
        assert_eq!(state.overlay(), Overlay::None);

        state.toggle_settings();
        state.toggle_settings();
        assert_eq!(state.overlay(), Overlay::None);
    }

    #[test]
    fn can_send_requires_connection_and_text() {
        let mut state = SessionState::new();
        state.set_input("hi");
        assert!(!state.can_send());
        state.apply_health(Ok(()));
        assert!(state.can_send());
        state.set_input(" ");
        assert!(!state.can_send());
    }
}
