use crate::api::QueryService;
use crate::preferences::Preferences;
use crate::session::SessionState;
use crate::types::{FontStep, Overlay};
use std::sync::Arc;

/// Drives a [`SessionState`] against a query service and a set of preferences.
///
/// The Dioxus front-end performs the same begin/await/finish sequence on its own
/// signal; this type is the headless form of it.
pub struct Controller {
    service: Arc<dyn QueryService>,
    state: SessionState,
    preferences: Preferences,
}

impl Controller {
    pub fn new(service: Arc<dyn QueryService>, preferences: Preferences) -> Self {
        Self {
            service,
            state: SessionState::new(),
            preferences,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.state.set_input(input);
    }

    /// Session start and manual retry.
    pub async fn check_connection(&mut self) {
        let result = self.service.health().await;
        self.state.apply_health(result);
    }

    /// Sends the current input. Returns `false` when the send was refused by its guards.
    pub async fn send_message(&mut self) -> bool {
        let Some(request) = self.state.begin_send() else {
            return false;
        };
        let result = self.service.query(&request).await;
        self.state.finish_send(result);
        true
    }

    pub fn summarize(&mut self) {
        self.state.summarize();
    }

    pub fn open_overlay(&mut self, overlay: Overlay) {
        self.state.open_overlay(overlay);
    }

    pub fn close_overlay(&mut self) {
        self.state.close_overlay();
    }

    pub fn toggle_settings(&mut self) {
        self.state.toggle_settings();
    }

    pub fn dismiss_settings(&mut self) {
        self.state.dismiss_settings();
    }

    pub fn toggle_dark_mode(&mut self) {
        self.preferences.toggle_dark_mode();
    }

    pub fn step_font_size(&mut self, step: FontStep) {
        self.preferences.step_font_size(step);
    }
}
