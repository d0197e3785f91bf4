use crate::api::{HttpQueryService, QueryService};
use crate::config::Config;
use crate::preferences::{Preferences, default_store};
use crate::session::SessionState;
use crate::theme::{BASE_CSS, root_font_px, theme_definition};
use crate::types::Overlay;
use crate::views::{AboutPanel, ChatView, HelpPanel, PreferencesMenu, SummaryModal};
use dioxus::prelude::*;
use std::sync::Arc;

const FALLBACK_BASE_URL: &str = "http://localhost:8000";

/// Query service shared with every component through context.
#[derive(Clone)]
pub struct ServiceHandle(pub Arc<dyn QueryService>);

impl ServiceHandle {
    fn from_env() -> Self {
        let base_url = match Config::from_env() {
            Ok(config) => config.base_url,
            Err(err) => {
                tracing::error!(error = %err, "no query service configured, using {FALLBACK_BASE_URL}");
                FALLBACK_BASE_URL.to_string()
            }
        };
        Self(Arc::new(HttpQueryService::new(base_url)))
    }
}

// ---------------
// Intents
// ---------------

pub(crate) fn check_connection(mut session: Signal<SessionState>, service: ServiceHandle) {
    spawn(async move {
        let result = service.0.health().await;
        session.with_mut(|state| state.apply_health(result));
    });
}

pub(crate) fn send_message(mut session: Signal<SessionState>, service: ServiceHandle) {
    let Some(request) = session.with_mut(|state| state.begin_send()) else {
        return;
    };
    spawn(async move {
        let result = service.0.query(&request).await;
        session.with_mut(|state| state.finish_send(result));
    });
}

// ---------------
// Components
// ---------------

#[component]
pub fn App() -> Element {
    let service = use_context_provider(ServiceHandle::from_env);
    let session = use_signal(SessionState::new);
    let preferences = use_signal(|| Preferences::load(default_store()));

    use_hook(move || check_connection(session, service.clone()));

    let dark_mode = preferences.read().dark_mode();
    let theme = theme_definition(dark_mode);
    let overlay = session.read().overlay();

    rsx! {
        ThemeStyles { preferences }
        div { class: "{theme.root_class}",
            div { class: "chat-widget",
                ChatHeader { session }
                ChatView { session }
                ChatFooter {}
            }
            {match overlay {
                Overlay::About => rsx! {
                    Panel { session, title: "About Gov Terms AI", AboutPanel {} }
                },
                Overlay::Help => rsx! {
                    Panel { session, title: "Help & Tips", HelpPanel {} }
                },
                Overlay::Summary => rsx! { SummaryModal { session } },
                Overlay::Settings => rsx! {
                    div {
                        class: "menu-backdrop",
                        onmousedown: move |_| {
                            let mut session = session;
                            session.with_mut(|state| state.dismiss_settings());
                        },
                    }
                    PreferencesMenu { preferences }
                },
                Overlay::None => rsx! {},
            }}
        }
    }
}

#[component]
fn ThemeStyles(preferences: Signal<Preferences>) -> Element {
    let prefs = preferences.read();
    let root_style = format!(
        ":root {{ font-size: {}px; }}",
        root_font_px(prefs.font_size())
    );
    let definition = theme_definition(prefs.dark_mode());
    rsx! {
        style { dangerous_inner_html: "{BASE_CSS}" }
        style { dangerous_inner_html: "{root_style}" }
        style { dangerous_inner_html: "{definition.css}" }
    }
}

#[component]
fn ChatHeader(session: Signal<SessionState>) -> Element {
    let mut session = session;
    let connected = session.read().is_connected();
    let (indicator_class, indicator_title) = if connected {
        ("status-indicator connected", "Connected")
    } else {
        ("status-indicator", "Disconnected")
    };
    rsx! {
        div { class: "chat-header",
            div { class: "header-title",
                h1 { "Gov Terms AI" }
            }
            div { class: "header-actions",
                div { class: "connection-status",
                    div { class: indicator_class, title: indicator_title }
                }
                button {
                    class: "btn btn-icon",
                    title: "About",
                    onclick: move |_| session.with_mut(|state| state.open_overlay(Overlay::About)),
                    "About"
                }
                button {
                    class: "btn btn-icon",
                    title: "Help",
                    onclick: move |_| session.with_mut(|state| state.open_overlay(Overlay::Help)),
                    "Help"
                }
                button {
                    class: "btn btn-icon",
                    title: "Accessibility",
                    onclick: move |_| session.with_mut(|state| state.toggle_settings()),
                    "Aa"
                }
            }
        }
    }
}

#[component]
fn ChatFooter() -> Element {
    rsx! {
        div { class: "chat-footer",
            div { class: "disclaimer",
                span { class: "disclaimer-text",
                    "AI Disclaimer: This is an AI-powered chatbot and may make mistakes. The definitions and information provided here are not official definitions. For authoritative and official definitions, please visit the relevant government agency's website."
                }
            }
        }
    }
}

#[component]
fn Panel(session: Signal<SessionState>, title: &'static str, children: Element) -> Element {
    let mut session = session;
    rsx! {
        div {
            class: "panel-overlay",
            onclick: move |_| session.with_mut(|state| state.close_overlay()),
        }
        div { class: "panel open",
            div { class: "panel-header",
                h2 { class: "panel-title", "{title}" }
                button {
                    class: "btn btn-icon",
                    onclick: move |_| session.with_mut(|state| state.close_overlay()),
                    "Close"
                }
            }
            div { class: "panel-content", {children} }
        }
    }
}
