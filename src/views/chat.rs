use crate::session::SessionState;
use crate::types::{ChatMessage, Citation, Role};
use crate::ui::{ServiceHandle, check_connection, send_message};
use crate::views::shared::{format_message_time, markdown_to_html};
use dioxus::events::Key;
use dioxus::prelude::*;

const INPUT_PLACEHOLDER: &str = "Type your message...";

#[component]
pub fn ChatView(session: Signal<SessionState>) -> Element {
    let service = use_context::<ServiceHandle>();
    let mut session = session;

    let state = session.read();
    let last_error = state.last_error().map(str::to_string);
    let shows_welcome = state.shows_welcome();
    let in_flight = state.in_flight();
    let connected = state.is_connected();
    let can_send = state.can_send();
    let input = state.input.clone();
    let messages = state.messages().to_vec();
    drop(state);

    let retry_service = service.clone();
    let key_service = service.clone();
    let click_service = service;

    rsx! {
        div { class: "chat-body",
            div { class: "chat-messages",
                if let Some(error) = last_error {
                    div { class: "error-message",
                        strong { "Connection Error: " }
                        "{error}"
                        button {
                            class: "btn btn-secondary",
                            style: "margin-left: 1rem;",
                            onclick: move |_| check_connection(session, retry_service.clone()),
                            "Retry"
                        }
                    }
                }
                if shows_welcome {
                    WelcomeMessage {}
                }
                for (i, msg) in messages.into_iter().enumerate() {
                    MessageBubble { key: "{i}", message: msg }
                }
                if in_flight {
                    TypingIndicator {}
                }
            }

            div { class: "action-buttons",
                button {
                    class: "btn btn-action",
                    onclick: move |_| session.with_mut(|state| state.summarize()),
                    "Summary"
                }
            }

            div { class: "input-area",
                form {
                    class: "input-container",
                    onsubmit: move |ev| ev.prevent_default(),
                    textarea {
                        class: "chat-input",
                        rows: "1",
                        placeholder: INPUT_PLACEHOLDER,
                        value: "{input}",
                        disabled: in_flight || !connected,
                        oninput: move |ev| session.with_mut(|state| state.set_input(ev.value())),
                        onkeydown: move |ev| {
                            if ev.key() == Key::Enter && !ev.modifiers().shift() {
                                ev.prevent_default();
                                send_message(session, key_service.clone());
                            }
                        },
                    }
                    button {
                        class: "btn btn-primary btn-send",
                        r#type: "button",
                        disabled: !can_send,
                        onclick: move |_| send_message(session, click_service.clone()),
                        "Send"
                    }
                }
            }
        }
    }
}

#[component]
fn WelcomeMessage() -> Element {
    rsx! {
        div { class: "welcome-message",
            p { "Hello! I am the Gov Terms AI assistant." }
            p { "Start a conversation! Ask me anything about government terms." }
        }
    }
}

#[component]
fn TypingIndicator() -> Element {
    rsx! {
        div { class: "message assistant",
            div { class: "message-bubble assistant",
                div { class: "typing-indicator",
                    div { class: "typing-dot" }
                    div { class: "typing-dot" }
                    div { class: "typing-dot" }
                }
            }
        }
    }
}

#[component]
fn MessageBubble(message: ChatMessage) -> Element {
    let is_user = message.role == Role::User;
    let side = if is_user { "user" } else { "assistant" };
    let bubble_class = if message.is_error {
        format!("message-bubble {side} error")
    } else {
        format!("message-bubble {side}")
    };
    let time = if is_user {
        None
    } else {
        format_message_time(message.timestamp)
    };
    let citation = message.visible_citation().cloned();
    let content_html = markdown_to_html(&message.text);

    rsx! {
        div { class: "message {side}",
            div { class: "{bubble_class}",
                div { class: "message-content",
                    if is_user {
                        "{message.text}"
                    } else {
                        div { class: "md", dangerous_inner_html: "{content_html}" }
                    }
                }
                if let Some(time) = time {
                    div { class: "message-time", "{time}" }
                }
                if !is_user && !message.is_error {
                    CopyButton { content: message.text.clone() }
                }
                if let Some(citation) = citation {
                    SourceCard { citation }
                }
            }
        }
    }
}

#[component]
fn SourceCard(citation: Citation) -> Element {
    let relevance = citation.relevance_percent();
    rsx! {
        div { class: "message-sources",
            div { class: "sources-title", strong { "Source:" } }
            div { class: "source-item",
                div { class: "source-term", strong { "{citation.entity}" } }
                if let Some(url) = citation.url.clone() {
                    div { class: "source-url",
                        a { href: "{url}", target: "_blank", rel: "noopener noreferrer", "Source Link" }
                    }
                }
                if let Some(portfolio) = citation.portfolio.clone() {
                    div { class: "source-portfolio", "Portfolio: {portfolio}" }
                }
                div { class: "source-score", "Relevance: {relevance}" }
            }
        }
    }
}

#[component]
fn CopyButton(content: String) -> Element {
    let on_copy = move |_| {
        let raw = content.clone();
        spawn(async move {
            #[cfg(any(feature = "desktop", feature = "mobile"))]
            {
                if let Ok(mut cb) = arboard::Clipboard::new() {
                    let _ = cb.set_text(raw);
                }
            }
            #[cfg(not(any(feature = "desktop", feature = "mobile")))]
            let _ = raw;
        });
    };
    rsx! {
        div { class: "bubble-controls",
            button { class: "action-btn", title: "Copy answer", onclick: on_copy, "Copy" }
        }
    }
}
