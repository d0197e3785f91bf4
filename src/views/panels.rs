use crate::session::SessionState;
use crate::views::shared::markdown_to_html;
use dioxus::prelude::*;

#[component]
pub fn AboutPanel() -> Element {
    rsx! {
        div {
            h3 { "Gov Terms AI" }
            p {
                "Gov Terms AI explains Australian government terms, abbreviations and jargon. "
                "Answers are generated from a curated glossary and cite the source they are based on."
            }
            h3 { "Sources" }
            p {
                "Each answer shows the glossary entry it drew on, with its portfolio, a link to the "
                "authoritative source where one exists, and a relevance score."
            }
        }
    }
}

#[component]
pub fn HelpPanel() -> Element {
    rsx! {
        div {
            h3 { "How to Use" }
            ul {
                li { "Type your question about government terms" }
                li { "Ask for explanations of abbreviations" }
                li { "Request definitions of government jargon" }
            }
            h3 { "Example Questions" }
            ul {
                li { "\"What does NDIS stand for?\"" }
                li { "\"What is IOF\"" }
                li { "\"What is FaHCSIA?\"" }
            }
            h3 { "Features" }
            ul {
                li { strong { "Summary:" } " Get a summary of your conversation" }
                li { strong { "Sources:" } " See which documents were referenced" }
            }
        }
    }
}

#[component]
pub fn SummaryModal(session: Signal<SessionState>) -> Element {
    let mut session = session;
    let state = session.read();
    let generating = state.generating_summary();
    let summary_html = markdown_to_html(state.summary());
    drop(state);

    rsx! {
        div {
            class: "panel-overlay",
            onclick: move |_| session.with_mut(|state| state.close_overlay()),
        }
        div { class: "modal",
            div { class: "panel-header",
                h2 { class: "panel-title", "Conversation Summary" }
                button {
                    class: "btn btn-icon",
                    onclick: move |_| session.with_mut(|state| state.close_overlay()),
                    "Close"
                }
            }
            if generating {
                div { class: "loading",
                    div { class: "spinner" }
                    span { "Generating summary..." }
                }
            } else {
                div { class: "summary-markdown", dangerous_inner_html: "{summary_html}" }
            }
        }
    }
}
