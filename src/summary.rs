//! Local conversation summary. No network involved.

use crate::types::{ChatMessage, Role};

pub const EMPTY_SUMMARY: &str =
    "No conversation to summarize yet. Start chatting to generate a summary!";

const TOPIC_LIMIT: usize = 100;
const KEY_POINT_MIN: usize = 50;
const KEY_POINT_LIMIT: usize = 150;
const KEY_POINT_COUNT: usize = 3;

/// First `limit` characters of `text`.
fn prefix(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

fn latest_topic(messages: &[ChatMessage]) -> String {
    let last = messages
        .iter()
        .rev()
        .find(|msg| msg.role == Role::User)
        .map(|msg| msg.text.as_str())
        .unwrap_or("");
    if last.chars().count() > TOPIC_LIMIT {
        format!("{}...", prefix(last, TOPIC_LIMIT))
    } else {
        last.to_string()
    }
}

fn key_points(messages: &[ChatMessage]) -> Vec<String> {
    let long_answers: Vec<&ChatMessage> = messages
        .iter()
        .filter(|msg| msg.role == Role::Assistant && msg.text.chars().count() > KEY_POINT_MIN)
        .collect();
    let start = long_answers.len().saturating_sub(KEY_POINT_COUNT);
    long_answers[start..]
        .iter()
        .enumerate()
        .map(|(i, msg)| format!("{}. {}...", i + 1, prefix(&msg.text, KEY_POINT_LIMIT)))
        .collect()
}

/// Markdown summary of `messages`, or [`EMPTY_SUMMARY`] when there is nothing yet.
pub fn summarize(messages: &[ChatMessage]) -> String {
    if messages.is_empty() {
        return EMPTY_SUMMARY.to_string();
    }

    let total = messages.len();
    let questions = messages.iter().filter(|msg| msg.role == Role::User).count();

    format!(
        "**Conversation Summary**\n\n\
         **Messages:** {total} total ({questions} questions asked)\n\n\
         **Latest Topic:** {topic}\n\n\
         **Key Points Discussed:**\n\
         {points}\n\n\
         This conversation focused on Australian government terminology and definitions.",
        topic = latest_topic(messages),
        points = key_points(messages).join("\n"),
    )
}
