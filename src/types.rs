use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Reply the query service gives when a term is missing from its knowledge base.
/// Citations are never shown next to it.
pub const TERM_NOT_DEFINED: &str =
    "I apologize, but the term you're asking about is not defined in the knowledge I currently have.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A source reference attached to an assistant answer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Citation {
    pub entity: String,
    pub url: Option<String>,
    pub portfolio: Option<String>,
    pub score: f64,
    pub text: Option<String>,
}

impl Citation {
    /// Relevance score as a percentage with one decimal, e.g. `87.5%`.
    pub fn relevance_percent(&self) -> String {
        format!("{:.1}%", self.score * 100.0)
    }
}

/// One conversation turn.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    pub timestamp: OffsetDateTime,
    pub sources: Vec<Citation>,
    pub citation: Option<Citation>,
    pub is_error: bool,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            timestamp: OffsetDateTime::now_utc(),
            sources: Vec::new(),
            citation: None,
            is_error: false,
        }
    }

    pub fn assistant(
        text: impl Into<String>,
        sources: Vec<Citation>,
        citation: Option<Citation>,
    ) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            timestamp: OffsetDateTime::now_utc(),
            sources,
            citation,
            is_error: false,
        }
    }

    pub fn assistant_error(text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::assistant(text, Vec::new(), None)
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// The citation to render under this message, if any.
    pub fn visible_citation(&self) -> Option<&Citation> {
        if self.is_user() || self.is_error || self.text.trim() == TERM_NOT_DEFINED {
            return None;
        }
        self.citation.as_ref()
    }

    pub fn timestamp_iso(&self) -> String {
        self.timestamp
            .format(&Rfc3339)
            .unwrap_or_else(|_| self.timestamp.to_string())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    #[default]
    Disconnected,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Overlay {
    #[default]
    None,
    About,
    Help,
    Settings,
    Summary,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontStep {
    Increase,
    Decrease,
}

impl FontSize {
    const ORDER: [FontSize; 3] = [FontSize::Small, FontSize::Medium, FontSize::Large];

    pub fn as_str(self) -> &'static str {
        match self {
            FontSize::Small => "small",
            FontSize::Medium => "medium",
            FontSize::Large => "large",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "small" => Some(FontSize::Small),
            "medium" => Some(FontSize::Medium),
            "large" => Some(FontSize::Large),
            _ => None,
        }
    }

    /// Moves one size up or down, clamping at either end.
    pub fn step(self, step: FontStep) -> Self {
        let index = Self::ORDER.iter().position(|size| *size == self).unwrap_or(1);
        let next = match step {
            FontStep::Increase => (index + 1).min(Self::ORDER.len() - 1),
            FontStep::Decrease => index.saturating_sub(1),
        };
        Self::ORDER[next]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_size_clamps_at_both_ends() {
        let mut size = FontSize::Small;
        for _ in 0..3 {
            size = size.step(FontStep::Increase);
        }
        assert_eq!(size, FontSize::Large);
        assert_eq!(FontSize::Large.step(FontStep::Increase), FontSize::Large);
        assert_eq!(FontSize::Small.step(FontStep::Decrease), FontSize::Small);
        assert_eq!(FontSize::Large.step(FontStep::Decrease), FontSize::Medium);
    }

    #[test]
    fn font_size_parses_storage_values() {
        assert_eq!(FontSize::parse("large"), Some(FontSize::Large));
        assert_eq!(FontSize::parse("huge"), None);
        assert_eq!(FontSize::Small.as_str(), "small");
    }

    #[test]
    fn citation_hidden_for_errors_and_not_defined_reply() {
        let citation = Citation {
            entity: "NDIS".into(),
            score: 0.875,
            ..Citation::default()
        };
        let ok = ChatMessage::assistant("NDIS means...", vec![], Some(citation.clone()));
        assert_eq!(ok.visible_citation(), Some(&citation));
        assert_eq!(citation.relevance_percent(), "87.5%");

        let not_defined = ChatMessage::assistant(TERM_NOT_DEFINED, vec![], Some(citation));
        assert!(not_defined.visible_citation().is_none());

        let error = ChatMessage::assistant_error("boom");
        assert!(error.visible_citation().is_none());
        assert!(error.is_error);
    }

    #[test]
    fn timestamp_formats_as_rfc3339() {
        let msg = ChatMessage::user("hi");
        let iso = msg.timestamp_iso();
        assert!(iso.ends_with('Z'), "{iso}");
        assert!(iso.contains('T'));
    }

    #[test]
    fn citation_deserializes_with_missing_fields() {
        let citation: Citation = serde_json::from_str(r#"{"entity":"IOF"}"#).unwrap();
        assert_eq!(citation.entity, "IOF");
        assert_eq!(citation.score, 0.0);
        assert!(citation.url.is_none());
    }
}
