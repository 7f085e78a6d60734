//! Inline span types.

use serde::{Deserialize, Serialize};

/// A styled or linked fragment within a line of text.
///
/// Spans are ordered; concatenating their plain text reconstructs the
/// display form of the line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineSpan {
    /// Unstyled text
    Text {
        /// The literal text
        text: String,
    },

    /// Bold text (`**...**`)
    Bold {
        /// The emphasized text
        text: String,
    },

    /// Italic text (`*...*`)
    Italic {
        /// The emphasized text
        text: String,
    },

    /// Inline code (`` `...` ``)
    Code {
        /// The code text
        text: String,
    },

    /// A hyperlink (`[text](href)`)
    Link {
        /// Link display text
        text: String,
        /// Link target
        href: String,
        /// Whether the target leaves the site (href begins with `http`);
        /// external links open in a new context with no referrer passed
        external: bool,
    },
}

impl InlineSpan {
    /// Create a plain text span.
    pub fn text(text: impl Into<String>) -> Self {
        InlineSpan::Text { text: text.into() }
    }

    /// Create a bold span.
    pub fn bold(text: impl Into<String>) -> Self {
        InlineSpan::Bold { text: text.into() }
    }

    /// Create an italic span.
    pub fn italic(text: impl Into<String>) -> Self {
        InlineSpan::Italic { text: text.into() }
    }

    /// Create an inline code span.
    pub fn code(text: impl Into<String>) -> Self {
        InlineSpan::Code { text: text.into() }
    }

    /// Create a link span, classifying the target as internal or external.
    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        let href = href.into();
        let external = href.starts_with("http");
        InlineSpan::Link {
            text: text.into(),
            href,
            external,
        }
    }

    /// Get the display text of this span.
    pub fn plain_text(&self) -> &str {
        match self {
            InlineSpan::Text { text }
            | InlineSpan::Bold { text }
            | InlineSpan::Italic { text }
            | InlineSpan::Code { text }
            | InlineSpan::Link { text, .. } => text,
        }
    }

    /// Check if this span is plain text.
    pub fn is_text(&self) -> bool {
        matches!(self, InlineSpan::Text { .. })
    }
}

/// An ordered sequence of inline spans making up one displayed line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Spans in display order
    pub spans: Vec<InlineSpan>,
}

impl Line {
    /// Create a line from spans.
    pub fn new(spans: Vec<InlineSpan>) -> Self {
        Self { spans }
    }

    /// Create a line holding a single plain-text span.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            spans: vec![InlineSpan::text(text)],
        }
    }

    /// Reconstruct the display text of the line.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(InlineSpan::plain_text).collect()
    }

    /// Check if the line has no spans.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_classification() {
        let external = InlineSpan::link("docs", "https://example.com/docs");
        assert!(matches!(external, InlineSpan::Link { external: true, .. }));

        let internal = InlineSpan::link("docs", "/docs/setup");
        assert!(matches!(internal, InlineSpan::Link { external: false, .. }));
    }

    #[test]
    fn test_line_plain_text() {
        let line = Line::new(vec![
            InlineSpan::text("see "),
            InlineSpan::bold("this"),
            InlineSpan::text(" now"),
        ]);
        assert_eq!(line.plain_text(), "see this now");
    }

    #[test]
    fn test_empty_line() {
        assert!(Line::default().is_empty());
        assert_eq!(Line::default().plain_text(), "");
    }

    #[test]
    fn test_span_serialization_is_tagged() {
        let json = serde_json::to_value(InlineSpan::bold("hi")).unwrap();
        assert_eq!(json["type"], "bold");
        assert_eq!(json["text"], "hi");

        let link = serde_json::to_value(InlineSpan::link("x", "http://y")).unwrap();
        assert_eq!(link["type"], "link");
        assert_eq!(link["external"], true);
    }
}
