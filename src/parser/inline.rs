//! Inline formatting: bold, italic, code, and link spans.
//!
//! Formatting runs four independent substitution passes over a line, in a
//! fixed order: bold, italic, inline code, links. Each pass replaces its
//! matches with placeholder tokens and records the corresponding span; the
//! residue is then split back into literal and span pieces in left-to-right
//! order. Unmatched markers are left in the output as literal text.

use regex::{Captures, Regex};

use crate::model::InlineSpan;

/// Formats a line of text into an ordered sequence of inline spans.
pub struct InlineFormatter {
    bold: Regex,
    italic: Regex,
    code: Regex,
    link: Regex,
    placeholder: Regex,
}

impl InlineFormatter {
    /// Create a formatter with the four pass patterns compiled.
    pub fn new() -> Self {
        Self {
            bold: Regex::new(r"\*\*(.*?)\*\*").unwrap(),
            italic: Regex::new(r"\*(.*?)\*").unwrap(),
            code: Regex::new(r"`([^`]+)`").unwrap(),
            link: Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap(),
            placeholder: Regex::new("\u{0}(\\d+)\u{0}").unwrap(),
        }
    }

    /// Format a line into ordered inline spans.
    pub fn format(&self, text: &str) -> Vec<InlineSpan> {
        let mut spans: Vec<InlineSpan> = Vec::new();

        let text = substitute(&self.bold, text, &mut spans, |caps| {
            InlineSpan::bold(&caps[1])
        });
        let text = substitute(&self.italic, &text, &mut spans, |caps| {
            InlineSpan::italic(&caps[1])
        });
        let text = substitute(&self.code, &text, &mut spans, |caps| {
            InlineSpan::code(&caps[1])
        });
        let text = substitute(&self.link, &text, &mut spans, |caps| {
            InlineSpan::link(&caps[1], &caps[2])
        });

        // Split the residue back into literal and span pieces, preserving
        // source order.
        let mut out = Vec::new();
        let mut last = 0;
        for found in self.placeholder.find_iter(&text) {
            if found.start() > last {
                out.push(InlineSpan::text(&text[last..found.start()]));
            }
            let index: Option<usize> = found.as_str().trim_matches('\u{0}').parse().ok();
            match index.and_then(|i| spans.get(i)) {
                Some(span) => out.push(span.clone()),
                None => out.push(InlineSpan::text(found.as_str())),
            }
            last = found.end();
        }
        if last < text.len() {
            out.push(InlineSpan::text(&text[last..]));
        }

        out
    }
}

impl Default for InlineFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace every match of `re` with a placeholder token, recording the span
/// built from its captures.
fn substitute(
    re: &Regex,
    input: &str,
    spans: &mut Vec<InlineSpan>,
    make: impl Fn(&Captures) -> InlineSpan,
) -> String {
    re.replace_all(input, |caps: &Captures| {
        spans.push(make(caps));
        format!("\u{0}{}\u{0}", spans.len() - 1)
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(text: &str) -> Vec<InlineSpan> {
        InlineFormatter::new().format(text)
    }

    #[test]
    fn test_plain_text_passes_through() {
        let spans = format("just some text");
        assert_eq!(spans, vec![InlineSpan::text("just some text")]);
    }

    #[test]
    fn test_all_four_passes_in_order() {
        let spans = format("**bold** and *italic* and `code` and [x](http://y))");
        assert_eq!(
            spans,
            vec![
                InlineSpan::bold("bold"),
                InlineSpan::text(" and "),
                InlineSpan::italic("italic"),
                InlineSpan::text(" and "),
                InlineSpan::code("code"),
                InlineSpan::text(" and "),
                InlineSpan::link("x", "http://y"),
                InlineSpan::text(")"),
            ]
        );
    }

    #[test]
    fn test_bold_consumed_before_italic() {
        let spans = format("**strong** *soft*");
        assert_eq!(
            spans,
            vec![
                InlineSpan::bold("strong"),
                InlineSpan::text(" "),
                InlineSpan::italic("soft"),
            ]
        );
    }

    #[test]
    fn test_internal_link() {
        let spans = format("[setup](/docs/setup)");
        assert_eq!(
            spans,
            vec![InlineSpan::Link {
                text: "setup".to_string(),
                href: "/docs/setup".to_string(),
                external: false,
            }]
        );
    }

    #[test]
    fn test_unterminated_markers_stay_literal() {
        // A lone opener matches nothing; the pass is a no-op for it.
        let spans = format("`open and [text](unclosed");
        assert_eq!(spans, vec![InlineSpan::text("`open and [text](unclosed")]);
    }

    #[test]
    fn test_empty_input() {
        assert!(format("").is_empty());
    }

    #[test]
    fn test_multiple_matches_single_pass() {
        let spans = format("`a` then `b`");
        assert_eq!(
            spans,
            vec![
                InlineSpan::code("a"),
                InlineSpan::text(" then "),
                InlineSpan::code("b"),
            ]
        );
    }
}
