//! Block-level document types.

use serde::{Deserialize, Serialize};

use super::{Line, Table};

/// One rendered unit of document structure.
///
/// Blocks preserve the order of the source lines they were produced from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A heading, level 1-4
    Heading {
        /// Heading level (1 = largest)
        level: u8,
        /// Heading text, never inline-formatted
        text: String,
    },

    /// A fenced code block
    Code(CodeBlock),

    /// A blockquote
    Quote(Blockquote),

    /// An unordered list
    BulletList(List),

    /// An ordered list
    NumberedList(List),

    /// A table with a header row and body rows
    Table(Table),

    /// A horizontal rule
    Rule,

    /// A paragraph of inline-formatted text
    Paragraph(Line),
}

impl Block {
    /// Create a heading block.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level,
            text: text.into(),
        }
    }

    /// Check if this block is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Heading { .. })
    }

    /// Check if this block is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, Block::Paragraph(_))
    }

    /// Check if this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }

    /// Get the plain text carried by this block, if any.
    ///
    /// Rules produce an empty string; list items and quote lines are
    /// newline-joined.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { text, .. } => text.clone(),
            Block::Code(code) => code.content.clone(),
            Block::Quote(quote) => quote.plain_text(),
            Block::BulletList(list) | Block::NumberedList(list) => list.items.join("\n"),
            Block::Table(table) => table.plain_text(),
            Block::Rule => String::new(),
            Block::Paragraph(line) => line.plain_text(),
        }
    }
}

/// A fenced code block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// Language tag from the opening fence, `"text"` if none was given
    pub language: String,

    /// Verbatim code content, without the fences
    pub content: String,
}

impl CodeBlock {
    /// Create a code block, defaulting the language tag to `"text"`.
    pub fn new(language: &str, content: impl Into<String>) -> Self {
        let language = language.trim();
        Self {
            language: if language.is_empty() {
                "text".to_string()
            } else {
                language.to_string()
            },
            content: content.into(),
        }
    }
}

/// A blockquote: a sequence of independently formatted lines.
///
/// Each line is displayed as its own paragraph inside the quote. Blank
/// source lines inside the quote become empty lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blockquote {
    /// Quoted lines in source order
    pub lines: Vec<Line>,
}

impl Blockquote {
    /// Create a blockquote from formatted lines.
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    /// Get the newline-joined plain text of the quote.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(Line::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A list of raw item texts.
///
/// Item text is stored raw; inline formatting is applied by the consumer
/// when the list is displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    /// Item texts in source order
    pub items: Vec<String>,
}

impl List {
    /// Create a list from item texts.
    pub fn new(items: Vec<String>) -> Self {
        Self { items }
    }

    /// Get the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_block_default_language() {
        let code = CodeBlock::new("", "let x = 1;");
        assert_eq!(code.language, "text");

        let code = CodeBlock::new(" js ", "let x = 1;");
        assert_eq!(code.language, "js");
    }

    #[test]
    fn test_block_predicates() {
        let heading = Block::heading(1, "Title");
        assert!(heading.is_heading());
        assert!(!heading.is_paragraph());
    }

    #[test]
    fn test_block_plain_text() {
        let list = Block::BulletList(List::new(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(list.plain_text(), "a\nb");
        assert_eq!(Block::Rule.plain_text(), "");
    }
}
