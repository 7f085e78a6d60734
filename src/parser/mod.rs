//! Markdown parsing into display blocks.
//!
//! The renderer is a single forward pass over the document's lines. At each
//! line the first matching rule wins, in a fixed order: front matter,
//! headings, fenced code, blockquotes, unordered lists, ordered lists,
//! tables, horizontal rules, then the paragraph fallback. Malformed syntax
//! never fails; it degrades to the most specific matching fallback.

mod front_matter;
mod inline;

pub use front_matter::{extract_front_matter, FrontMatter};
pub use inline::InlineFormatter;

use regex::Regex;

use crate::model::{Block, Blockquote, CodeBlock, InlineSpan, Line, List, Table};

/// Render a markdown document into an ordered sequence of blocks.
///
/// Pure function of its input; repeated calls on identical input yield
/// structurally equal output.
///
/// # Example
///
/// ```
/// use cues::{render, Block};
///
/// let blocks = render("# Title\n\nBody text");
/// assert_eq!(blocks.len(), 2);
/// assert!(matches!(blocks[0], Block::Heading { level: 1, .. }));
/// ```
pub fn render(content: &str) -> Vec<Block> {
    Parser::new().parse(content)
}

/// Format a single line of text into ordered inline spans.
///
/// Applied by consumers to text stored raw in the model (list items, table
/// cells) when it is displayed.
pub fn format_inline(text: &str) -> Vec<InlineSpan> {
    InlineFormatter::new().format(text)
}

struct Parser {
    ordered_item: Regex,
    formatter: InlineFormatter,
}

impl Parser {
    fn new() -> Self {
        Self {
            ordered_item: Regex::new(r"^\d+\. ").unwrap(),
            formatter: InlineFormatter::new(),
        }
    }

    fn parse(&self, content: &str) -> Vec<Block> {
        let lines: Vec<&str> = content.split('\n').collect();
        let mut blocks = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i];
            let trimmed = line.trim();

            // Front matter. Fires wherever a paired `---` span is
            // encountered during the scan, not only at document start; an
            // unpaired `---` falls through to the horizontal-rule arm.
            if trimmed == "---" {
                if let Some(offset) = lines[i + 1..].iter().position(|l| l.trim() == "---") {
                    i += offset + 2;
                    continue;
                }
            }

            if let Some((level, text)) = heading_of(line) {
                blocks.push(Block::heading(level, text));
            } else if let Some(tag) = line.strip_prefix("```") {
                // Verbatim until the closing fence; an unterminated fence
                // swallows the rest of the document.
                let mut code = Vec::new();
                i += 1;
                while i < lines.len() && !lines[i].starts_with("```") {
                    code.push(lines[i]);
                    i += 1;
                }
                blocks.push(Block::Code(CodeBlock::new(tag, code.join("\n"))));
            } else if line.starts_with("> ") {
                let mut quote = Vec::new();
                let mut j = i;
                while j < lines.len()
                    && (lines[j].starts_with("> ") || lines[j].trim().is_empty())
                {
                    match lines[j].strip_prefix("> ") {
                        Some(rest) => quote.push(Line::new(self.formatter.format(rest))),
                        None => quote.push(Line::default()),
                    }
                    j += 1;
                }
                blocks.push(Block::Quote(Blockquote::new(quote)));
                i = j - 1;
            } else if line.starts_with("- ") || line.starts_with("* ") {
                let (items, j) = scan_list(&lines, i, |l| {
                    l.strip_prefix("- ")
                        .or_else(|| l.strip_prefix("* "))
                        .map(str::to_string)
                });
                blocks.push(Block::BulletList(List::new(items)));
                i = j - 1;
            } else if self.ordered_item.is_match(line) {
                let (items, j) = scan_list(&lines, i, |l| {
                    if self.ordered_item.is_match(l) {
                        Some(self.ordered_item.replace(l, "").into_owned())
                    } else {
                        None
                    }
                });
                blocks.push(Block::NumberedList(List::new(items)));
                i = j - 1;
            } else if trimmed.starts_with('|') && trimmed.ends_with('|') {
                let mut rows: Vec<Vec<String>> = Vec::new();
                let mut j = i;
                while j < lines.len()
                    && lines[j].contains('|')
                    && lines[j].trim().starts_with('|')
                {
                    // Any row containing `---` is the header separator.
                    if !lines[j].contains("---") {
                        rows.push(split_cells(lines[j]));
                    }
                    j += 1;
                }
                if !rows.is_empty() {
                    let header = rows.remove(0);
                    blocks.push(Block::Table(Table::new(header, rows)));
                }
                i = j - 1;
            } else if trimmed == "---" || trimmed == "***" {
                blocks.push(Block::Rule);
            } else if !trimmed.is_empty() {
                let mut para = vec![line];
                let mut j = i + 1;
                while j < lines.len() && continues_paragraph(&self.ordered_item, lines[j]) {
                    para.push(lines[j]);
                    j += 1;
                }
                blocks.push(Block::Paragraph(Line::new(
                    self.formatter.format(&para.join(" ")),
                )));
                i = j - 1;
            }

            i += 1;
        }

        blocks
    }
}

/// Scan a list run starting at `start`. Blank lines continue the run
/// without producing items; the run ends at the first line that is neither
/// blank nor a list line.
fn scan_list(
    lines: &[&str],
    start: usize,
    item_of: impl Fn(&str) -> Option<String>,
) -> (Vec<String>, usize) {
    let mut items = Vec::new();
    let mut j = start;
    while j < lines.len() {
        if let Some(item) = item_of(lines[j]) {
            items.push(item);
        } else if !lines[j].trim().is_empty() {
            break;
        }
        j += 1;
    }
    (items, j)
}

/// Match a heading marker, longest prefix first.
fn heading_of(line: &str) -> Option<(u8, &str)> {
    for (marker, level) in [("#### ", 4u8), ("### ", 3), ("## ", 2), ("# ", 1)] {
        if let Some(text) = line.strip_prefix(marker) {
            return Some((level, text));
        }
    }
    None
}

/// Split a table row into trimmed cells, dropping the splits outside the
/// outer pipes.
fn split_cells(row: &str) -> Vec<String> {
    let parts: Vec<&str> = row.split('|').collect();
    if parts.len() <= 2 {
        return Vec::new();
    }
    parts[1..parts.len() - 1]
        .iter()
        .map(|cell| cell.trim().to_string())
        .collect()
}

/// A paragraph keeps absorbing lines while they are non-blank and do not
/// themselves open another block kind.
fn continues_paragraph(ordered_item: &Regex, line: &str) -> bool {
    !line.trim().is_empty()
        && !line.starts_with('#')
        && !line.starts_with("```")
        && !line.starts_with("- ")
        && !line.starts_with("* ")
        && !ordered_item.is_match(line)
        && !line.starts_with("> ")
        && !line.contains('|')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_by_level() {
        let blocks = render("# one\n## two\n### three\n#### four");
        assert_eq!(
            blocks,
            vec![
                Block::heading(1, "one"),
                Block::heading(2, "two"),
                Block::heading(3, "three"),
                Block::heading(4, "four"),
            ]
        );
    }

    #[test]
    fn test_hash_without_space_is_paragraph() {
        let blocks = render("#tag");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].plain_text(), "#tag");
        assert!(blocks[0].is_paragraph());
    }

    #[test]
    fn test_code_block_language_default() {
        let blocks = render("```\nraw\n```");
        assert_eq!(
            blocks,
            vec![Block::Code(CodeBlock::new("", "raw"))]
        );
        match &blocks[0] {
            Block::Code(code) => assert_eq!(code.language, "text"),
            other => panic!("expected code block, got {:?}", other),
        }
    }

    #[test]
    fn test_code_block_keeps_blank_lines() {
        let blocks = render("```rs\nlet a = 1;\n\nlet b = 2;\n```");
        match &blocks[0] {
            Block::Code(code) => assert_eq!(code.content, "let a = 1;\n\nlet b = 2;"),
            other => panic!("expected code block, got {:?}", other),
        }
    }

    #[test]
    fn test_unterminated_fence_swallows_rest() {
        let blocks = render("```js\nconst x = 1;\nstill code");
        assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            Block::Code(code) => {
                assert_eq!(code.language, "js");
                assert_eq!(code.content, "const x = 1;\nstill code");
            }
            other => panic!("expected code block, got {:?}", other),
        }
    }

    #[test]
    fn test_blockquote_blank_line_becomes_empty_line() {
        let blocks = render("> first\n\n> second");
        match &blocks[0] {
            Block::Quote(quote) => {
                assert_eq!(quote.lines.len(), 3);
                assert_eq!(quote.lines[0].plain_text(), "first");
                assert!(quote.lines[1].is_empty());
                assert_eq!(quote.lines[2].plain_text(), "second");
            }
            other => panic!("expected quote, got {:?}", other),
        }
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn test_bullet_list_across_blank_lines() {
        let blocks = render("- a\n- b\n\n- c");
        assert_eq!(
            blocks,
            vec![Block::BulletList(List::new(vec![
                "a".to_string(),
                "b".to_string(),
                "c".to_string(),
            ]))]
        );
    }

    #[test]
    fn test_mixed_bullet_markers() {
        let blocks = render("- a\n* b");
        assert_eq!(
            blocks,
            vec![Block::BulletList(List::new(vec![
                "a".to_string(),
                "b".to_string(),
            ]))]
        );
    }

    #[test]
    fn test_numbered_list_strips_markers() {
        let blocks = render("1. first\n2. second\n10. tenth");
        assert_eq!(
            blocks,
            vec![Block::NumberedList(List::new(vec![
                "first".to_string(),
                "second".to_string(),
                "tenth".to_string(),
            ]))]
        );
    }

    #[test]
    fn test_table_with_separator() {
        let blocks = render("| a | b |\n| --- | --- |\n| 1 | 2 |");
        assert_eq!(
            blocks,
            vec![Block::Table(Table::new(
                vec!["a".to_string(), "b".to_string()],
                vec![vec!["1".to_string(), "2".to_string()]],
            ))]
        );
    }

    #[test]
    fn test_table_all_separators_emits_nothing() {
        let blocks = render("| --- | --- |");
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_horizontal_rules() {
        // A lone `---` has no closing pair, so it falls through to the
        // horizontal-rule arm.
        let blocks = render("***\n\nafter\n\n---");
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0], Block::Rule);
        assert!(blocks[1].is_paragraph());
        assert_eq!(blocks[2], Block::Rule);
    }

    #[test]
    fn test_front_matter_skipped() {
        let blocks = render("---\ntitle: Setup\norder: 2\n---\n\n# Setup");
        assert_eq!(blocks, vec![Block::heading(1, "Setup")]);
    }

    #[test]
    fn test_paired_rules_mid_document_swallow_span() {
        // Paired `---` lines are treated as front matter wherever they are
        // encountered during the scan.
        let blocks = render("# Top\n\n---\nhidden\n---\n\nvisible");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0], Block::heading(1, "Top"));
        assert_eq!(blocks[1].plain_text(), "visible");
    }

    #[test]
    fn test_paragraph_joins_lines_with_space() {
        let blocks = render("one\ntwo\nthree");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].plain_text(), "one two three");
    }

    #[test]
    fn test_paragraph_stops_at_block_openers() {
        let blocks = render("text\n- item");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].plain_text(), "text");
        assert!(matches!(blocks[1], Block::BulletList(_)));
    }

    #[test]
    fn test_paragraph_absorbs_unpaired_dashes() {
        // `---` does not terminate a paragraph run; it only opens a
        // block when encountered first.
        let blocks = render("Title\n---\nmore");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].plain_text(), "Title --- more");
    }

    #[test]
    fn test_blank_input() {
        assert!(render("").is_empty());
        assert!(render("\n\n\n").is_empty());
    }

    #[test]
    fn test_blocks_preserve_source_order() {
        let doc = "# H\n\npara\n\n- l1\n- l2\n\n> q\n\n```sh\nls\n```";
        let blocks = render(doc);
        assert_eq!(blocks.len(), 5);
        assert!(blocks[0].is_heading());
        assert!(blocks[1].is_paragraph());
        assert!(matches!(blocks[2], Block::BulletList(_)));
        assert!(matches!(blocks[3], Block::Quote(_)));
        assert!(matches!(blocks[4], Block::Code(_)));
    }

    #[test]
    fn test_render_is_idempotent() {
        let doc = "# H\n\n**bold** text\n\n| a |\n| 1 |";
        assert_eq!(render(doc), render(doc));
    }
}
