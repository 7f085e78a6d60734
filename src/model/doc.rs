//! Document and metadata types for the docs store.

use serde::{Deserialize, Serialize};

use crate::parser;

use super::Block;

/// Metadata describing one document, extracted from its front matter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocMeta {
    /// Slug identifying the document (`/`-joined path, or `"index"`)
    pub slug: String,

    /// Document title, `"Untitled"` when the front matter has none
    pub title: String,

    /// Optional short description
    pub description: Option<String>,

    /// Sort key for listings, 0 when the front matter has none
    pub order: i64,
}

/// A loaded document: metadata plus markdown body.
///
/// The body excludes the front matter block; it is the text handed to the
/// renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doc {
    /// Document metadata
    pub meta: DocMeta,

    /// Markdown body
    pub content: String,
}

impl Doc {
    /// Create a document from metadata and body text.
    pub fn new(meta: DocMeta, content: impl Into<String>) -> Self {
        Self {
            meta,
            content: content.into(),
        }
    }

    /// Render the body into display blocks.
    pub fn render(&self) -> Vec<Block> {
        parser::render(&self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_render() {
        let meta = DocMeta {
            slug: "index".to_string(),
            title: "Welcome".to_string(),
            description: None,
            order: 0,
        };
        let doc = Doc::new(meta, "# Welcome\n\nHello.");
        let blocks = doc.render();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].is_heading());
        assert!(blocks[1].is_paragraph());
    }
}
