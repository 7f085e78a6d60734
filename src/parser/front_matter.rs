//! Front matter extraction for the docs store.
//!
//! Front matter is a leading `---`-delimited YAML block carrying the
//! `title`/`description`/`order` triple. It is extracted before the body is
//! handed to the renderer; the renderer itself discards any delimited block
//! it encounters.

use serde::Deserialize;

use crate::error::Result;
use crate::model::DocMeta;

/// Metadata keys recognized in a document's front matter.
///
/// Missing keys fall back to `"Untitled"` / absent / `0` when converted to
/// a [`DocMeta`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    /// Document title
    pub title: Option<String>,

    /// Short description
    pub description: Option<String>,

    /// Sort key for listings
    pub order: Option<i64>,
}

impl FrontMatter {
    /// Convert to document metadata, applying defaults for missing keys.
    pub fn into_meta(self, slug: impl Into<String>) -> DocMeta {
        DocMeta {
            slug: slug.into(),
            title: self.title.unwrap_or_else(|| "Untitled".to_string()),
            description: self.description,
            order: self.order.unwrap_or(0),
        }
    }
}

/// Split a document into its front matter and body.
///
/// The block must open on the first line. A document without one (or with
/// an unterminated one) yields all-default metadata and the full text as
/// body.
pub fn extract_front_matter(content: &str) -> Result<(FrontMatter, &str)> {
    let mut lines = content.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return Ok((FrontMatter::default(), content));
    };
    if first.trim() != "---" {
        return Ok((FrontMatter::default(), content));
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        if line.trim() == "---" {
            let yaml = &content[yaml_start..offset];
            let body = &content[offset + line.len()..];
            let meta = if yaml.trim().is_empty() {
                FrontMatter::default()
            } else {
                serde_yaml::from_str(yaml)?
            };
            return Ok((meta, body));
        }
        offset += line.len();
    }

    Ok((FrontMatter::default(), content))
}
