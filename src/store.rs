//! Docs store: slug-addressed markdown documents on disk.
//!
//! Documents live as `*.md` files under a docs directory. A slug is a
//! `/`-joined path (nested directories allowed on lookup), with `"index"`
//! naming the landing document. Listings cover the top level of the
//! directory and are sorted ascending by the front matter `order` key.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::{Doc, DocMeta};
use crate::parser::extract_front_matter;

/// A directory of markdown documents addressed by slug.
#[derive(Debug, Clone)]
pub struct DocStore {
    dir: PathBuf,
}

impl DocStore {
    /// Create a store over the given docs directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Get the docs directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load the document for a slug.
    ///
    /// Returns [`Error::DocNotFound`] when no file backs the slug and
    /// [`Error::InvalidSlug`] when the slug contains empty or traversing
    /// segments.
    pub fn get(&self, slug: &str) -> Result<Doc> {
        let path = self.resolve(slug)?;
        if !path.is_file() {
            return Err(Error::DocNotFound(slug.to_string()));
        }
        let raw = fs::read_to_string(&path)?;
        let (front, body) = extract_front_matter(&raw)?;
        Ok(Doc::new(front.into_meta(slug), body))
    }

    /// List metadata for every document in the store, ascending by `order`.
    ///
    /// A missing directory yields an empty listing; unreadable documents
    /// are skipped with a warning.
    pub fn list(&self) -> Result<Vec<DocMeta>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut metas = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(slug) = name.to_str().and_then(|n| n.strip_suffix(".md")) else {
                continue;
            };
            match self.get(slug) {
                Ok(doc) => metas.push(doc.meta),
                Err(err) => log::warn!("skipping doc {}: {}", slug, err),
            }
        }

        metas.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.slug.cmp(&b.slug)));
        Ok(metas)
    }

    /// Resolve a slug to a file path under the docs directory.
    fn resolve(&self, slug: &str) -> Result<PathBuf> {
        let mut path = self.dir.clone();
        let mut segments = slug.split('/').peekable();
        while let Some(segment) = segments.next() {
            if segment.is_empty() || segment == "." || segment == ".." {
                return Err(Error::InvalidSlug(slug.to_string()));
            }
            if segments.peek().is_some() {
                path.push(segment);
            } else {
                path.push(format!("{segment}.md"));
            }
        }
        Ok(path)
    }
}
