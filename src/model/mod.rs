//! Document model types for rendered content.
//!
//! This module defines the display representation produced by the markdown
//! renderer: an ordered sequence of typed [`Block`]s, with inline styling
//! captured as [`InlineSpan`]s. The model is pure data; consumers render
//! each variant with their own presentation layer.

mod block;
mod doc;
mod inline;
mod table;

pub use block::{Block, Blockquote, CodeBlock, List};
pub use doc::{Doc, DocMeta};
pub use inline::{InlineSpan, Line};
pub use table::Table;
