//! # cues
//!
//! Client library for the cues task manager.
//!
//! cues is a task/project management product whose primary interface is a
//! command-line tool, backed by a REST API. This crate holds everything the
//! client surfaces share: the markdown document renderer and its typed
//! block model, the slug-addressed docs store, the session context, and
//! the backend API client.
//!
//! ## Quick Start
//!
//! ```
//! use cues::{render, Block};
//!
//! let blocks = render("# Getting Started\n\nInstall the CLI with `cargo install cues-cli`.");
//! assert!(matches!(blocks[0], Block::Heading { level: 1, .. }));
//! assert!(blocks[1].is_paragraph());
//! ```
//!
//! Loading a document from a docs directory:
//!
//! ```no_run
//! use cues::DocStore;
//!
//! fn main() -> cues::Result<()> {
//!     let store = DocStore::new("docs");
//!     let doc = store.get("index")?;
//!     for block in doc.render() {
//!         println!("{:?}", block);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Markdown rendering**: a restricted markdown subset parsed into
//!   typed blocks ready for display; never fails on malformed input
//! - **Docs store**: front-mattered documents addressed by slug, listed in
//!   `order`
//! - **Session context**: explicit load/save/clear lifecycle, persisted to
//!   disk
//! - **API client**: auth, projects, and tasks over REST, with a one-shot
//!   token refresh on 401

pub mod api;
pub mod error;
pub mod model;
pub mod parser;
pub mod store;

// Re-export commonly used types
pub use api::{ApiClient, NewTask, Priority, Project, Session, SessionStore, Task, TaskPatch, User};
pub use error::{Error, Result};
pub use model::{Block, Blockquote, CodeBlock, Doc, DocMeta, InlineSpan, Line, List, Table};
pub use parser::{extract_front_matter, format_inline, render, FrontMatter, InlineFormatter};
pub use store::DocStore;
