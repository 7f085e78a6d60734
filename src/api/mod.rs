//! Backend API: entity types, session context, and REST client.
//!
//! The backend owns all persistent state and business rules; this module
//! is a thin, typed surface over its REST endpoints. Failures propagate as
//! [`crate::Error`] values; callers log and leave their state unchanged.

mod client;
mod session;
mod types;

pub use client::ApiClient;
pub use session::{Session, SessionStore};
pub use types::{NewTask, Priority, Project, Task, TaskPatch, User};
