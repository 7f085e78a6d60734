//! Backend entity and payload types.
//!
//! Wire format is camelCase JSON. Every endpoint answers with either a
//! payload keyed by entity name (`user`, `project`, `projects`, `task`,
//! `tasks`, `accessToken`) or an `error`/`message` field; the client treats
//! any non-entity response as a failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User id
    pub id: i64,

    /// Login name
    pub username: String,

    /// E-mail address
    pub email: String,
}

/// A project owning tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project id
    pub id: i64,

    /// Project name
    pub name: String,

    /// Owning user id
    pub user_id: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    /// Low priority
    Low,
    /// Medium priority
    Medium,
    /// High priority
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
        }
    }
}

/// A task in a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Task id
    pub id: i64,

    /// Task title
    pub title: String,

    /// Optional longer description
    #[serde(default)]
    pub description: Option<String>,

    /// Optional due date
    #[serde(default)]
    pub due: Option<DateTime<Utc>>,

    /// Optional priority
    #[serde(default)]
    pub priority: Option<Priority>,

    /// Owning project id
    pub project_id: i64,

    /// Whether the task is done
    pub is_done: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Case-insensitive match of a search query against title and
    /// description.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(&query))
    }
}

/// Payload for creating a task.
///
/// `priority` is always sent, as `null` when absent, matching the wire
/// contract for "no priority".
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    /// Task title
    pub title: String,

    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Priority, `null` when absent
    pub priority: Option<Priority>,

    /// Optional due date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<DateTime<Utc>>,

    /// Owning project id
    pub project_id: i64,
}

/// Partial update for a task; unset fields are left unchanged server-side.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// New priority; `Some(None)` clears it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Option<Priority>>,

    /// New due date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<DateTime<Utc>>,

    /// Done flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_done: Option<bool>,
}

impl TaskPatch {
    /// Patch that only toggles the done flag.
    pub fn done(is_done: bool) -> Self {
        Self {
            is_done: Some(is_done),
            ..Self::default()
        }
    }

    /// Check if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.due.is_none()
            && self.is_done.is_none()
    }
}
