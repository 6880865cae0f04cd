//! Board domain types.
//!
//! DESIGN
//! ======
//! Tasks carry a copied `UserRef` for their assignee and activities carry a
//! copied actor name/avatar. These are snapshots: renaming a user later never
//! rewrites history. Every type serializes with camelCase fields so a
//! presentation layer can consume JSON snapshots directly.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// UTC wall-clock timestamp used for every record.
pub type Timestamp = DateTime<Utc>;

/// Column → ordered task list. Iterates in board order (todo, in-progress, done).
pub type TaskMap = BTreeMap<ColumnId, Vec<Task>>;

// =============================================================================
// PARSE ERRORS
// =============================================================================

/// Raised when presentation-supplied strings do not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown column: {0}")]
    UnknownColumn(String),
    #[error("unknown priority: {0}")]
    UnknownPriority(String),
    #[error("unknown user status: {0}")]
    UnknownStatus(String),
}

// =============================================================================
// COLUMNS
// =============================================================================

/// One of the three fixed board columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnId {
    Todo,
    InProgress,
    Done,
}

impl ColumnId {
    /// All columns in board order.
    pub const ALL: [ColumnId; 3] = [ColumnId::Todo, ColumnId::InProgress, ColumnId::Done];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }

    /// Human-facing column header.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(Self::Todo),
            "in-progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            other => Err(ParseError::UnknownColumn(other.to_string())),
        }
    }
}

// =============================================================================
// TASKS
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(ParseError::UnknownPriority(other.to_string())),
        }
    }
}

/// Copied identity of a user, embedded in tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: String,
    pub name: String,
    pub avatar: String,
}

impl From<&User> for UserRef {
    fn from(user: &User) -> Self {
        Self { id: user.id.clone(), name: user.name.clone(), avatar: user.avatar.clone() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub assignee: UserRef,
    /// Due date as entered (`YYYY-MM-DD`); not interpreted by the store.
    pub due_date: String,
    pub priority: Priority,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Task fields supplied by the caller when creating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub assignee: UserRef,
    pub due_date: String,
    pub priority: Priority,
}

impl Task {
    /// Materialize a draft with a fresh id and identical created/updated stamps.
    #[must_use]
    pub fn from_draft(id: String, draft: TaskDraft, now: Timestamp) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            tags: draft.tags,
            assignee: draft.assignee,
            due_date: draft.due_date,
            priority: draft.priority,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update. `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub assignee: Option<UserRef>,
    pub due_date: Option<String>,
    pub priority: Option<Priority>,
}

impl TaskPatch {
    /// Merge into `task`. Identity and `created_at` are never touched.
    pub fn apply_to(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(tags) = self.tags {
            task.tags = tags;
        }
        if let Some(assignee) = self.assignee {
            task.assignee = assignee;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
    }
}

/// A task mid-drag, tagged with the column it was picked up from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraggedTask {
    #[serde(flatten)]
    pub task: Task,
    pub source_column: ColumnId,
}

// =============================================================================
// USERS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Online,
    Away,
    Offline,
}

impl FromStr for UserStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "online" => Ok(Self::Online),
            "away" => Ok(Self::Away),
            "offline" => Ok(Self::Offline),
            other => Err(ParseError::UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub status: UserStatus,
    /// What the user is doing right now. Only shown while online.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_activity: Option<String>,
    /// Only shown while away or offline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<Timestamp>,
}

// =============================================================================
// ACTIVITY LOG
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityAction {
    Created,
    Updated,
    Moved,
    Deleted,
    Commented,
}

impl ActivityAction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Moved => "moved",
            Self::Deleted => "deleted",
            Self::Commented => "commented",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_avatar: String,
    pub action: ActivityAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_column: Option<ColumnId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_column: Option<ColumnId>,
    pub timestamp: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Activity fields supplied by the caller; the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityDraft {
    pub user_id: String,
    pub user_name: String,
    pub user_avatar: String,
    pub action: ActivityAction,
    pub task_id: Option<String>,
    pub task_title: Option<String>,
    pub from_column: Option<ColumnId>,
    pub to_column: Option<ColumnId>,
    pub details: Option<String>,
}

impl ActivityDraft {
    /// Start a draft attributed to `actor`.
    #[must_use]
    pub fn new(actor: &UserRef, action: ActivityAction) -> Self {
        Self {
            user_id: actor.id.clone(),
            user_name: actor.name.clone(),
            user_avatar: actor.avatar.clone(),
            action,
            task_id: None,
            task_title: None,
            from_column: None,
            to_column: None,
            details: None,
        }
    }

    #[must_use]
    pub fn task(mut self, id: impl Into<String>, title: impl Into<String>) -> Self {
        self.task_id = Some(id.into());
        self.task_title = Some(title.into());
        self
    }

    #[must_use]
    pub fn columns(mut self, from: ColumnId, to: ColumnId) -> Self {
        self.from_column = Some(from);
        self.to_column = Some(to);
        self
    }

    #[must_use]
    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

// =============================================================================
// NOTIFICATIONS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub timestamp: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    pub message: String,
    pub kind: NotificationKind,
    pub user_id: Option<String>,
    pub task_id: Option<String>,
}

impl NotificationDraft {
    #[must_use]
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self { message: message.into(), kind, user_id: None, task_id: None }
    }

    #[must_use]
    pub fn task(mut self, task_id: impl Into<String>) -> Self {
        self.task_id = Some(task_id.into());
        self
    }
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
