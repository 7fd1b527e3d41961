//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record persisted by the store.
//! - Provide patch/draft carriers for the two mutation shapes (edit, create).
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `created_at` is immutable after creation; `TaskPatch` cannot touch it.
//! - The serialized shape matches the stored JSON layout exactly
//!   (camelCase keys, `description` absent when unset).

use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Urgency label shown on the card.
///
/// Serialized capitalized (`"High"`) to match the stored record layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Stable wire/display form of this priority.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// Lifecycle state; decides which board column owns the task.
///
/// Serialized in kebab-case (`"in-progress"`) to match the stored record
/// layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// All statuses in board column order.
    pub const ALL: [TaskStatus; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// Stable wire/display form of this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical task record.
///
/// Field names serialize in camelCase so the persisted collection keeps the
/// layout `{id, title, description?, priority, status, createdAt}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable unique ID, assigned at creation.
    pub id: TaskId,
    /// Human title. Non-blank, enforced at the edit boundary.
    pub title: String,
    /// Optional free text. Absent in the stored record when `None`.
    /// A malformed stored value decodes as missing instead of failing the row.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_text"
    )]
    pub description: Option<String>,
    pub priority: Priority,
    pub status: TaskStatus,
    /// ISO-8601 creation timestamp. Set once, never patched.
    pub created_at: String,
}

impl Task {
    /// Creates a task from a draft with a freshly generated ID.
    ///
    /// `created_at` comes from the caller's clock so creation stays
    /// deterministic under test.
    pub fn new(draft: TaskDraft, created_at: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), draft, created_at)
    }

    /// Creates a task with a caller-provided stable ID.
    ///
    /// Used by import paths and tests where identity already exists.
    pub fn with_id(id: TaskId, draft: TaskDraft, created_at: impl Into<String>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            priority: draft.priority,
            status: draft.status,
            created_at: created_at.into(),
        }
    }
}

fn lenient_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(text) => Ok(Some(text)),
        _ => Ok(None),
    }
}

/// Creation input: everything the board form provides.
///
/// `id` and `created_at` are stamped by the core at creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub status: TaskStatus,
}

impl TaskDraft {
    /// Trims the title and collapses a blank description to `None`,
    /// mirroring what the edit form submits.
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.description = self
            .description
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());
        self
    }

    /// Rejects drafts whose normalized title is empty.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::BlankTitle);
        }
        Ok(())
    }
}

/// Draft-level validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    BlankTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "task title must not be blank"),
        }
    }
}

impl Error for TaskValidationError {}

/// Shallow-merge update: provided fields overwrite, omitted fields keep
/// their prior value.
///
/// `description` is tri-state so an edit can clear it:
/// `None` = leave as is, `Some(None)` = clear, `Some(Some(text))` = replace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    /// Patch used by the drag protocol: status only, nothing else moves.
    pub fn status_only(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Returns whether the patch carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.status.is_none()
    }

    /// Merges this patch into `task`. `id` and `created_at` are untouchable.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
    }
}
