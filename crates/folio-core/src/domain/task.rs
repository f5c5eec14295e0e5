use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::require_title;
use crate::error::DomainError;

/// Board column a task sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Ideas,
    Doing,
    Done,
}

impl TaskStatus {
    /// Columns in board order.
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Ideas, TaskStatus::Doing, TaskStatus::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Ideas => "ideas",
            TaskStatus::Doing => "doing",
            TaskStatus::Done => "done",
        }
    }

    /// Column heading shown on the board.
    pub fn title(self) -> &'static str {
        match self {
            TaskStatus::Ideas => "Ideas",
            TaskStatus::Doing => "In Progress",
            TaskStatus::Done => "Completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ideas" => Ok(TaskStatus::Ideas),
            "doing" => Ok(TaskStatus::Doing),
            "done" => Ok(TaskStatus::Done),
            other => Err(DomainError::Validation(format!("unknown task status `{other}`"))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task entity - a card on the three-column board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
}

/// A task that has not been stored yet. New tasks always start in
/// [`TaskStatus::Ideas`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
}

impl NewTask {
    pub fn new(
        owner_id: Uuid,
        title: &str,
        description: String,
        priority: TaskPriority,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            owner_id,
            title: require_title(title, "Task")?,
            description,
            priority,
        })
    }

    pub fn status(&self) -> TaskStatus {
        TaskStatus::Ideas
    }
}

/// Partial update of a task. Status and priority change independently of
/// each other and of the text fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
}

impl TaskPatch {
    pub fn details(title: Option<&str>, description: Option<String>) -> Result<Self, DomainError> {
        let title = title.map(|t| require_title(t, "Task")).transpose()?;
        Ok(Self {
            title,
            description,
            ..Self::default()
        })
    }

    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn priority(priority: TaskPriority) -> Self {
        Self {
            priority: Some(priority),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
    }

    pub fn apply_to(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
    }
}
