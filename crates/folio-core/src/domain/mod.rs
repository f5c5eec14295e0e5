//! Domain entities - the core business objects.

mod post;
mod task;
mod viewer;

pub use post::{NewPost, Post, PostPatch};
pub use task::{NewTask, Task, TaskPatch, TaskPriority, TaskStatus};
pub use viewer::{Identity, Theme, Viewer};

use crate::error::DomainError;

fn require_title(title: &str, entity: &str) -> Result<String, DomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(format!("{entity} title must not be empty")));
    }
    Ok(trimmed.to_string())
}
