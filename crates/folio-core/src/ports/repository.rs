use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewPost, NewTask, Post, PostPatch, Task, TaskPatch, TaskStatus};
use crate::error::RepoError;

/// Generic repository over a store that assigns ids and creation times.
#[async_trait]
pub trait BaseRepository<T, New, Patch>: Send + Sync {
    /// All entities, newest first.
    async fn list_recent(&self) -> Result<Vec<T>, RepoError>;

    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError>;

    /// Store a new entity and return it with its assigned id and timestamp.
    async fn insert(&self, new: New) -> Result<T, RepoError>;

    /// Apply a partial update. `RepoError::NotFound` if the id is unknown.
    async fn update(&self, id: Uuid, patch: Patch) -> Result<T, RepoError>;

    /// Delete an entity. `RepoError::NotFound` if nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Blog post repository.
pub trait PostRepository: BaseRepository<Post, NewPost, PostPatch> {}

impl<R> PostRepository for R where R: BaseRepository<Post, NewPost, PostPatch> {}

/// Task board repository.
#[async_trait]
pub trait TaskRepository: BaseRepository<Task, NewTask, TaskPatch> {
    /// Tasks in one column, newest first.
    async fn list_by_status(&self, status: TaskStatus) -> Result<Vec<Task>, RepoError> {
        let tasks = self.list_recent().await?;
        Ok(tasks.into_iter().filter(|t| t.status == status).collect())
    }
}
