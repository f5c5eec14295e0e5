use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use folio_core::domain::{NewTask, Task, TaskPatch};
use folio_core::ports::TaskRepository;

use super::{InMemoryRepository, StoredEntity};

/// In-memory task repository.
pub type InMemoryTaskRepository = InMemoryRepository<Task>;

impl StoredEntity for Task {
    type New = NewTask;
    type Patch = TaskPatch;

    const NAME: &'static str = "task";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn materialize(new: NewTask, id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            status: new.status(),
            owner_id: new.owner_id,
            title: new.title,
            description: new.description,
            priority: new.priority,
            created_at,
        }
    }

    fn apply(&mut self, patch: TaskPatch) {
        patch.apply_to(self);
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {}
