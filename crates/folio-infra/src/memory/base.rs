use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use folio_core::error::RepoError;
use folio_core::ports::BaseRepository;

/// An entity the in-memory store can hold.
pub trait StoredEntity: Clone + Send + Sync + 'static {
    type New: Send + 'static;
    type Patch: Send + 'static;

    /// Entity name used in log events.
    const NAME: &'static str;

    fn id(&self) -> Uuid;

    fn created_at(&self) -> DateTime<Utc>;

    /// Build the stored entity, as the store would on insert.
    fn materialize(new: Self::New, id: Uuid, created_at: DateTime<Utc>) -> Self;

    fn apply(&mut self, patch: Self::Patch);
}

/// Generic in-memory repository backed by a `Vec` behind an async RwLock.
pub struct InMemoryRepository<E> {
    rows: RwLock<Vec<E>>,
}

impl<E: StoredEntity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

impl<E: StoredEntity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: StoredEntity> BaseRepository<E, E::New, E::Patch> for InMemoryRepository<E> {
    async fn list_recent(&self) -> Result<Vec<E>, RepoError> {
        let rows = self.rows.read().await;
        let mut out = rows.clone();
        // Rows are kept in insertion order; reversing before the stable sort
        // puts the later insert first when timestamps tie.
        out.reverse();
        out.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(out)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<E>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|row| row.id() == id).cloned())
    }

    async fn insert(&self, new: E::New) -> Result<E, RepoError> {
        let entity = E::materialize(new, Uuid::new_v4(), Utc::now());

        let mut rows = self.rows.write().await;
        rows.push(entity.clone());
        tracing::debug!(entity = E::NAME, id = %entity.id(), "Inserted in-memory row");

        Ok(entity)
    }

    async fn update(&self, id: Uuid, patch: E::Patch) -> Result<E, RepoError> {
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|row| row.id() == id)
            .ok_or(RepoError::NotFound)?;

        row.apply(patch);
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.id() != id);

        if rows.len() == before {
            return Err(RepoError::NotFound);
        }

        tracing::debug!(entity = E::NAME, id = %id, "Deleted in-memory row");
        Ok(())
    }
}
