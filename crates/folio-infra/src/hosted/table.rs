use std::marker::PhantomData;

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use folio_core::domain::{Task, TaskStatus};
use folio_core::error::RepoError;
use folio_core::ports::{BaseRepository, TaskRepository};

use super::client::{read_rows, transport_error};
use super::{HostedClient, HostedQuery, PostsTable, TasksTable};

/// Binds a hosted table to the domain entity stored in it.
pub trait HostedTable: Send + Sync + 'static {
    type Entity: Send + 'static;
    type Row: DeserializeOwned + Into<Self::Entity> + Send;
    type New: Into<Self::Insert> + Send + 'static;
    type Insert: Serialize + Send + Sync;
    type Patch: Serialize + Send + Sync + 'static;

    const TABLE: &'static str;
}

/// Repository over one hosted table.
pub struct HostedRepository<T> {
    client: HostedClient,
    _table: PhantomData<fn() -> T>,
}

pub type HostedPostRepository = HostedRepository<PostsTable>;
pub type HostedTaskRepository = HostedRepository<TasksTable>;

impl<T: HostedTable> HostedRepository<T> {
    pub fn new(client: HostedClient) -> Self {
        Self {
            client,
            _table: PhantomData,
        }
    }

    async fn fetch(&self, query: HostedQuery) -> Result<Vec<T::Entity>, RepoError> {
        let response = self
            .client
            .table(Method::GET, T::TABLE, &query)
            .send()
            .await
            .map_err(transport_error)?;

        let rows = read_rows::<T::Row>(response).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn by_id(id: Uuid) -> HostedQuery {
        HostedQuery::new().eq("id", id)
    }

    fn select_all() -> HostedQuery {
        HostedQuery::new().select("*")
    }
}

/// First row of a write's representation; an empty one means nothing matched.
fn single<E>(rows: Vec<E>, id: Option<Uuid>) -> Result<E, RepoError> {
    match (rows.into_iter().next(), id) {
        (Some(entity), _) => Ok(entity),
        (None, Some(_)) => Err(RepoError::NotFound),
        (None, None) => Err(RepoError::Decode("write returned no representation".to_string())),
    }
}

#[async_trait]
impl<T: HostedTable> BaseRepository<T::Entity, T::New, T::Patch> for HostedRepository<T> {
    async fn list_recent(&self) -> Result<Vec<T::Entity>, RepoError> {
        self.fetch(Self::select_all().newest_first("created_at")).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<T::Entity>, RepoError> {
        let rows = self.fetch(Self::by_id(id).select("*")).await?;
        Ok(rows.into_iter().next())
    }

    async fn insert(&self, new: T::New) -> Result<T::Entity, RepoError> {
        let body: T::Insert = new.into();
        let response = self
            .client
            .table(Method::POST, T::TABLE, &HostedQuery::new().select("*"))
            .header("Prefer", "return=representation")
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let rows = read_rows::<T::Row>(response).await?;
        tracing::debug!(table = T::TABLE, "Row inserted");
        single(rows.into_iter().map(Into::into).collect(), None)
    }

    async fn update(&self, id: Uuid, patch: T::Patch) -> Result<T::Entity, RepoError> {
        let response = self
            .client
            .table(Method::PATCH, T::TABLE, &Self::by_id(id).select("*"))
            .header("Prefer", "return=representation")
            .json(&patch)
            .send()
            .await
            .map_err(transport_error)?;

        let rows = read_rows::<T::Row>(response).await?;
        single(rows.into_iter().map(Into::into).collect(), Some(id))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let response = self
            .client
            .table(Method::DELETE, T::TABLE, &Self::by_id(id))
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(transport_error)?;

        let rows = read_rows::<serde_json::Value>(response).await?;
        if rows.is_empty() {
            return Err(RepoError::NotFound);
        }
        tracing::debug!(table = T::TABLE, %id, "Row deleted");
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for HostedTaskRepository {
    async fn list_by_status(&self, status: TaskStatus) -> Result<Vec<Task>, RepoError> {
        let query = Self::select_all()
            .eq("status", status)
            .newest_first("created_at");
        self.fetch(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_query_filters_by_status() {
        let query = HostedTaskRepository::select_all()
            .eq("status", TaskStatus::Doing)
            .newest_first("created_at");

        let pairs = query.pairs();
        assert_eq!(pairs[0], ("select".to_string(), "*".to_string()));
        assert_eq!(pairs[1], ("status".to_string(), "eq.doing".to_string()));
        assert_eq!(pairs[2], ("order".to_string(), "created_at.desc".to_string()));
    }

    #[test]
    fn test_empty_update_representation_is_not_found() {
        let result = single(Vec::<Task>::new(), Some(Uuid::new_v4()));
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[test]
    fn test_empty_insert_representation_is_decode_error() {
        assert!(matches!(single(Vec::<Task>::new(), None), Err(RepoError::Decode(_))));
    }
}
