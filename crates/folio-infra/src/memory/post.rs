use chrono::{DateTime, Utc};
use uuid::Uuid;

use folio_core::domain::{NewPost, Post, PostPatch};

use super::{InMemoryRepository, StoredEntity};

/// In-memory post repository.
pub type InMemoryPostRepository = InMemoryRepository<Post>;

impl StoredEntity for Post {
    type New = NewPost;
    type Patch = PostPatch;

    const NAME: &'static str = "post";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn materialize(new: NewPost, id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            owner_id: new.owner_id,
            title: new.title,
            content: new.content,
            created_at,
        }
    }

    fn apply(&mut self, patch: PostPatch) {
        patch.apply_to(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::error::RepoError;
    use folio_core::ports::{BaseRepository, PostRepository};

    fn new_post(title: &str) -> NewPost {
        NewPost::new(Uuid::new_v4(), title, format!("{title} body")).unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamp() {
        let repo = InMemoryPostRepository::new();
        let before = Utc::now();

        let post = repo.insert(new_post("First")).await.unwrap();

        assert!(post.created_at >= before);
        assert_eq!(repo.find_by_id(post.id).await.unwrap(), Some(post));
    }

    #[tokio::test]
    async fn test_list_recent_is_newest_first() {
        let repo = InMemoryPostRepository::new();
        for title in ["one", "two", "three"] {
            repo.insert(new_post(title)).await.unwrap();
        }

        let titles: Vec<_> = repo
            .list_recent()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, ["three", "two", "one"]);
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_created_at() {
        let repo = InMemoryPostRepository::new();
        let post = repo.insert(new_post("Draft")).await.unwrap();

        let patch = PostPatch::new(Some("Final"), Some("new body".to_string())).unwrap();
        let updated = repo.update(post.id, patch).await.unwrap();

        assert_eq!(updated.title, "Final");
        assert_eq!(updated.content, "new body");
        assert_eq!(updated.id, post.id);
        assert_eq!(updated.created_at, post.created_at);
        assert_eq!(updated.owner_id, post.owner_id);
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id() {
        let repo = InMemoryPostRepository::new();

        let update = repo.update(Uuid::new_v4(), PostPatch::default()).await;
        assert!(matches!(update, Err(RepoError::NotFound)));

        let delete = repo.delete(Uuid::new_v4()).await;
        assert!(matches!(delete, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_removes_post() {
        let repo = InMemoryPostRepository::new();
        let post = repo.insert(new_post("Gone")).await.unwrap();

        repo.delete(post.id).await.unwrap();

        assert!(repo.find_by_id(post.id).await.unwrap().is_none());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_usable_as_trait_object() {
        let repo: std::sync::Arc<dyn PostRepository> = std::sync::Arc::new(InMemoryPostRepository::new());
        repo.insert(new_post("dyn")).await.unwrap();
        assert_eq!(repo.list_recent().await.unwrap().len(), 1);
    }
}
