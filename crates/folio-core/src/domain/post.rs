use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::require_title;
use crate::content::{ContentFormat, ExcerptOptions, ReadTime};
use crate::error::DomainError;

/// Post entity - a blog article.
///
/// `id` and `created_at` are assigned by the store and never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn excerpt(&self, format: ContentFormat, options: &ExcerptOptions) -> String {
        crate::content::excerpt(&self.content, format, options)
    }

    pub fn read_time(&self, format: ContentFormat) -> ReadTime {
        crate::content::read_time(&self.content, format)
    }
}

/// A post that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub owner_id: Uuid,
    pub title: String,
    pub content: String,
}

impl NewPost {
    /// The title is trimmed and must not be blank; content may be empty.
    pub fn new(owner_id: Uuid, title: &str, content: String) -> Result<Self, DomainError> {
        Ok(Self {
            owner_id,
            title: require_title(title, "Post")?,
            content,
        })
    }
}

/// Partial update of a post's editable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl PostPatch {
    pub fn new(title: Option<&str>, content: Option<String>) -> Result<Self, DomainError> {
        let title = title.map(|t| require_title(t, "Post")).transpose()?;
        Ok(Self { title, content })
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }

    pub fn apply_to(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post_trims_title() {
        let post = NewPost::new(Uuid::new_v4(), "  Hello  ", String::new()).unwrap();
        assert_eq!(post.title, "Hello");
    }

    #[test]
    fn test_new_post_rejects_blank_title() {
        let result = NewPost::new(Uuid::new_v4(), "   ", "body".to_string());
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_patch_keeps_identity_fields() {
        let created_at = Utc::now();
        let id = Uuid::new_v4();
        let mut post = Post {
            id,
            owner_id: Uuid::new_v4(),
            title: "Old".to_string(),
            content: "old body".to_string(),
            created_at,
        };

        PostPatch::new(Some("New"), None).unwrap().apply_to(&mut post);

        assert_eq!(post.title, "New");
        assert_eq!(post.content, "old body");
        assert_eq!(post.id, id);
        assert_eq!(post.created_at, created_at);
    }

    #[test]
    fn test_patch_rejects_blank_title() {
        assert!(PostPatch::new(Some(""), None).is_err());
        assert!(PostPatch::new(None, Some(String::new())).is_ok());
    }
}
