//! Row shapes of the hosted `posts` and `tasks` tables.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use folio_core::domain::{
    NewPost, NewTask, Post, PostPatch, Task, TaskPatch, TaskPriority, TaskStatus,
};

use super::HostedTable;

/// The `posts` table.
pub struct PostsTable;

/// The `tasks` table.
pub struct TasksTable;

#[derive(Debug, Clone, Deserialize)]
pub struct PostRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Conversion from a hosted row to the domain Post.
impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.user_id,
            title: row.title,
            content: row.content.unwrap_or_default(),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostInsert {
    pub title: String,
    pub content: String,
    pub user_id: Uuid,
}

impl From<NewPost> for PostInsert {
    fn from(new: NewPost) -> Self {
        Self {
            title: new.title,
            content: new.content,
            user_id: new.owner_id,
        }
    }
}

impl HostedTable for PostsTable {
    type Entity = Post;
    type Row = PostRow;
    type New = NewPost;
    type Insert = PostInsert;
    type Patch = PostPatch;

    const TABLE: &'static str = "posts";
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
}

/// Conversion from a hosted row to the domain Task.
impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.user_id,
            title: row.title,
            description: row.description.unwrap_or_default(),
            priority: row.priority,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskInsert {
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub user_id: Uuid,
}

impl From<NewTask> for TaskInsert {
    fn from(new: NewTask) -> Self {
        Self {
            status: new.status(),
            title: new.title,
            description: new.description,
            priority: new.priority,
            user_id: new.owner_id,
        }
    }
}

impl HostedTable for TasksTable {
    type Entity = Task;
    type Row = TaskRow;
    type New = NewTask;
    type Insert = TaskInsert;
    type Patch = TaskPatch;

    const TABLE: &'static str = "tasks";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_row_with_null_content() {
        let row: PostRow = serde_json::from_value(serde_json::json!({
            "id": "8d7c5a4e-2b1f-4e0a-9c3d-6f5e4d3c2b1a",
            "user_id": "1a2b3c4d-5e6f-4a0b-8c1d-2e3f4a5b6c7d",
            "title": "Hello",
            "content": null,
            "created_at": "2024-03-01T12:30:00.123456+00:00"
        }))
        .unwrap();

        let post = Post::from(row);
        assert_eq!(post.title, "Hello");
        assert_eq!(post.content, "");
        assert_eq!(post.created_at.to_rfc3339(), "2024-03-01T12:30:00.123456+00:00");
    }

    #[test]
    fn test_task_insert_starts_in_ideas() {
        let owner = Uuid::new_v4();
        let new = NewTask::new(owner, "Plan", "notes".to_string(), TaskPriority::Low).unwrap();

        let body = serde_json::to_value(TaskInsert::from(new)).unwrap();

        assert_eq!(body["status"], "ideas");
        assert_eq!(body["priority"], "low");
        assert_eq!(body["user_id"], owner.to_string());
    }

    #[test]
    fn test_task_row_rejects_unknown_status() {
        let result = serde_json::from_value::<TaskRow>(serde_json::json!({
            "id": "8d7c5a4e-2b1f-4e0a-9c3d-6f5e4d3c2b1a",
            "user_id": "1a2b3c4d-5e6f-4a0b-8c1d-2e3f4a5b6c7d",
            "title": "x",
            "priority": "medium",
            "status": "archived",
            "created_at": "2024-03-01T12:30:00Z"
        }));
        assert!(result.is_err());
    }
}
