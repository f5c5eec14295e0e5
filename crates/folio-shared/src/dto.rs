//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use folio_core::ContentFormat;
use folio_core::domain::{Task, TaskPriority, TaskStatus, Theme};
use folio_core::ports::{AccountRef, Session};

/// Request to sign in with email and password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Request to create an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub email: String,
}

impl From<AccountRef> for AccountResponse {
    fn from(account: AccountRef) -> Self {
        Self {
            id: account.id,
            email: account.email,
        }
    }
}

/// Response containing an issued session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: AccountResponse,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            access_token: session.access_token,
            token_type: session.token_type,
            expires_in: session.expires_in,
            user: session.user.into(),
        }
    }
}

/// What the current request is allowed to do.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerResponse {
    pub signed_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub is_demo: bool,
    pub can_manage_posts: bool,
    pub can_manage_tasks: bool,
    pub theme: Theme,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// A full post as shown on its own page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub content: String,
    pub content_format: ContentFormat,
    pub created_at: DateTime<Utc>,
    pub read_time: String,
    pub can_edit: bool,
}

/// One entry of the blog listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub excerpt: String,
    pub read_time: String,
}

/// The blog listing, newest post first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    pub posts: Vec<PostSummary>,
    pub can_manage_posts: bool,
    pub theme: Theme,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: TaskPriority,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveTaskRequest {
    pub status: TaskStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetPriorityRequest {
    pub priority: TaskPriority,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            priority: task.priority,
            status: task.status,
            created_at: task.created_at,
        }
    }
}

/// One column of the task board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskColumnView {
    pub status: TaskStatus,
    pub title: String,
    pub count: usize,
    pub tasks: Vec<TaskResponse>,
}

/// The three-column board, columns in `ideas`, `doing`, `done` order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardResponse {
    pub columns: Vec<TaskColumnView>,
    pub can_manage_tasks: bool,
    pub theme: Theme,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeRequest {
    pub theme: Theme,
}
