//! Response views built from domain entities for a given viewer.
//!
//! Excerpts and read times are derived here on every read and never stored.

use folio_core::domain::{Post, Task, TaskStatus, Viewer};
use folio_shared::dto::{
    BoardResponse, PostListResponse, PostResponse, PostSummary, TaskColumnView, TaskResponse,
    ViewerResponse,
};

use crate::state::ContentSettings;

pub fn viewer(viewer: &Viewer) -> ViewerResponse {
    ViewerResponse {
        signed_in: viewer.is_signed_in(),
        email: viewer.identity.as_ref().map(|i| i.email.clone()),
        is_demo: viewer.identity.as_ref().is_some_and(|i| i.is_demo),
        can_manage_posts: viewer.can_manage_posts(),
        can_manage_tasks: viewer.can_manage_tasks(),
        theme: viewer.theme,
    }
}

pub fn post_summary(post: Post, content: &ContentSettings) -> PostSummary {
    PostSummary {
        excerpt: post.excerpt(content.format, &content.excerpt),
        read_time: post.read_time(content.format).to_string(),
        id: post.id,
        title: post.title,
        created_at: post.created_at,
    }
}

/// The blog listing in the order the repository returned it.
pub fn post_listing(
    posts: Vec<Post>,
    viewer: &Viewer,
    content: &ContentSettings,
) -> PostListResponse {
    PostListResponse {
        posts: posts.into_iter().map(|p| post_summary(p, content)).collect(),
        can_manage_posts: viewer.can_manage_posts(),
        theme: viewer.theme,
    }
}

pub fn post_page(post: Post, viewer: &Viewer, content: &ContentSettings) -> PostResponse {
    PostResponse {
        read_time: post.read_time(content.format).to_string(),
        id: post.id,
        owner_id: post.owner_id,
        title: post.title,
        content: post.content,
        content_format: content.format,
        created_at: post.created_at,
        can_edit: viewer.can_manage_posts(),
    }
}

/// Group tasks into the three board columns, keeping their relative order.
pub fn board(tasks: Vec<Task>, viewer: &Viewer) -> BoardResponse {
    let mut columns: Vec<TaskColumnView> = TaskStatus::ALL
        .iter()
        .map(|&status| TaskColumnView {
            status,
            title: status.title().to_string(),
            count: 0,
            tasks: Vec::new(),
        })
        .collect();

    for task in tasks {
        if let Some(column) = columns.iter_mut().find(|c| c.status == task.status) {
            column.tasks.push(TaskResponse::from(task));
        }
    }
    for column in &mut columns {
        column.count = column.tasks.len();
    }

    BoardResponse {
        columns,
        can_manage_tasks: viewer.can_manage_tasks(),
        theme: viewer.theme,
    }
}
