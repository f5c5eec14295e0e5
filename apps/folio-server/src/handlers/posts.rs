//! Blog post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use folio_core::domain::{NewPost, Post, PostPatch};
use folio_core::error::DomainError;
use folio_core::ports::BaseRepository;
use folio_shared::dto::{CreatePostRequest, UpdatePostRequest};

use crate::middleware::auth::RequestViewer;
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views;

async fn load(state: &AppState, id: Uuid) -> AppResult<Post> {
    let post = state.posts.find_by_id(id).await?.ok_or(DomainError::NotFound {
        entity_type: "Post",
        id,
    })?;
    Ok(post)
}

/// GET /api/posts - newest first, with excerpts and read times
pub async fn list(state: web::Data<AppState>, viewer: RequestViewer) -> AppResult<HttpResponse> {
    let posts = state.posts.list_recent().await?;
    tracing::debug!(count = posts.len(), "Listing posts");

    Ok(HttpResponse::Ok().json(views::post_listing(posts, &viewer, &state.content)))
}

/// GET /api/posts/{id}
pub async fn get(
    state: web::Data<AppState>,
    viewer: RequestViewer,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = load(&state, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(views::post_page(post, &viewer, &state.content)))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    viewer: RequestViewer,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let author = viewer.require_post_author()?;
    let req = body.into_inner();

    let new = NewPost::new(author.user_id, &req.title, req.content)?;
    let post = state.posts.insert(new).await?;
    tracing::info!(post_id = %post.id, "Post published");

    Ok(HttpResponse::Created().json(views::post_page(post, &viewer, &state.content)))
}

/// PUT /api/posts/{id} - fields left out stay unchanged
pub async fn update(
    state: web::Data<AppState>,
    viewer: RequestViewer,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    viewer.require_post_author()?;
    let id = path.into_inner();
    let req = body.into_inner();

    let patch = PostPatch::new(req.title.as_deref(), req.content)?;
    let post = if patch.is_empty() {
        load(&state, id).await?
    } else {
        state.posts.update(id, patch).await?
    };
    tracing::info!(post_id = %post.id, "Post updated");

    Ok(HttpResponse::Ok().json(views::post_page(post, &viewer, &state.content)))
}

/// DELETE /api/posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    viewer: RequestViewer,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    viewer.require_post_author()?;
    let id = path.into_inner();

    state.posts.delete(id).await?;
    tracing::info!(post_id = %id, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}
