//! Task board handlers. Anyone may view the board; changes need a session,
//! and the demo account has one.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use folio_core::domain::{NewTask, TaskPatch};
use folio_core::error::DomainError;
use folio_core::ports::BaseRepository;
use folio_shared::dto::{
    CreateTaskRequest, MoveTaskRequest, SetPriorityRequest, TaskResponse, UpdateTaskRequest,
};

use crate::middleware::auth::RequestViewer;
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views;

/// GET /api/tasks - the three-column board
pub async fn board(state: web::Data<AppState>, viewer: RequestViewer) -> AppResult<HttpResponse> {
    let tasks = state.tasks.list_recent().await?;

    Ok(HttpResponse::Ok().json(views::board(tasks, &viewer)))
}

/// POST /api/tasks - new tasks land in `ideas`
pub async fn create(
    state: web::Data<AppState>,
    viewer: RequestViewer,
    body: web::Json<CreateTaskRequest>,
) -> AppResult<HttpResponse> {
    let identity = viewer.require_signed_in()?;
    let req = body.into_inner();

    let new = NewTask::new(identity.user_id, &req.title, req.description, req.priority)?;
    let task = state.tasks.insert(new).await?;
    tracing::info!(task_id = %task.id, priority = %task.priority, "Task created");

    Ok(HttpResponse::Created().json(TaskResponse::from(task)))
}

async fn apply(state: &AppState, id: Uuid, patch: TaskPatch) -> AppResult<HttpResponse> {
    let task = state.tasks.update(id, patch).await?;
    Ok(HttpResponse::Ok().json(TaskResponse::from(task)))
}

/// PATCH /api/tasks/{id} - title and description
pub async fn update(
    state: web::Data<AppState>,
    viewer: RequestViewer,
    path: web::Path<Uuid>,
    body: web::Json<UpdateTaskRequest>,
) -> AppResult<HttpResponse> {
    viewer.require_signed_in()?;
    let id = path.into_inner();
    let req = body.into_inner();

    let patch = TaskPatch::details(req.title.as_deref(), req.description)?;
    if patch.is_empty() {
        let task = state
            .tasks
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound { entity_type: "Task", id })?;
        return Ok(HttpResponse::Ok().json(TaskResponse::from(task)));
    }
    apply(&state, id, patch).await
}

/// PUT /api/tasks/{id}/status
pub async fn move_to(
    state: web::Data<AppState>,
    viewer: RequestViewer,
    path: web::Path<Uuid>,
    body: web::Json<MoveTaskRequest>,
) -> AppResult<HttpResponse> {
    viewer.require_signed_in()?;
    let id = path.into_inner();
    let status = body.into_inner().status;

    tracing::debug!(task_id = %id, %status, "Moving task");
    apply(&state, id, TaskPatch::status(status)).await
}

/// PUT /api/tasks/{id}/priority
pub async fn set_priority(
    state: web::Data<AppState>,
    viewer: RequestViewer,
    path: web::Path<Uuid>,
    body: web::Json<SetPriorityRequest>,
) -> AppResult<HttpResponse> {
    viewer.require_signed_in()?;
    let patch = TaskPatch::priority(body.into_inner().priority);
    apply(&state, path.into_inner(), patch).await
}

/// DELETE /api/tasks/{id}
pub async fn delete(
    state: web::Data<AppState>,
    viewer: RequestViewer,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    viewer.require_signed_in()?;
    let id = path.into_inner();

    state.tasks.delete(id).await?;
    tracing::info!(task_id = %id, "Task deleted");

    Ok(HttpResponse::NoContent().finish())
}
