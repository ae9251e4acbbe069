//! Subtask endpoints under `/api/subtasks`

use actix_web::{web, HttpResponse};
use notifier_core::SubTask;
use validator::Validate;

use crate::app::AppState;
use crate::dto::{SubTaskRequest, SubTaskResponse};
use crate::handlers::ApiError;
use crate::middleware::AuthContext;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/subtasks")
            .route("", web::get().to(list_subtasks))
            .route("", web::post().to(create_subtask))
            .route("/task/{task_id}", web::get().to(list_subtasks_by_task))
            .route("/{id}", web::get().to(get_subtask))
            .route("/{id}", web::put().to(update_subtask))
            .route("/{id}", web::delete().to(delete_subtask)),
    );
}

fn to_response(subtasks: Vec<SubTask>) -> Vec<SubTaskResponse> {
    subtasks.into_iter().map(SubTaskResponse::from).collect()
}

/// GET /api/subtasks
pub async fn list_subtasks(
    state: web::Data<AppState>,
    _auth: AuthContext,
) -> Result<HttpResponse, ApiError> {
    let subtasks = state.subtask_service.find_all().await?;
    Ok(HttpResponse::Ok().json(to_response(subtasks)))
}

/// GET /api/subtasks/task/{task_id}
pub async fn list_subtasks_by_task(
    state: web::Data<AppState>,
    _auth: AuthContext,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let subtasks = state.subtask_service.find_by_task(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(to_response(subtasks)))
}

/// GET /api/subtasks/{id}
pub async fn get_subtask(
    state: web::Data<AppState>,
    _auth: AuthContext,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let subtask = state.subtask_service.find_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(SubTaskResponse::from(subtask)))
}

/// POST /api/subtasks
pub async fn create_subtask(
    state: web::Data<AppState>,
    auth: AuthContext,
    request: web::Json<SubTaskRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    request.validate()?;

    let subtask = state.subtask_service.create(request.into()).await?;
    tracing::info!(subtask_id = subtask.id, task_id = subtask.task_id, by = auth.student_id, "Subtask created");

    Ok(HttpResponse::Created().json(SubTaskResponse::from(subtask)))
}

/// PUT /api/subtasks/{id}
pub async fn update_subtask(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
    request: web::Json<SubTaskRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let request = request.into_inner();
    request.validate()?;

    let subtask = state.subtask_service.update(id, request.into()).await?;
    tracing::info!(subtask_id = id, by = auth.student_id, "Subtask updated");

    Ok(HttpResponse::Ok().json(SubTaskResponse::from(subtask)))
}

/// DELETE /api/subtasks/{id}
pub async fn delete_subtask(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    state.subtask_service.delete(id).await?;
    tracing::info!(subtask_id = id, by = auth.student_id, "Subtask deleted");

    Ok(HttpResponse::NoContent().finish())
}
