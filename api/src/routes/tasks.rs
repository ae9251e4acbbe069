//! Task endpoints under `/api/tasks`

use actix_web::{web, HttpResponse};
use notifier_core::Task;
use validator::Validate;

use crate::app::AppState;
use crate::dto::{TaskRequest, TaskResponse};
use crate::handlers::ApiError;
use crate::middleware::AuthContext;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tasks")
            .route("", web::get().to(list_tasks))
            .route("", web::post().to(create_task))
            .route("/student/{student_id}", web::get().to(list_tasks_by_student))
            .route("/{id}", web::get().to(get_task))
            .route("/{id}", web::put().to(update_task))
            .route("/{id}", web::delete().to(delete_task)),
    );
}

fn to_response(tasks: Vec<Task>) -> Vec<TaskResponse> {
    tasks.into_iter().map(TaskResponse::from).collect()
}

/// GET /api/tasks
pub async fn list_tasks(
    state: web::Data<AppState>,
    _auth: AuthContext,
) -> Result<HttpResponse, ApiError> {
    let tasks = state.task_service.find_all().await?;
    Ok(HttpResponse::Ok().json(to_response(tasks)))
}

/// GET /api/tasks/student/{student_id}
///
/// Tasks of one student, soonest due date first.
pub async fn list_tasks_by_student(
    state: web::Data<AppState>,
    _auth: AuthContext,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let tasks = state.task_service.find_by_student(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(to_response(tasks)))
}

/// GET /api/tasks/{id}
pub async fn get_task(
    state: web::Data<AppState>,
    _auth: AuthContext,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let task = state.task_service.find_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(TaskResponse::from(task)))
}

/// POST /api/tasks
pub async fn create_task(
    state: web::Data<AppState>,
    auth: AuthContext,
    request: web::Json<TaskRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    request.validate()?;

    let task = state.task_service.create(request.into()).await?;
    tracing::info!(task_id = task.id, by = auth.student_id, "Task created");

    Ok(HttpResponse::Created().json(TaskResponse::from(task)))
}

/// PUT /api/tasks/{id}
pub async fn update_task(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
    request: web::Json<TaskRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let request = request.into_inner();
    request.validate()?;

    let task = state.task_service.update(id, request.into()).await?;
    tracing::info!(task_id = id, by = auth.student_id, "Task updated");

    Ok(HttpResponse::Ok().json(TaskResponse::from(task)))
}

/// DELETE /api/tasks/{id}
pub async fn delete_task(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    state.task_service.delete(id).await?;
    tracing::info!(task_id = id, by = auth.student_id, "Task deleted");

    Ok(HttpResponse::NoContent().finish())
}
