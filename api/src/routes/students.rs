//! Student endpoints under `/api/students`
//!
//! Students are created through `/auth/register`, so there is no `POST` here.

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::{StudentResponse, UpdateStudentRequest};
use crate::handlers::ApiError;
use crate::middleware::AuthContext;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/students")
            .route("", web::get().to(list_students))
            .route("/{id}", web::get().to(get_student))
            .route("/{id}", web::put().to(update_student))
            .route("/{id}", web::delete().to(delete_student)),
    );
}

/// GET /api/students
pub async fn list_students(
    state: web::Data<AppState>,
    _auth: AuthContext,
) -> Result<HttpResponse, ApiError> {
    let students = state.student_service.find_all().await?;
    let body: Vec<StudentResponse> = students.into_iter().map(StudentResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/students/{id}
pub async fn get_student(
    state: web::Data<AppState>,
    _auth: AuthContext,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let student = state.student_service.find_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(StudentResponse::from(student)))
}

/// PUT /api/students/{id}
///
/// Replaces name and email. The password is not changed here.
pub async fn update_student(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
    request: web::Json<UpdateStudentRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let request = request.into_inner();
    request.validate()?;

    let student = state.student_service.update(id, request.into()).await?;
    tracing::info!(student_id = id, by = auth.student_id, "Student updated");

    Ok(HttpResponse::Ok().json(StudentResponse::from(student)))
}

/// DELETE /api/students/{id}
///
/// Removes the student together with its tasks and their subtasks.
pub async fn delete_student(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    state.student_service.delete(id).await?;
    tracing::info!(student_id = id, by = auth.student_id, "Student deleted");

    Ok(HttpResponse::NoContent().finish())
}
