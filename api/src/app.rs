//! Application state and factory
//!
//! This module handles the wiring of services into the shared application
//! state and provides the factory for creating the Actix-web application.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    http::StatusCode,
    web, App, Error, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use notifier_core::{
    AuthService, MemoryStore, PasswordHasher, StudentRepository, StudentService, SubTaskRepository,
    SubTaskService, TaskRepository, TaskService, TokenService,
};
use notifier_shared::{error_codes, AppConfig, ErrorResponse};

use crate::dto::ErrorResponseExt;
use crate::handlers::ApiError;
use crate::middleware::{create_cors, JwtAuth, RequireAuth};
use crate::routes;

/// Services shared by every worker
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub student_service: Arc<StudentService>,
    pub task_service: Arc<TaskService>,
    pub subtask_service: Arc<SubTaskService>,
}

impl AppState {
    pub fn new(
        students: Arc<dyn StudentRepository>,
        tasks: Arc<dyn TaskRepository>,
        subtasks: Arc<dyn SubTaskRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(Arc::clone(&students), hasher, tokens)),
            student_service: Arc::new(StudentService::new(Arc::clone(&students))),
            task_service: Arc::new(TaskService::new(Arc::clone(&tasks), students)),
            subtask_service: Arc::new(SubTaskService::new(subtasks, tasks)),
        }
    }

    /// State backed by a fresh in-memory store
    pub fn in_memory(hasher: Arc<dyn PasswordHasher>, tokens: Arc<TokenService>) -> Self {
        let store = MemoryStore::new();
        Self::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store),
            hasher,
            tokens,
        )
    }
}

/// Create and configure the application with all dependencies
///
/// Middleware order, outermost first: request tracing, CORS, then bearer
/// token authentication. The `/api` scope additionally requires an
/// authenticated student.
pub fn create_app(
    state: AppState,
    config: &AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let json_config = web::JsonConfig::default()
        .limit(config.server.max_payload_size)
        .error_handler(|err, _req| ApiError::bad_request(err.to_string()).into());
    let path_config = web::PathConfig::default()
        .error_handler(|err, _req| ApiError::bad_request(err.to_string()).into());

    let auth_service = Arc::clone(&state.auth_service);

    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config)
        .app_data(path_config)
        .wrap(JwtAuth::new(auth_service))
        .wrap(create_cors(&config.cors))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(web::scope("/auth").configure(routes::auth::configure))
        .service(
            web::scope("/api")
                .wrap(RequireAuth)
                .configure(routes::students::configure)
                .configure(routes::tasks::configure)
                .configure(routes::subtasks::configure),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "notifier-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    ErrorResponse::new(error_codes::NOT_FOUND, "The requested resource was not found")
        .to_response(StatusCode::NOT_FOUND)
}
