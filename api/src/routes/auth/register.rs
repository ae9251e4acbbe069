use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::{AuthResponse, RegisterRequest};
use crate::handlers::ApiError;

/// Handler for POST /auth/register
///
/// Creates a student account and signs it in.
///
/// # Request Body
///
/// ```json
/// {
///     "firstName": "Ada",
///     "lastName": "Lovelace",
///     "email": "ada@example.com",
///     "password": "secret1"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {
///     "token": "eyJhbGciOiJIUzI1NiJ9...",
///     "student": { "id": 1, "firstName": "Ada", "lastName": "Lovelace", "email": "ada@example.com", "createdAt": "..." }
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Missing or malformed fields
/// - 409 Conflict: Email already registered
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    request.validate()?;

    let session = state.auth_service.register(request.into()).await?;

    Ok(HttpResponse::Created().json(AuthResponse::from(session)))
}
