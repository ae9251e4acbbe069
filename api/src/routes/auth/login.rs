use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::{AuthResponse, LoginRequest};
use crate::handlers::ApiError;

/// Handler for POST /auth/login
///
/// Every successful login issues a new token; earlier tokens stay valid
/// until they expire.
///
/// ## Errors
/// - 400 Bad Request: Empty email or password
/// - 401 Unauthorized: Unknown email or wrong password, indistinguishably
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    request.validate()?;

    let session = state
        .auth_service
        .login(&request.email, &request.password)
        .await?;

    Ok(HttpResponse::Ok().json(AuthResponse::from(session)))
}
