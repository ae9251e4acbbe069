//! Bearer token authentication for API requests.
//!
//! Two layers cooperate:
//! - [`JwtAuth`] runs on every request. A valid `Authorization: Bearer`
//!   token whose subject still exists attaches an [`AuthContext`] to the
//!   request. Anything else is logged and the request continues
//!   unauthenticated.
//! - [`RequireAuth`] wraps the protected scope and answers `401` when no
//!   context was attached.
//!
//! Handlers receive the identity explicitly through the [`AuthContext`]
//! extractor.

use actix_web::{
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use notifier_core::{AuthService, Student};
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use crate::handlers::ApiError;

/// Identity of the student making the request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub student_id: i64,
    pub email: String,
}

impl From<&Student> for AuthContext {
    fn from(student: &Student) -> Self {
        Self {
            student_id: student.id,
            email: student.email.clone(),
        }
    }
}

/// JWT authentication middleware factory
pub struct JwtAuth {
    auth_service: Arc<AuthService>,
}

impl JwtAuth {
    pub fn new(auth_service: Arc<AuthService>) -> Self {
        Self { auth_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            auth_service: Arc::clone(&self.auth_service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    auth_service: Arc<AuthService>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let auth_service = Arc::clone(&self.auth_service);

        Box::pin(async move {
            if let Some(token) = extract_bearer_token(&req) {
                match auth_service.authenticate(&token).await {
                    Ok(student) => {
                        tracing::debug!(student_id = student.id, "Request authenticated");
                        req.extensions_mut().insert(AuthContext::from(&student));
                    }
                    Err(e) => {
                        // The token itself is never logged
                        tracing::warn!(
                            path = %req.path(),
                            reason = %e,
                            "Bearer token rejected; continuing unauthenticated"
                        );
                    }
                }
            }

            service.call(req).await
        })
    }
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

/// Route guard for scopes that need an authenticated student
pub struct RequireAuth;

impl<S, B> Transform<S, ServiceRequest> for RequireAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAuthMiddleware { service }))
    }
}

pub struct RequireAuthMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequireAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let authenticated = req.extensions().contains::<AuthContext>();

        if !authenticated {
            tracing::debug!(path = %req.path(), "Unauthenticated request to protected route");
            let response = ApiError::unauthenticated().error_response();
            return Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) });
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(ApiError::unauthenticated);

        ready(result)
    }
}
