//! End-to-end authentication flow over the HTTP surface

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use actix_web::{http::StatusCode, test};
use futures_util::future;
use serde_json::Value;

use common::{authorized, login_request, register_request, TestContext};
use notifier_api::create_app;
use notifier_core::{BcryptPasswordHasher, DomainError, PasswordHasher, StudentRepository};

/// bcrypt at test cost plus a fixed pause standing in for a production work factor
struct SlowHasher {
    inner: BcryptPasswordHasher,
    pause: Duration,
}

impl PasswordHasher for SlowHasher {
    fn hash(&self, raw_password: &str) -> Result<String, DomainError> {
        std::thread::sleep(self.pause);
        self.inner.hash(raw_password)
    }

    fn verify(&self, raw_password: &str, password_hash: &str) -> bool {
        std::thread::sleep(self.pause);
        self.inner.verify(raw_password, password_hash)
    }
}

#[actix_web::test]
async fn test_register_returns_token_and_public_student() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let resp = test::call_service(&app, register_request("a@x.com", "secret1").to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["student"]["email"], "a@x.com");
    assert_eq!(body["student"]["firstName"], "Ada");
    assert!(body["student"].get("passwordHash").is_none());
    assert!(body["student"].get("password").is_none());
}

#[actix_web::test]
async fn test_full_session_lifecycle_until_expiry() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let registered: Value =
        test::call_and_read_body_json(&app, register_request("a@x.com", "secret1").to_request()).await;
    let token_a = registered["token"].as_str().unwrap().to_string();

    let resp = test::call_service(&app, login_request("a@x.com", "secret1").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let logged_in: Value = test::read_body_json(resp).await;
    let token_b = logged_in["token"].as_str().unwrap().to_string();
    assert_ne!(token_a, token_b);

    let resp = test::call_service(
        &app,
        authorized(test::TestRequest::get().uri("/api/tasks"), &token_b).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/tasks").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    ctx.expire_tokens();

    for token in [&token_a, &token_b] {
        let resp = test::call_service(
            &app,
            authorized(test::TestRequest::get().uri("/api/tasks"), token).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}

#[actix_web::test]
async fn test_duplicate_registration_is_conflict() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let first = test::call_service(&app, register_request("a@x.com", "secret1").to_request()).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = test::call_service(&app, register_request("a@x.com", "another1").to_request()).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(second).await;
    assert_eq!(body["error"], "EMAIL_ALREADY_REGISTERED");
    assert!(body["timestamp"].is_string());

    assert_eq!(ctx.store.find_all().await.unwrap().len(), 1);
}

#[actix_web::test]
async fn test_login_failures_are_indistinguishable() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;
    test::call_service(&app, register_request("a@x.com", "secret1").to_request()).await;

    let wrong_password = test::call_service(&app, login_request("a@x.com", "nope123").to_request()).await;
    let unknown_email = test::call_service(&app, login_request("b@x.com", "secret1").to_request()).await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let a: Value = test::read_body_json(wrong_password).await;
    let b: Value = test::read_body_json(unknown_email).await;
    assert_eq!(a["error"], b["error"]);
    assert_eq!(a["message"], b["message"]);
}

#[actix_web::test]
async fn test_login_email_is_case_sensitive() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;
    test::call_service(&app, register_request("a@x.com", "secret1").to_request()).await;

    let resp = test::call_service(&app, login_request("A@X.COM", "secret1").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_register_validation_errors() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let resp = test::call_service(&app, register_request("not-an-email", "secret1").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["email"].is_array());

    let resp = test::call_service(&app, register_request("a@x.com", "12345").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Well-formed but longer than the column allows
    let long_email = format!("{}@{}.com", "a".repeat(50), "b".repeat(60));
    let resp = test::call_service(&app, register_request(&long_email, "secret1").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["details"]["email"],
        serde_json::json!(["Email must be at most 100 characters"])
    );

    assert!(ctx.store.find_all().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"email\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "BAD_REQUEST");
}

#[actix_web::test]
async fn test_health_is_served_while_a_registration_hashes() {
    let ctx = TestContext::with_hasher(Arc::new(SlowHasher {
        inner: BcryptPasswordHasher::new(4),
        pause: Duration::from_millis(300),
    }));
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let started = Instant::now();
    let registration = test::call_service(&app, register_request("a@x.com", "secret1").to_request());
    let health = async {
        let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        (resp.status(), started.elapsed())
    };

    let (registered, (health_status, health_elapsed)) = future::join(registration, health).await;

    assert_eq!(health_status, StatusCode::OK);
    assert!(health_elapsed < Duration::from_millis(200));
    assert_eq!(registered.status(), StatusCode::CREATED);
    assert!(started.elapsed() >= Duration::from_millis(300));
}
