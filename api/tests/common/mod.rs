//! Shared fixtures for the HTTP integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{http::header, test::TestRequest};
use chrono::{Duration, Utc};
use serde_json::{json, Value};

use notifier_api::AppState;
use notifier_core::{
    BcryptPasswordHasher, ManualClock, MemoryStore, PasswordHasher, TokenService,
    TokenServiceConfig,
};
use notifier_shared::AppConfig;

pub const TTL_SECONDS: i64 = 3600;
pub const SECRET: &str = "integration-test-secret-of-32-bytes!";

/// Application wired to an in-memory store and a clock the test controls
pub struct TestContext {
    pub state: AppState,
    pub store: MemoryStore,
    pub clock: Arc<ManualClock>,
    pub config: AppConfig,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_hasher(Arc::new(BcryptPasswordHasher::new(4)))
    }

    pub fn with_hasher(hasher: Arc<dyn PasswordHasher>) -> Self {
        let store = MemoryStore::new();
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let tokens = Arc::new(TokenService::with_clock(
            TokenServiceConfig::new(SECRET, TTL_SECONDS),
            clock.clone(),
        ));
        let state = AppState::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            hasher,
            tokens,
        );

        Self {
            state,
            store,
            clock,
            config: AppConfig::default(),
        }
    }

    /// Moves the token clock forward by exactly one token lifetime
    pub fn expire_tokens(&self) {
        self.clock.advance(Duration::seconds(TTL_SECONDS));
    }
}

pub fn register_request(email: &str, password: &str) -> TestRequest {
    TestRequest::post().uri("/auth/register").set_json(json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": email,
        "password": password,
    }))
}

pub fn login_request(email: &str, password: &str) -> TestRequest {
    TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "email": email, "password": password }))
}

pub fn authorized(request: TestRequest, token: &str) -> TestRequest {
    request.insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
}

pub fn task_body(student_id: i64, title: &str, due_date: &str) -> Value {
    json!({
        "title": title,
        "description": "Chapter 3 exercises",
        "dueDate": due_date,
        "priority": "high",
        "studentId": student_id,
    })
}
