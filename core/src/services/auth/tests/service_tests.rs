//! Unit tests for authentication service

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration as StdDuration, Instant};

use chrono::{Duration, Utc};

use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::{MemoryStore, StudentRepository};
use crate::services::auth::{AuthService, BcryptPasswordHasher, PasswordHasher, Registration};
use crate::services::token::{ManualClock, TokenService, TokenServiceConfig};

struct Fixture {
    service: AuthService,
    store: MemoryStore,
    clock: Arc<ManualClock>,
}

/// Hasher that counts calls and can be made slow
struct InstrumentedHasher {
    inner: BcryptPasswordHasher,
    delay: StdDuration,
    hashes: AtomicUsize,
    verifies: AtomicUsize,
}

impl InstrumentedHasher {
    fn new(delay: StdDuration) -> Self {
        Self {
            inner: BcryptPasswordHasher::new(4),
            delay,
            hashes: AtomicUsize::new(0),
            verifies: AtomicUsize::new(0),
        }
    }

    fn hashes(&self) -> usize {
        self.hashes.load(Ordering::SeqCst)
    }

    fn verifies(&self) -> usize {
        self.verifies.load(Ordering::SeqCst)
    }
}

impl PasswordHasher for InstrumentedHasher {
    fn hash(&self, raw_password: &str) -> Result<String, DomainError> {
        self.hashes.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        self.inner.hash(raw_password)
    }

    fn verify(&self, raw_password: &str, password_hash: &str) -> bool {
        self.verifies.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        self.inner.verify(raw_password, password_hash)
    }
}

fn fixture() -> Fixture {
    fixture_with(Arc::new(BcryptPasswordHasher::new(4)))
}

fn fixture_with(hasher: Arc<dyn PasswordHasher>) -> Fixture {
    let store = MemoryStore::new();
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let tokens = Arc::new(TokenService::with_clock(
        TokenServiceConfig::new("auth-service-test-secret-32-bytes!!", 600),
        clock.clone(),
    ));
    let service = AuthService::new(Arc::new(store.clone()), hasher, tokens);
    Fixture {
        service,
        store,
        clock,
    }
}

fn registration(email: &str, password: &str) -> Registration {
    Registration {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_register_stores_hashed_password_and_issues_token() {
    let f = fixture();

    let response = f.service.register(registration("a@x.com", "secret1")).await.unwrap();

    assert_eq!(response.student.email, "a@x.com");
    assert_ne!(response.student.password_hash, "secret1");
    assert!(response.student.password_hash.starts_with("$2"));
    assert_eq!(response.expires_in(), Duration::seconds(600));

    let verified = f.service.token_service().verify_subject(&response.token.token).unwrap();
    assert_eq!(verified, "a@x.com");
}

#[tokio::test]
async fn test_register_duplicate_email_is_conflict_and_store_unchanged() {
    let f = fixture();
    let first = f.service.register(registration("a@x.com", "secret1")).await.unwrap();

    let result = f.service.register(registration("a@x.com", "other-password")).await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::EmailAlreadyRegistered { ref email })) if email == "a@x.com"
    ));
    let all = f.store.find_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], first.student);
}

#[tokio::test]
async fn test_register_rejects_invalid_input() {
    let f = fixture();

    let short_password = f.service.register(registration("a@x.com", "12345")).await;
    assert!(matches!(short_password, Err(DomainError::Validation { .. })));

    let bad_email = f.service.register(registration("not-an-email", "secret1")).await;
    assert!(matches!(bad_email, Err(DomainError::Validation { .. })));

    let mut blank_name = registration("a@x.com", "secret1");
    blank_name.first_name = "  ".to_string();
    assert!(matches!(
        f.service.register(blank_name).await,
        Err(DomainError::Validation { .. })
    ));

    assert!(f.store.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_login_returns_fresh_independent_token() {
    let f = fixture();
    let registered = f.service.register(registration("a@x.com", "secret1")).await.unwrap();

    let logged_in = f.service.login("a@x.com", "secret1").await.unwrap();

    assert_eq!(logged_in.student.id, registered.student.id);
    assert_ne!(logged_in.token.token, registered.token.token);
    assert!(f.service.authenticate(&registered.token.token).await.is_ok());
    assert!(f.service.authenticate(&logged_in.token.token).await.is_ok());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let f = fixture();
    f.service.register(registration("a@x.com", "secret1")).await.unwrap();

    let wrong_password = f.service.login("a@x.com", "wrong-password").await.unwrap_err();
    let unknown_email = f.service.login("nobody@x.com", "secret1").await.unwrap_err();

    assert!(matches!(wrong_password, DomainError::Auth(AuthError::InvalidCredentials)));
    assert!(matches!(unknown_email, DomainError::Auth(AuthError::InvalidCredentials)));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[tokio::test]
async fn test_unknown_email_still_checks_a_password() {
    let hasher = Arc::new(InstrumentedHasher::new(StdDuration::ZERO));
    let f = fixture_with(hasher.clone());
    f.service.register(registration("a@x.com", "secret1")).await.unwrap();
    assert_eq!(hasher.verifies(), 0);

    f.service.login("a@x.com", "wrong-password").await.unwrap_err();
    assert_eq!(hasher.verifies(), 1);

    f.service.login("nobody@x.com", "secret1").await.unwrap_err();
    assert_eq!(hasher.verifies(), 2);
    let hashes_after_first_unknown = hasher.hashes();

    // The placeholder hash is produced once and reused
    f.service.login("someone-else@x.com", "secret1").await.unwrap_err();
    assert_eq!(hasher.verifies(), 3);
    assert_eq!(hasher.hashes(), hashes_after_first_unknown);
}

#[tokio::test]
async fn test_password_hashing_does_not_block_the_runtime() {
    let hasher = Arc::new(InstrumentedHasher::new(StdDuration::from_millis(300)));
    let service = Arc::new(fixture_with(hasher).service);

    let started = Instant::now();
    let pending = tokio::spawn({
        let service = Arc::clone(&service);
        async move { service.register(registration("a@x.com", "secret1")).await }
    });

    // Single-threaded runtime: this timer only fires on time if hashing runs elsewhere
    tokio::time::sleep(StdDuration::from_millis(20)).await;
    assert!(started.elapsed() < StdDuration::from_millis(200));
    assert!(!pending.is_finished());

    assert!(pending.await.unwrap().is_ok());
}

#[tokio::test]
async fn test_email_matching_is_case_sensitive() {
    let f = fixture();
    f.service.register(registration("a@x.com", "secret1")).await.unwrap();

    // A differently-cased address is a different account
    let login = f.service.login("A@X.com", "secret1").await;
    assert!(matches!(login, Err(DomainError::Auth(AuthError::InvalidCredentials))));

    let second = f.service.register(registration("A@X.com", "secret1")).await;
    assert!(second.is_ok());
    assert_eq!(f.store.find_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_authenticate_rejects_expired_token() {
    let f = fixture();
    let response = f.service.register(registration("a@x.com", "secret1")).await.unwrap();

    f.clock.advance(Duration::seconds(600));

    let result = f.service.authenticate(&response.token.token).await;
    assert!(matches!(result, Err(DomainError::Token(TokenError::Expired))));
}

#[tokio::test]
async fn test_authenticate_rejects_token_of_deleted_student() {
    let f = fixture();
    let response = f.service.register(registration("a@x.com", "secret1")).await.unwrap();

    f.store.delete(response.student.id).await.unwrap();

    let result = f.service.authenticate(&response.token.token).await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::Unauthenticated))));
}

#[tokio::test]
async fn test_authenticate_rejects_garbage() {
    let f = fixture();
    let result = f.service.authenticate("garbage").await;
    assert!(matches!(result, Err(DomainError::Token(TokenError::Malformed))));
}
