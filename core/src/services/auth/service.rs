//! Main authentication service implementation

use std::sync::Arc;

use notifier_shared::validation::mask_email;
use tokio::sync::OnceCell;

use crate::domain::entities::{NewStudent, Student};
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::StudentRepository;
use crate::services::rules::{require_email, require_name, require_password};
use crate::services::token::TokenService;

use super::password::PasswordHasher;

/// Password checked against when no account matches the email
const UNKNOWN_ACCOUNT_PASSWORD: &str = "no-account-matches-this-email";

/// Data submitted to create an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Authentication service over the credential store
pub struct AuthService {
    /// Credential store
    students: Arc<dyn StudentRepository>,
    /// Password hasher
    hasher: Arc<dyn PasswordHasher>,
    /// Token issuer/verifier
    tokens: Arc<TokenService>,
    /// Hash verified for unknown emails, produced by `hasher` on first use
    unknown_account_hash: OnceCell<String>,
}

impl AuthService {
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `students` - Credential store
    /// * `hasher` - Password hasher used at registration and login
    /// * `tokens` - Token service shared with the request filter
    pub fn new(
        students: Arc<dyn StudentRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            students,
            hasher,
            tokens,
            unknown_account_hash: OnceCell::new(),
        }
    }

    /// Register a new student and sign them in
    ///
    /// The email is stored exactly as given and compared case-sensitively.
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - The created student with a fresh token
    /// * `Err(DomainError::Validation)` - A field breaks the input rules
    /// * `Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))` - The
    ///   email is taken; nothing is written
    pub async fn register(&self, registration: Registration) -> DomainResult<AuthResponse> {
        require_name("First name", &registration.first_name)?;
        require_name("Last name", &registration.last_name)?;
        require_email(&registration.email)?;
        require_password(&registration.password)?;

        if self.students.exists_by_email(&registration.email).await? {
            tracing::warn!(
                email = %mask_email(&registration.email),
                "Registration rejected: email already registered"
            );
            return Err(AuthError::EmailAlreadyRegistered {
                email: registration.email,
            }
            .into());
        }

        let password_hash = self.hash_password(&registration.password).await?;
        let student = self
            .students
            .create(NewStudent {
                first_name: registration.first_name.trim().to_string(),
                last_name: registration.last_name.trim().to_string(),
                email: registration.email,
                password_hash,
            })
            .await?;

        let token = self.tokens.issue(&student.email)?;

        tracing::info!(
            student_id = student.id,
            email = %mask_email(&student.email),
            "Student registered"
        );

        Ok(AuthResponse::new(token, student))
    }

    /// Log in with email and password
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - A fresh token for the student
    /// * `Err(DomainError::Auth(AuthError::InvalidCredentials))` - Unknown
    ///   email or wrong password, reported identically
    ///
    /// An unknown email still pays for a full password check, so both
    /// failures take the same time.
    pub async fn login(&self, email: &str, raw_password: &str) -> DomainResult<AuthResponse> {
        let found = self.students.find_by_email(email).await?;
        let password_hash = match &found {
            Some(student) => student.password_hash.clone(),
            None => self.unknown_account_hash().await?.to_string(),
        };
        let matches = self.verify_password(raw_password, &password_hash).await?;

        let student = match found {
            Some(student) if matches => student,
            _ => {
                tracing::info!(email = %mask_email(email), "Login failed");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        let token = self.tokens.issue(&student.email)?;

        tracing::info!(student_id = student.id, "Student logged in");

        Ok(AuthResponse::new(token, student))
    }

    /// Resolve a bearer token to the student it was issued for
    ///
    /// The subject is re-checked against the store so a token outlives
    /// neither the account nor a change of its email.
    ///
    /// # Returns
    ///
    /// * `Ok(Student)` - Token valid and the subject still exists
    /// * `Err(DomainError::Token(_))` - Malformed, forged or expired token
    /// * `Err(DomainError::Auth(AuthError::Unauthenticated))` - Subject is gone
    pub async fn authenticate(&self, token: &str) -> DomainResult<Student> {
        let claims = self.tokens.verify(token)?;

        self.students
            .find_by_email(claims.subject())
            .await?
            .ok_or_else(|| AuthError::Unauthenticated.into())
    }

    async fn unknown_account_hash(&self) -> DomainResult<&str> {
        self.unknown_account_hash
            .get_or_try_init(|| self.hash_password(UNKNOWN_ACCOUNT_PASSWORD))
            .await
            .map(String::as_str)
    }

    /// bcrypt runs on the blocking pool, off the request worker
    async fn hash_password(&self, raw_password: &str) -> DomainResult<String> {
        let hasher = Arc::clone(&self.hasher);
        let raw_password = raw_password.to_string();
        tokio::task::spawn_blocking(move || hasher.hash(&raw_password))
            .await
            .map_err(blocking_task_failed)?
    }

    async fn verify_password(&self, raw_password: &str, password_hash: &str) -> DomainResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        let raw_password = raw_password.to_string();
        let password_hash = password_hash.to_string();
        tokio::task::spawn_blocking(move || hasher.verify(&raw_password, &password_hash))
            .await
            .map_err(blocking_task_failed)
    }

    /// The token service backing this instance
    pub fn token_service(&self) -> &Arc<TokenService> {
        &self.tokens
    }
}

fn blocking_task_failed(error: tokio::task::JoinError) -> DomainError {
    tracing::error!(error = %error, "Password task did not complete");
    DomainError::Internal {
        message: "Password processing failed".to_string(),
    }
}
