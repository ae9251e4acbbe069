//! HTTP client with the session interceptor built in
//!
//! Every request outside `/auth/` reads the stored token once and sends it as
//! a bearer credential. A `401` on such a request means the server no longer
//! accepts that token. If it is still the stored one, storage is cleared,
//! subscribers are told and the front end is sent to the login view.

use std::sync::Arc;

use reqwest::{Method, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::{ClientError, ClientResult};
use crate::models::{
    LoginRequest, RegisterRequest, Session, Student, StudentUpdate, SubTask, SubTaskRequest, Task,
    TaskRequest,
};
use crate::routes::{Navigator, Route};
use crate::storage::SessionStorage;

const AUTH_PATH_MARKER: &str = "/auth/";

/// Error body sent by the server
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    storage: Arc<dyn SessionStorage>,
    navigator: Arc<dyn Navigator>,
    authenticated: watch::Sender<bool>,
}

impl ApiClient {
    /// Create a client for the API at `base_url`, e.g. `http://localhost:8080`
    ///
    /// Starts signed out; call [`ApiClient::restore`] to pick up a stored session.
    pub fn new(
        base_url: impl Into<String>,
        storage: Arc<dyn SessionStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let (authenticated, _) = watch::channel(false);
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            storage,
            navigator,
            authenticated,
        }
    }

    /// Publish whether a token is stored and return it
    pub async fn restore(&self) -> ClientResult<bool> {
        let signed_in = self.storage.token().await?.is_some();
        self.authenticated.send_replace(signed_in);
        Ok(signed_in)
    }

    /// Receiver that sees every sign-in and sign-out
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.authenticated.subscribe()
    }

    pub async fn is_authenticated(&self) -> ClientResult<bool> {
        Ok(self.storage.token().await?.is_some())
    }

    pub async fn current_student(&self) -> ClientResult<Option<Student>> {
        self.storage.current_student().await
    }

    // Authentication

    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<Session> {
        let session: Session = self.send_json(Method::POST, "/auth/register", Some(request)).await?;
        self.start_session(&session).await?;
        Ok(session)
    }

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<Session> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let session: Session = self.send_json(Method::POST, "/auth/login", Some(&request)).await?;
        self.start_session(&session).await?;
        Ok(session)
    }

    /// Forget the local session; the token itself stays valid until it expires
    pub async fn logout(&self) -> ClientResult<()> {
        self.storage.clear().await?;
        self.authenticated.send_replace(false);
        tracing::info!("Signed out");
        Ok(())
    }

    // Tasks

    pub async fn list_tasks(&self) -> ClientResult<Vec<Task>> {
        self.send_json(Method::GET, "/api/tasks", None::<&()>).await
    }

    pub async fn get_task(&self, id: i64) -> ClientResult<Task> {
        self.send_json(Method::GET, &format!("/api/tasks/{}", id), None::<&()>).await
    }

    pub async fn tasks_for_student(&self, student_id: i64) -> ClientResult<Vec<Task>> {
        self.send_json(Method::GET, &format!("/api/tasks/student/{}", student_id), None::<&()>)
            .await
    }

    pub async fn create_task(&self, task: &TaskRequest) -> ClientResult<Task> {
        self.send_json(Method::POST, "/api/tasks", Some(task)).await
    }

    pub async fn update_task(&self, id: i64, task: &TaskRequest) -> ClientResult<Task> {
        self.send_json(Method::PUT, &format!("/api/tasks/{}", id), Some(task)).await
    }

    pub async fn delete_task(&self, id: i64) -> ClientResult<()> {
        self.send(Method::DELETE, &format!("/api/tasks/{}", id), None::<&()>).await?;
        Ok(())
    }

    // Subtasks

    pub async fn list_subtasks(&self) -> ClientResult<Vec<SubTask>> {
        self.send_json(Method::GET, "/api/subtasks", None::<&()>).await
    }

    pub async fn get_subtask(&self, id: i64) -> ClientResult<SubTask> {
        self.send_json(Method::GET, &format!("/api/subtasks/{}", id), None::<&()>).await
    }

    pub async fn subtasks_for_task(&self, task_id: i64) -> ClientResult<Vec<SubTask>> {
        self.send_json(Method::GET, &format!("/api/subtasks/task/{}", task_id), None::<&()>)
            .await
    }

    pub async fn create_subtask(&self, subtask: &SubTaskRequest) -> ClientResult<SubTask> {
        self.send_json(Method::POST, "/api/subtasks", Some(subtask)).await
    }

    pub async fn update_subtask(&self, id: i64, subtask: &SubTaskRequest) -> ClientResult<SubTask> {
        self.send_json(Method::PUT, &format!("/api/subtasks/{}", id), Some(subtask)).await
    }

    pub async fn delete_subtask(&self, id: i64) -> ClientResult<()> {
        self.send(Method::DELETE, &format!("/api/subtasks/{}", id), None::<&()>).await?;
        Ok(())
    }

    // Students

    pub async fn list_students(&self) -> ClientResult<Vec<Student>> {
        self.send_json(Method::GET, "/api/students", None::<&()>).await
    }

    pub async fn get_student(&self, id: i64) -> ClientResult<Student> {
        self.send_json(Method::GET, &format!("/api/students/{}", id), None::<&()>).await
    }

    pub async fn update_student(&self, id: i64, update: &StudentUpdate) -> ClientResult<Student> {
        self.send_json(Method::PUT, &format!("/api/students/{}", id), Some(update)).await
    }

    pub async fn delete_student(&self, id: i64) -> ClientResult<()> {
        self.send(Method::DELETE, &format!("/api/students/{}", id), None::<&()>).await?;
        Ok(())
    }

    async fn start_session(&self, session: &Session) -> ClientResult<()> {
        self.storage.save(session).await?;
        self.authenticated.send_replace(true);
        tracing::info!(student_id = session.student.id, "Signed in");
        Ok(())
    }

    /// Drop the local session after the server refused `rejected_token`
    ///
    /// A sign-in that completed while the request was in flight stored a
    /// different token; that session is left alone.
    async fn end_session(&self, rejected_token: Option<&str>) -> ClientResult<()> {
        if self.storage.token().await?.as_deref() != rejected_token {
            tracing::debug!("Ignoring rejection of a token that was already replaced");
            return Ok(());
        }

        self.storage.clear().await?;
        self.authenticated.send_replace(false);
        self.navigator.navigate(Route::Login);
        Ok(())
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(method, path, body).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> ClientResult<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let is_auth_request = path.contains(AUTH_PATH_MARKER);

        let mut request = self.http.request(method, &url);
        let mut sent_token = None;
        if !is_auth_request {
            sent_token = self.storage.token().await?;
            if let Some(token) = &sent_token {
                request = request.bearer_auth(token);
            }
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "Request did not reach the server");
            ClientError::Connection(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED && !is_auth_request {
            tracing::info!(path = %path, "Session rejected by the server");
            self.end_session(sent_token.as_deref()).await?;
            return Err(ClientError::Unauthorized);
        }

        Err(api_error(response).await)
    }
}

/// Build an error from a failed response, preferring the server's message
async fn api_error(response: Response) -> ClientError {
    let status = response.status();
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| default_message(status).to_string());

    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}

fn default_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::UNAUTHORIZED => "Invalid credentials",
        StatusCode::NOT_FOUND => "Resource not found",
        StatusCode::CONFLICT => "Email is already registered",
        _ => "An error occurred",
    }
}
