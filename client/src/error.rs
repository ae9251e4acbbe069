//! Client-side error type

use thiserror::Error;

/// Errors surfaced to the caller of [`crate::ApiClient`]
#[derive(Error, Debug)]
pub enum ClientError {
    /// The server rejected the stored token; the local session has been cleared
    #[error("Your session has ended, please sign in again")]
    Unauthorized,

    /// The server answered with a non-success status
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Could not connect to the server: {0}")]
    Connection(String),

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl ClientError {
    /// HTTP status behind the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized => Some(401),
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(error: std::io::Error) -> Self {
        ClientError::Storage(error.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
