//! Local persistence of the signed-in session
//!
//! Every read goes to the backing store; nothing is cached in memory between
//! calls, so two requests in flight never see a stale copy of the token.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{ClientError, ClientResult};
use crate::models::{Session, Student};

/// Durable store for the token and the student it belongs to
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Stored session, if any
    async fn load(&self) -> ClientResult<Option<Session>>;

    /// Replace the stored session
    async fn save(&self, session: &Session) -> ClientResult<()>;

    /// Forget the stored session; clearing an empty store is not an error
    async fn clear(&self) -> ClientResult<()>;

    async fn token(&self) -> ClientResult<Option<String>> {
        Ok(self.load().await?.map(|session| session.token))
    }

    async fn current_student(&self) -> ClientResult<Option<Student>> {
        Ok(self.load().await?.map(|session| session.student))
    }
}

/// Session kept as a JSON file, surviving process restarts
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStorage for FileSessionStorage {
    async fn load(&self) -> ClientResult<Option<Session>> {
        let contents = match tokio::fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice(&contents) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                // A corrupt file is treated as signed out
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring unreadable session file");
                Ok(None)
            }
        }
    }

    async fn save(&self, session: &Session) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let contents =
            serde_json::to_vec(session).map_err(|e| ClientError::Storage(e.to_string()))?;
        tokio::fs::write(&self.path, contents).await?;
        Ok(())
    }

    async fn clear(&self) -> ClientResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Session held in process memory only
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    session: RwLock<Option<Session>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStorage for MemorySessionStorage {
    async fn load(&self) -> ClientResult<Option<Session>> {
        Ok(self.session.read().await.clone())
    }

    async fn save(&self, session: &Session) -> ClientResult<()> {
        *self.session.write().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> ClientResult<()> {
        *self.session.write().await = None;
        Ok(())
    }
}
