//! Optimistic route guard
//!
//! The guard only checks that a token is stored. Whether the token is still
//! accepted is decided by the server on the next request.

use std::sync::Arc;

use crate::error::ClientResult;
use crate::routes::Route;
use crate::storage::SessionStorage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    Redirect(Route),
}

pub struct AuthGuard {
    storage: Arc<dyn SessionStorage>,
}

impl AuthGuard {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    pub async fn can_activate(&self, route: Route) -> ClientResult<GuardOutcome> {
        if !route.requires_auth() {
            return Ok(GuardOutcome::Allow);
        }

        match self.storage.token().await? {
            Some(_) => Ok(GuardOutcome::Allow),
            None => {
                tracing::debug!(route = %route, "No stored token, redirecting to login");
                Ok(GuardOutcome::Redirect(Route::Login))
            }
        }
    }
}
