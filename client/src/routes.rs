//! Client-side views and navigation

use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Views of the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Tasks,
    NewTask,
    EditTask(i64),
    TaskDetail(i64),
}

impl Route {
    /// Resolve a location; anything unknown lands on the login view
    pub fn from_path(path: &str) -> Route {
        let segments: Vec<&str> = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            ["register"] => Route::Register,
            ["tasks"] => Route::Tasks,
            ["tasks", "new"] => Route::NewTask,
            ["tasks", "edit", id] => id.parse().map(Route::EditTask).unwrap_or(Route::Login),
            ["tasks", id] => id.parse().map(Route::TaskDetail).unwrap_or(Route::Login),
            _ => Route::Login,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Tasks => "/tasks".to_string(),
            Route::NewTask => "/tasks/new".to_string(),
            Route::EditTask(id) => format!("/tasks/edit/{}", id),
            Route::TaskDetail(id) => format!("/tasks/{}", id),
        }
    }

    /// Whether the view needs a signed-in student
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login | Route::Register)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Moves the front end to another view
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that only records where it was sent
#[derive(Debug, Default)]
pub struct NavigationLog {
    history: Mutex<Vec<Route>>,
}

impl NavigationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<Route> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn current(&self) -> Option<Route> {
        self.history().last().copied()
    }
}

impl Navigator for NavigationLog {
    fn navigate(&self, route: Route) {
        tracing::debug!(route = %route, "Navigating");
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        let cases = [
            ("", Route::Login),
            ("/", Route::Login),
            ("/login", Route::Login),
            ("/register", Route::Register),
            ("/tasks", Route::Tasks),
            ("/tasks/", Route::Tasks),
            ("/tasks/new", Route::NewTask),
            ("/tasks/edit/7", Route::EditTask(7)),
            ("/tasks/7", Route::TaskDetail(7)),
            ("/tasks/abc", Route::Login),
            ("/somewhere/else", Route::Login),
        ];

        for (path, expected) in cases {
            assert_eq!(Route::from_path(path), expected, "{}", path);
        }
    }

    #[test]
    fn test_path_resolves_back_to_route() {
        for route in [Route::Register, Route::NewTask, Route::EditTask(3), Route::TaskDetail(4)] {
            assert_eq!(Route::from_path(&route.path()), route);
        }
    }

    #[test]
    fn test_only_login_and_register_are_public() {
        assert!(!Route::Login.requires_auth());
        assert!(!Route::Register.requires_auth());
        assert!(Route::Tasks.requires_auth());
        assert!(Route::TaskDetail(1).requires_auth());
    }

    #[test]
    fn test_navigation_log() {
        let log = NavigationLog::new();
        assert_eq!(log.current(), None);

        log.navigate(Route::Tasks);
        log.navigate(Route::Login);
        assert_eq!(log.history(), vec![Route::Tasks, Route::Login]);
        assert_eq!(log.current(), Some(Route::Login));
    }
}
