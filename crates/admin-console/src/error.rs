// crates/admin-console/src/error.rs
// Standardized error types for the admin console

use crate::api::ApiError;
use std::fmt;
use thiserror::Error;

/// Console operation that a failure is reported against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Login,
    ViewDashboard,
    ListUsers,
    LoadUser,
    CreateUser,
    UpdateUser,
    DeleteUser,
    ListRoles,
}

impl Action {
    /// Phrase completing "You do not have permission to ..."
    pub fn permission_phrase(self) -> &'static str {
        match self {
            Action::Login => "log in",
            Action::ViewDashboard => "view the dashboard",
            Action::ListUsers => "view users",
            Action::LoadUser | Action::UpdateUser => "edit users",
            Action::CreateUser => "create users",
            Action::DeleteUser => "delete users",
            Action::ListRoles => "view roles",
        }
    }

    /// Phrase completing "Failed to ..."
    pub fn failure_phrase(self) -> &'static str {
        match self {
            Action::Login => "log in",
            Action::ViewDashboard => "load dashboard data",
            Action::ListUsers => "load users",
            Action::LoadUser => "load user",
            Action::CreateUser => "create user",
            Action::UpdateUser => "update user",
            Action::DeleteUser => "delete user",
            Action::ListRoles => "load roles",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.failure_phrase())
    }
}

/// Main error type for the admin console library
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("failed to {action}: {source}")]
    Api {
        action: Action,
        #[source]
        source: ApiError,
    },

    #[error("access denied: {0}")]
    AccessDenied(String),

    #[error("you cannot {0} your own account")]
    SelfModification(&'static str),

    #[error("validation failed: {0}")]
    Validation(#[from] crate::validation::FormErrors),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Result using ConsoleError
pub type Result<T> = std::result::Result<T, ConsoleError>;

impl ConsoleError {
    /// Attach the failed action to a gateway error
    pub fn api(action: Action, source: ApiError) -> Self {
        ConsoleError::Api { action, source }
    }

    /// The gateway error behind this failure, if any
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            ConsoleError::Api { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Message suitable for showing to the operator.
    ///
    /// Gateway failures are permission-specific for 403 and generic
    /// otherwise; the raw server message is left for the logs.
    pub fn to_user_string(&self) -> String {
        match self {
            ConsoleError::Api { action, source } if source.is_forbidden() => {
                format!("You do not have permission to {}", action.permission_phrase())
            }
            ConsoleError::Api {
                action: Action::Login,
                source,
            } if source.is_unauthorized() => "Invalid username or password".to_string(),
            ConsoleError::Api { source, .. } if source.is_unauthorized() => {
                "Your session has expired, please log in again".to_string()
            }
            ConsoleError::Api { action, .. } => format!("Failed to {}", action),
            ConsoleError::SelfModification(verb) => {
                format!("You cannot {} your own account", verb)
            }
            other => other.to_string(),
        }
    }
}
