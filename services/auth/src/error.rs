//! Custom error types for the authentication service

use common::error::StorageError;
use thiserror::Error;

use crate::navigation::Page;

/// Message shown when inactivity ended the session
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please login again.";

/// Message shown when the backend rejected the credential
pub const UNAUTHORIZED_MESSAGE: &str = "Session expired or unauthorized. Please login again.";

/// Message shown when the backend could not be reached
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your connection and try again.";

/// Custom error type for session and authentication operations
#[derive(Error, Debug)]
pub enum AuthError {
    /// No token stored
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Inactivity exceeded the timeout outside the grace period
    #[error("{}", SESSION_EXPIRED_MESSAGE)]
    SessionExpired,

    /// Backend answered 401/403 outside the grace period
    #[error("{}", UNAUTHORIZED_MESSAGE)]
    Unauthorized,

    /// Role does not match the page
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Network error while talking to the backend
    #[error("Communication error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with something that is not the JSON envelope
    #[error("Malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// Backend processed the call but reported `success: false`
    #[error("{0}")]
    Rejected(String),

    /// Client-side form validation failed
    #[error("{0}")]
    Validation(String),

    /// Session storage failed
    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Background scheduler error
    #[error("Scheduler error: {0}")]
    Scheduler(#[from] tokio_cron_scheduler::JobSchedulerError),
}

impl AuthError {
    /// Whether the error is a transport-level failure (retryable by the user)
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, AuthError::Transport(_) | AuthError::MalformedResponse(_))
    }

    /// Whether the error means the user has to log in again
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            AuthError::NotAuthenticated | AuthError::SessionExpired | AuthError::Unauthorized
        )
    }

    /// Page the view layer should navigate to, if any
    pub fn redirect_target(&self) -> Option<Page> {
        match self {
            AuthError::NotAuthenticated
            | AuthError::SessionExpired
            | AuthError::Unauthorized
            | AuthError::AccessDenied(_) => Some(Page::Login),
            _ => None,
        }
    }

    /// Message suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Transport(_) => NETWORK_ERROR_MESSAGE.to_string(),
            AuthError::MalformedResponse(_) => {
                "Error communicating with server. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Type alias for authentication results
pub type AuthResult<T> = Result<T, AuthError>;
