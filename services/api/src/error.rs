//! Error types for the dashboard views

use auth::{AuthError, Page};
use thiserror::Error;

/// Error raised by repositories and dashboards
#[derive(Error, Debug)]
pub enum ApiError {
    /// Session or transport failure from the gateway
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Backend answered with `success: false`
    #[error("{0}")]
    Rejected(String),

    /// Page entry refused by the access guard
    #[error("{message}")]
    AccessDenied {
        message: String,
        redirect: Option<Page>,
    },

    /// Input refused before anything was sent
    #[error("{0}")]
    Validation(String),

    /// The session lacks a field the view needs
    #[error("Session has no {0}")]
    MissingSessionField(&'static str),

    /// Session storage failure
    #[error("Storage error: {0}")]
    Storage(#[from] common::StorageError),
}

impl ApiError {
    /// Page the user should be sent to, if the error ends the current view
    pub fn redirect_target(&self) -> Option<Page> {
        match self {
            ApiError::Auth(e) => e.redirect_target(),
            ApiError::AccessDenied { redirect, .. } => *redirect,
            _ => None,
        }
    }

    /// Message fit for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Auth(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
