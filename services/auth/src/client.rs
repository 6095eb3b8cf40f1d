//! Login, registration and logout flows
//!
//! These calls run before a session exists (or to end one), so they bypass
//! the [`crate::gateway::RequestGateway`] and talk to the backend directly.

use std::sync::Arc;

use reqwest::Client;
use tracing::{error, info, warn};

use crate::clock::Clock;
use crate::config::ClientConfig;
use crate::error::{AuthError, AuthResult};
use crate::gateway::build_http_client;
use crate::models::{
    ApiResponse, CurrentUser, LoginCredentials, LoginResponse, RegistrationForm, Session,
};
use crate::navigation::Page;
use crate::session::SessionStore;
use crate::validation::validate_registration;

/// Client for the unauthenticated endpoints and session lifecycle
#[derive(Clone)]
pub struct AuthClient {
    http: Client,
    base_url: String,
    store: SessionStore,
    clock: Arc<dyn Clock>,
}

impl AuthClient {
    /// Create a new authentication client
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        store: SessionStore,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
            clock,
        }
    }

    /// Create a client with an HTTP client built from `config`
    pub fn from_config(
        config: &ClientConfig,
        store: SessionStore,
        clock: Arc<dyn Clock>,
    ) -> AuthResult<Self> {
        let http = build_http_client(config)?;
        Ok(Self::new(http, config.api_base_url.clone(), store, clock))
    }

    /// Landing page for an already stored session, if any
    ///
    /// Used by the login and registration pages to skip the form when the
    /// user is still logged in.
    pub async fn resume(&self) -> AuthResult<Option<Page>> {
        let session = self.store.read().await?;
        if !session.is_authenticated() {
            return Ok(None);
        }
        Ok(session.role.map(Page::landing_for))
    }

    /// Log in and persist the new session
    pub async fn login(&self, username: &str, password: &str) -> AuthResult<Page> {
        info!("Login attempt for user: {}", username);

        let credentials = LoginCredentials {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response = self
            .http
            .post(format!("{}/auth/login", self.base_url))
            .json(&credentials)
            .send()
            .await
            .map_err(|e| {
                error!("Login error: {}", e);
                AuthError::Transport(e)
            })?;

        let bytes = response.bytes().await?;
        let result: ApiResponse<LoginResponse> = serde_json::from_slice(&bytes)?;

        let data = match result {
            ApiResponse {
                success: true,
                data: Some(data),
                ..
            } => data,
            other => {
                let message = other.failure_message("Login failed");
                warn!("Login rejected for {}: {}", username, message);
                return Err(AuthError::Rejected(message));
            }
        };

        let session = Session {
            token: Some(data.token),
            username: Some(data.username),
            role: Some(data.role),
            employee_id: data.employee_id,
            employee_name: data.employee_id.and(data.employee_name),
            login_time: Some(self.clock.now_millis()),
        };
        self.store.replace(&session).await?;

        info!("User {} logged in as {}", username, data.role);
        Ok(Page::landing_for(data.role))
    }

    /// Register a new account; on success the user is sent to the login page
    pub async fn register(&self, form: &RegistrationForm) -> AuthResult<String> {
        let request = validate_registration(form).map_err(AuthError::Validation)?;

        info!("Registration attempt for user: {}", request.username);

        let response = self
            .http
            .post(format!("{}/auth/register", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Registration error: {}", e);
                AuthError::Transport(e)
            })?;

        let bytes = response.bytes().await?;
        let result: ApiResponse<serde_json::Value> = serde_json::from_slice(&bytes)?;

        if result.success {
            Ok(result
                .message
                .unwrap_or_else(|| "Registration successful".to_string()))
        } else {
            Err(AuthError::Rejected(
                result.failure_message("Registration failed"),
            ))
        }
    }

    /// End the session
    pub async fn logout(&self) -> AuthResult<Page> {
        self.store.clear().await?;
        info!("User logged out");
        Ok(Page::Login)
    }

    /// Refresh session activity after a user interaction
    pub async fn record_activity(&self) -> AuthResult<bool> {
        Ok(self.store.touch(self.clock.now_millis()).await?)
    }

    /// Current user info from the stored session
    pub async fn current_user(&self) -> AuthResult<CurrentUser> {
        let session = self.store.read().await?;
        Ok(CurrentUser {
            username: session.username,
            role: session.role,
            employee_id: session.employee_id,
            employee_name: session.employee_name,
        })
    }
}
