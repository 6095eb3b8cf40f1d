//! Authenticated request gateway
//!
//! Every backend call that needs a session goes through [`RequestGateway`].
//! It attaches the bearer token, refreshes session activity, and ends the
//! session when the backend or the expiry policy says so.

use std::sync::Arc;

use reqwest::{Client, Method, StatusCode, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

use crate::clock::Clock;
use crate::config::ClientConfig;
use crate::error::{AuthError, AuthResult};
use crate::models::ApiResponse;
use crate::policy::SessionPolicy;
use crate::session::SessionStore;

/// Gateway for authenticated backend calls
#[derive(Clone)]
pub struct RequestGateway {
    http: Client,
    base_url: String,
    store: SessionStore,
    clock: Arc<dyn Clock>,
    policy: SessionPolicy,
}

impl RequestGateway {
    /// Create a new gateway
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        store: SessionStore,
        clock: Arc<dyn Clock>,
        policy: SessionPolicy,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
            clock,
            policy,
        }
    }

    /// Create a gateway with an HTTP client built from `config`
    pub fn from_config(
        config: &ClientConfig,
        store: SessionStore,
        clock: Arc<dyn Clock>,
    ) -> AuthResult<Self> {
        let http = build_http_client(config)?;
        Ok(Self::new(
            http,
            config.api_base_url.clone(),
            store,
            clock,
            config.request_policy(),
        ))
    }

    /// Absolute URL for a path relative to the API base
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// The store this gateway reads and mutates
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// `GET` shorthand
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> AuthResult<ApiResponse<T>> {
        self.call::<T, ()>(path, Method::GET, None).await
    }

    /// Perform an authenticated call
    ///
    /// Fails with [`AuthError::NotAuthenticated`] without a token, with
    /// [`AuthError::SessionExpired`] when the session timed out outside the
    /// grace window, and with [`AuthError::Unauthorized`] when the backend
    /// answers 401/403 outside the grace window. The last two clear the
    /// session first. Transport failures leave the session untouched.
    pub async fn call<T, B>(
        &self,
        path: &str,
        method: Method,
        body: Option<&B>,
    ) -> AuthResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let session = self.store.read().await?;
        let Some(token) = session.token else {
            error!("No token found, redirecting to login");
            return Err(AuthError::NotAuthenticated);
        };

        // Activity refresh below moves loginTime; grace is judged on this snapshot
        let login_time = session.login_time;
        let now = self.clock.now_millis();

        if self.policy.is_expired(login_time, now) {
            error!("Session expired");
            self.store.clear().await?;
            return Err(AuthError::SessionExpired);
        }

        self.store.touch(now).await?;

        let url = self.url(path);
        debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(header::CONTENT_TYPE, "application/json")
            .bearer_auth(&token);

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            error!("API call error: {} {}: {}", method, url, e);
            AuthError::Transport(e)
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let now = self.clock.now_millis();
            if self.policy.is_within_grace_period(login_time, now) {
                warn!("Got {} but within grace period, continuing...", status.as_u16());
            } else {
                error!("Unauthorized response, clearing session");
                self.store.clear().await?;
                return Err(AuthError::Unauthorized);
            }
        }

        let bytes = response.bytes().await.map_err(|e| {
            error!("API call error: {} {}: {}", method, url, e);
            AuthError::Transport(e)
        })?;

        let parsed = serde_json::from_slice::<ApiResponse<T>>(&bytes).map_err(|e| {
            error!("Malformed response from {} {}: {}", method, url, e);
            AuthError::MalformedResponse(e)
        })?;

        info!("{} {} -> {} (success={})", method, url, status.as_u16(), parsed.success);
        Ok(parsed)
    }
}

/// Build the reqwest client used for backend calls
pub fn build_http_client(config: &ClientConfig) -> AuthResult<Client> {
    let client = Client::builder()
        .timeout(config.request_timeout())
        .user_agent(format!("leave-client/{}", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use common::storage::MemoryStorage;

    fn gateway(base: &str) -> RequestGateway {
        RequestGateway::new(
            Client::new(),
            base,
            SessionStore::new(Arc::new(MemoryStorage::new())),
            Arc::new(ManualClock::new(0)),
            SessionPolicy::request(),
        )
    }

    #[test]
    fn test_url_joins_relative_paths() {
        let gateway = gateway("http://localhost:8080/api/");
        assert_eq!(gateway.url("/leaves"), "http://localhost:8080/api/leaves");
        assert_eq!(gateway.url("holidays/year/2025"), "http://localhost:8080/api/holidays/year/2025");
        assert_eq!(gateway.url("https://other.example.com/x"), "https://other.example.com/x");
    }

    #[tokio::test]
    async fn test_call_without_token_is_not_authenticated() {
        // Nothing listens on this port; the call must stop before dispatch
        let gateway = gateway("http://127.0.0.1:9");
        let result = gateway.get::<serde_json::Value>("/leaves").await;
        assert!(matches!(result, Err(AuthError::NotAuthenticated)));
    }
}
