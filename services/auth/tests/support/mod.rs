//! Mock backend and wiring shared by the integration suites

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use auth::{AccessGuard, AuthClient, ManualClock, RequestGateway, SessionPolicy, SessionStore};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use common::MemoryStorage;
use serde_json::{Value, json};

/// Fixed login instant used across the suites
pub const T0: i64 = 1_700_000_000_000;

/// A request as seen by the mock backend
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

/// Backend stand-in listening on an ephemeral port
#[derive(Clone, Default)]
pub struct MockBackend {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockBackend {
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let backend = MockBackend {
            base_url: format!("http://{addr}/api"),
            requests: Arc::default(),
        };

        let app = router(backend.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        backend
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, path: String, headers: &HeaderMap, body: Option<Value>) {
        let authorization = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        self.requests.lock().unwrap().push(Recorded {
            path,
            authorization,
            body,
        });
    }
}

fn router(backend: MockBackend) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/status/:code", get(status))
        .route("/api/echo", post(echo))
        .route("/api/garbage", get(garbage))
        .with_state(backend)
}

async fn login(
    State(backend): State<MockBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    backend.record("/api/auth/login".to_string(), &headers, Some(body.clone()));

    let username = body["username"].as_str().unwrap_or_default().to_string();
    if body["password"] != "secret" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Invalid username or password" })),
        );
    }

    let data = match username.as_str() {
        "boss" => json!({
            "token": "jwt-boss", "tokenType": "Bearer", "username": "boss",
            "role": "ADMIN"
        }),
        "mona" => json!({
            "token": "jwt-mona", "tokenType": "Bearer", "username": "mona",
            "role": "MANAGER", "employeeId": 12, "employeeName": "Mona Lisa", "isApproved": true
        }),
        _ => json!({
            "token": format!("jwt-{username}"), "tokenType": "Bearer", "username": username,
            "role": "EMPLOYEE", "employeeId": 7, "employeeName": "Eve Employee"
        }),
    };

    (
        StatusCode::OK,
        Json(json!({ "success": true, "message": "Login successful", "data": data })),
    )
}

async fn register(
    State(backend): State<MockBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    backend.record("/api/auth/register".to_string(), &headers, Some(body.clone()));

    if body["username"] == "taken" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "message": "Username already exists" })),
        );
    }

    (
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": "Registration successful" })),
    )
}

async fn status(
    State(backend): State<MockBackend>,
    Path(code): Path<u16>,
    headers: HeaderMap,
) -> impl IntoResponse {
    backend.record(format!("/api/status/{code}"), &headers, None);

    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({ "success": status.is_success(), "message": format!("status {code}") })),
    )
}

async fn echo(
    State(backend): State<MockBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    backend.record("/api/echo".to_string(), &headers, Some(body.clone()));
    Json(json!({ "success": true, "data": body }))
}

async fn garbage(State(backend): State<MockBackend>, headers: HeaderMap) -> impl IntoResponse {
    backend.record("/api/garbage".to_string(), &headers, None);
    (StatusCode::OK, "<html>not json</html>")
}

/// Client wiring over a memory storage area and a manual clock
pub struct Harness {
    pub backend: MockBackend,
    pub clock: Arc<ManualClock>,
    pub store: SessionStore,
    pub gateway: RequestGateway,
    pub guard: AccessGuard,
    pub auth: AuthClient,
}

impl Harness {
    pub async fn new() -> Self {
        let backend = MockBackend::spawn().await;
        Self::with_base_url(backend.clone(), &backend.base_url.clone())
    }

    /// Harness whose calls go to `base_url` instead of the mock
    pub fn with_base_url(backend: MockBackend, base_url: &str) -> Self {
        let clock = Arc::new(ManualClock::new(T0));
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));
        let http = reqwest::Client::new();

        let gateway = RequestGateway::new(
            http.clone(),
            base_url,
            store.clone(),
            clock.clone(),
            SessionPolicy::request(),
        );
        let guard = AccessGuard::new(store.clone(), clock.clone(), SessionPolicy::request());
        let auth = AuthClient::new(http, base_url, store.clone(), clock.clone());

        Self {
            backend,
            clock,
            store,
            gateway,
            guard,
            auth,
        }
    }

    /// Move the clock to `millis` after [`T0`]
    pub fn at(&self, millis: i64) {
        self.clock.set(T0 + millis);
    }
}

/// Base URL of a port nothing listens on
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api")
}
