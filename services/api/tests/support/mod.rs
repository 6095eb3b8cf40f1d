//! Mock leave backend and client wiring for the dashboard suites

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use api::AppState;
use auth::{ClientConfig, ManualClock, Role, Session, StorageKind};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use common::MemoryStorage;
use serde_json::{Value, json};

/// Wed, 15 Jan 2025 12:00:00 UTC
pub const T0: i64 = 1_736_942_400_000;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub uri: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
pub struct MockBackend {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
    /// Answer every leave listing with 403
    forbid_leaves: Arc<AtomicBool>,
    /// Answer the pending-manager listing with a failure envelope
    break_managers: Arc<AtomicBool>,
}

impl MockBackend {
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let backend = MockBackend {
            base_url: format!("http://{addr}/api"),
            ..Default::default()
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

    pub fn uris(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.uri).collect()
    }

    pub fn forbid_leaves(&self) {
        self.forbid_leaves.store(true, Ordering::SeqCst);
    }

    pub fn break_managers(&self) {
        self.break_managers.store(true, Ordering::SeqCst);
    }

    fn record(&self, method: &str, uri: &Uri, headers: &HeaderMap, body: Option<Value>) {
        let authorization = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        self.requests.lock().unwrap().push(Recorded {
            method: method.to_string(),
            uri: uri.to_string(),
            authorization,
            body,
        });
    }
}

fn router(backend: MockBackend) -> Router {
    Router::new()
        .route("/api/leaves", get(list_leaves).post(apply_leave))
        .route("/api/leaves/employee/:id", get(employee_leaves))
        .route("/api/leaves/:id/:action", put(leave_action))
        .route("/api/holidays", post(add_holiday))
        .route("/api/holidays/year/:year", get(holidays))
        .route("/api/holidays/:id", axum::routing::delete(delete_holiday))
        .route("/api/manager-approvals", get(all_managers))
        .route("/api/manager-approvals/pending", get(pending_managers))
        .route("/api/manager-approvals/:id/:action", put(manager_action))
        .route("/api/leave-balance/employee/:id", get(balance))
        .route("/api/leave-balance/employee/:id/year-end", post(year_end))
        .with_state(backend)
}

fn ok(data: Value) -> Response {
    Json(json!({ "success": true, "data": data })).into_response()
}

fn message(success: bool, message: &str) -> Response {
    let status = if success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(json!({ "success": success, "message": message }))).into_response()
}

fn leave(id: i64, employee_id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "employeeId": employee_id,
        "employeeName": if employee_id == 7 { "Eve Employee" } else { "Other Person" },
        "employeeEmail": "someone@example.com",
        "startDate": "2025-02-03",
        "endDate": "2025-02-04",
        "totalDays": 2.0,
        "workingDays": 2.0,
        "reason": format!("Reason {id}"),
        "status": status,
        "duration": "FULL_DAY",
        "halfDayType": null,
        "processedAt": null,
        "processedBy": null,
        "createdAt": "2025-01-10T08:00:00",
        "canCancel": status == "PENDING"
    })
}

fn all_leaves() -> Vec<Value> {
    let statuses = [
        "PENDING", "PENDING", "PENDING", "APPROVED", "APPROVED", "APPROVED", "APPROVED",
        "APPROVED", "REJECTED", "CANCELLED",
    ];
    statuses
        .iter()
        .enumerate()
        .map(|(i, status)| leave(i as i64 + 1, if i % 2 == 0 { 7 } else { 8 }, status))
        .collect()
}

fn paged(items: Vec<Value>, params: &HashMap<String, String>) -> Value {
    let page: usize = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(0);
    let size: usize = params.get("size").and_then(|s| s.parse().ok()).unwrap_or(10);
    let total = items.len();
    let content: Vec<Value> = items.into_iter().skip(page * size).take(size).collect();
    json!({
        "content": content,
        "totalPages": total.div_ceil(size),
        "totalElements": total,
        "number": page,
        "size": size
    })
}

async fn list_leaves(
    State(backend): State<MockBackend>,
    uri: Uri,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    backend.record("GET", &uri, &headers, None);
    if backend.forbid_leaves.load(Ordering::SeqCst) {
        return (StatusCode::FORBIDDEN, Json(json!({ "success": false }))).into_response();
    }

    let items = all_leaves()
        .into_iter()
        .filter(|l| params.get("status").is_none_or(|s| l["status"] == s.as_str()))
        .collect();
    ok(paged(items, &params))
}

async fn employee_leaves(
    State(backend): State<MockBackend>,
    Path(id): Path<i64>,
    uri: Uri,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    backend.record("GET", &uri, &headers, None);
    let items = all_leaves()
        .into_iter()
        .filter(|l| l["employeeId"] == id)
        .collect();
    ok(paged(items, &params))
}

async fn apply_leave(
    State(backend): State<MockBackend>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    backend.record("POST", &uri, &headers, Some(body.clone()));
    if body["reason"] == "overlap" {
        return message(false, "Leave request overlaps with an existing leave");
    }

    let mut created = leave(100, 7, "PENDING");
    for field in ["startDate", "endDate", "reason", "duration", "halfDayType"] {
        created[field] = body.get(field).cloned().unwrap_or(Value::Null);
    }
    Json(json!({ "success": true, "message": "Leave applied successfully", "data": created }))
        .into_response()
}

async fn leave_action(
    State(backend): State<MockBackend>,
    Path((id, action)): Path<(i64, String)>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    backend.record("PUT", &uri, &headers, None);
    if id == 404 {
        return message(false, "Leave not found");
    }
    let text = match action.as_str() {
        "approve" => "Leave approved successfully",
        "reject" => "Leave rejected successfully",
        "cancel" => "Leave cancelled successfully",
        _ => return StatusCode::NOT_FOUND.into_response(),
    };
    message(true, text)
}

async fn holidays(
    State(backend): State<MockBackend>,
    Path(year): Path<i32>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    backend.record("GET", &uri, &headers, None);
    if year != 2025 {
        return ok(json!([]));
    }
    ok(json!([
        { "id": 2, "name": "Independence Day", "date": "2025-08-15", "year": 2025 },
        { "id": 1, "name": "Republic Day", "date": "2025-01-26", "year": 2025 }
    ]))
}

async fn add_holiday(
    State(backend): State<MockBackend>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    backend.record("POST", &uri, &headers, Some(body));
    message(true, "Holiday added successfully")
}

async fn delete_holiday(
    State(backend): State<MockBackend>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    backend.record("DELETE", &uri, &headers, None);
    Json(json!({ "success": true })).into_response()
}

fn manager(id: i64, approved: bool) -> Value {
    json!({
        "id": id,
        "username": format!("manager{id}"),
        "employeeName": format!("Manager {id}"),
        "employeeEmail": format!("manager{id}@example.com"),
        "department": "Operations",
        "isApproved": approved,
        "approvedBy": if approved { json!("boss") } else { Value::Null },
        "approvedAt": if approved { json!("2025-01-02T10:00:00") } else { Value::Null },
        "createdAt": "2025-01-01T09:00:00"
    })
}

async fn pending_managers(
    State(backend): State<MockBackend>,
    uri: Uri,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    backend.record("GET", &uri, &headers, None);
    if backend.break_managers.load(Ordering::SeqCst) {
        return message(false, "Approvals unavailable");
    }
    ok(paged(vec![manager(21, false), manager(22, false)], &params))
}

async fn all_managers(
    State(backend): State<MockBackend>,
    uri: Uri,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    backend.record("GET", &uri, &headers, None);
    ok(paged(
        vec![manager(20, true), manager(21, false), manager(22, false)],
        &params,
    ))
}

async fn manager_action(
    State(backend): State<MockBackend>,
    Path((_id, action)): Path<(i64, String)>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    backend.record("PUT", &uri, &headers, None);
    match action.as_str() {
        "approve" => message(true, "Manager approved"),
        "reject" => message(true, "Manager rejected"),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn balance(
    State(backend): State<MockBackend>,
    Path(id): Path<i64>,
    uri: Uri,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    backend.record("GET", &uri, &headers, None);
    let year: i32 = params.get("year").and_then(|y| y.parse().ok()).unwrap_or(0);
    ok(json!({
        "id": 1,
        "employeeId": id,
        "employeeName": "Eve Employee",
        "year": year,
        "totalEntitlement": 24.0,
        "usedLeaves": 3.5,
        "remainingLeaves": 20.5,
        "carriedForward": 0.0,
        "yearEndAction": null,
        "canProcessYearEnd": false
    }))
}

async fn year_end(
    State(backend): State<MockBackend>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    backend.record("POST", &uri, &headers, Some(body));
    message(true, "Year-end action processed successfully")
}

/// Client state over memory storage, a manual clock and the mock backend
pub struct Harness {
    pub backend: MockBackend,
    pub clock: Arc<ManualClock>,
    pub state: AppState,
}

impl Harness {
    pub async fn new() -> Self {
        let backend = MockBackend::spawn().await;
        let clock = Arc::new(ManualClock::new(T0));
        let config = ClientConfig {
            api_base_url: backend.base_url.clone(),
            session_timeout_secs: 1800,
            grace_period_secs: 10,
            sweep_interval_secs: 120,
            sweep_grace_secs: 5,
            request_timeout_secs: 5,
            storage: StorageKind::Memory,
            storage_path: String::new(),
        };
        let state = AppState::new(config, Arc::new(MemoryStorage::new()), clock.clone()).unwrap();

        Self {
            backend,
            clock,
            state,
        }
    }

    /// Move the clock to `millis` after [`T0`]
    pub fn at(&self, millis: i64) {
        self.clock.set(T0 + millis);
    }

    /// Store a session for `role` that started at [`T0`]
    pub async fn login_as(&self, role: Role) -> Session {
        let (username, employee_id, employee_name) = match role {
            Role::Employee => ("eve", Some(7), Some("Eve Employee".to_string())),
            Role::Manager => ("mona", Some(12), Some("Mona Lisa".to_string())),
            Role::Admin => ("boss", None, None),
        };
        let session = Session {
            token: Some(format!("jwt-{username}")),
            username: Some(username.to_string()),
            role: Some(role),
            employee_id,
            employee_name,
            login_time: Some(T0),
        };
        self.state.store.save(&session).await.unwrap();
        session
    }
}
