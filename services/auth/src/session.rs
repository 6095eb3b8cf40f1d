//! Session store over a persistent storage area

use std::sync::Arc;

use common::error::StorageResult;
use common::storage::{Entries, StorageArea};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::models::{Role, Session};

/// Storage keys of the session fields
pub mod keys {
    pub const TOKEN: &str = "token";
    pub const USERNAME: &str = "username";
    pub const ROLE: &str = "role";
    pub const EMPLOYEE_ID: &str = "employeeId";
    pub const EMPLOYEE_NAME: &str = "employeeName";
    pub const LOGIN_TIME: &str = "loginTime";

    pub const ALL: [&str; 6] = [TOKEN, USERNAME, ROLE, EMPLOYEE_ID, EMPLOYEE_NAME, LOGIN_TIME];
}

/// Session store for reading and mutating the persisted session
///
/// Every operation runs under one read/write lock so a reader never sees a
/// session half-way through `save` or `clear`, whichever task issued them.
/// Multi-field reads and writes go through the area's snapshot operations,
/// which keeps them whole for other processes sharing the area too.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn StorageArea>,
    lock: Arc<RwLock<()>>,
}

impl SessionStore {
    /// Create a new session store
    pub fn new(storage: Arc<dyn StorageArea>) -> Self {
        Self {
            storage,
            lock: Arc::new(RwLock::new(())),
        }
    }

    /// Write the fields present in `session`; absent fields are left as-is
    pub async fn save(&self, session: &Session) -> StorageResult<()> {
        let _guard = self.lock.write().await;
        self.storage.merge(to_entries(session)).await
    }

    /// Clear the area and write `session` in one step
    pub async fn replace(&self, session: &Session) -> StorageResult<()> {
        let _guard = self.lock.write().await;
        self.storage.replace_all(to_entries(session)).await
    }

    /// Refresh `loginTime` to `now` if a token is present
    ///
    /// Returns whether a session was touched. The timestamp never moves
    /// backward.
    pub async fn touch(&self, now: i64) -> StorageResult<bool> {
        let _guard = self.lock.write().await;

        let current = from_entries(self.storage.entries().await?);
        if current.token.is_none() {
            return Ok(false);
        }
        if current.login_time.is_some_and(|stored| stored >= now) {
            return Ok(true);
        }

        self.storage
            .set(keys::LOGIN_TIME, &now.to_string())
            .await?;
        Ok(true)
    }

    /// Read the current session snapshot, possibly all-absent
    pub async fn read(&self) -> StorageResult<Session> {
        let _guard = self.lock.read().await;
        Ok(from_entries(self.storage.entries().await?))
    }

    /// Remove every session field; calling it twice is harmless
    pub async fn clear(&self) -> StorageResult<()> {
        let _guard = self.lock.write().await;
        self.storage.clear().await?;
        info!("Session cleared");
        Ok(())
    }
}

fn from_entries(mut entries: Entries) -> Session {
    let role = entries
        .remove(keys::ROLE)
        .and_then(|raw| match raw.parse::<Role>() {
            Ok(role) => Some(role),
            Err(e) => {
                warn!("Ignoring stored role: {}", e);
                None
            }
        });

    Session {
        token: entries.remove(keys::TOKEN),
        username: entries.remove(keys::USERNAME),
        role,
        employee_id: entries
            .remove(keys::EMPLOYEE_ID)
            .and_then(|raw| raw.parse().ok()),
        employee_name: entries.remove(keys::EMPLOYEE_NAME),
        login_time: entries
            .remove(keys::LOGIN_TIME)
            .and_then(|raw| raw.trim().parse().ok()),
    }
}

fn to_entries(session: &Session) -> Entries {
    let mut entries = Entries::new();
    if let Some(token) = &session.token {
        entries.insert(keys::TOKEN.to_string(), token.clone());
    }
    if let Some(username) = &session.username {
        entries.insert(keys::USERNAME.to_string(), username.clone());
    }
    if let Some(role) = session.role {
        entries.insert(keys::ROLE.to_string(), role.as_str().to_string());
    }
    if let Some(employee_id) = session.employee_id {
        entries.insert(keys::EMPLOYEE_ID.to_string(), employee_id.to_string());
    }
    if let Some(employee_name) = &session.employee_name {
        entries.insert(keys::EMPLOYEE_NAME.to_string(), employee_name.clone());
    }
    if let Some(login_time) = session.login_time {
        entries.insert(keys::LOGIN_TIME.to_string(), login_time.to_string());
    }
    entries
}
