//! Session model and related functionality

use serde::{Deserialize, Serialize};

use super::Role;

/// Snapshot of the persisted session fields
///
/// Every field is optional because the storage area may hold any subset of
/// them. Without a token the other fields carry no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Opaque bearer credential
    pub token: Option<String>,
    /// Display/login identifier
    pub username: Option<String>,
    /// Role the session was issued for
    pub role: Option<Role>,
    /// Employee record id, present for roles backed by an employee
    pub employee_id: Option<i64>,
    /// Employee display name
    pub employee_name: Option<String>,
    /// Session start or last activity, in milliseconds since the epoch
    pub login_time: Option<i64>,
}

impl Session {
    /// Whether a token is present
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Whether every field is absent
    pub fn is_empty(&self) -> bool {
        *self == Session::default()
    }

    /// Name shown to the user, preferring the employee name
    pub fn display_name(&self) -> Option<&str> {
        self.employee_name
            .as_deref()
            .or(self.username.as_deref())
    }

    /// Whether the session role is one of `roles`
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.role.is_some_and(|role| roles.contains(&role))
    }
}
