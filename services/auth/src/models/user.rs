//! User payloads exchanged with the authentication endpoints

use serde::{Deserialize, Serialize};

use super::Role;

/// User login credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

/// Data returned by `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub username: String,
    pub role: Role,
    #[serde(default)]
    pub employee_id: Option<i64>,
    #[serde(default)]
    pub employee_name: Option<String>,
    /// Manager approval status, absent for other roles
    #[serde(default)]
    pub is_approved: Option<bool>,
}

/// Registration form as submitted by the user
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub role: Option<Role>,
}

/// Payload for `POST /auth/register`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub role: Role,
}

/// Current user info derived from the stored session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub username: Option<String>,
    pub role: Option<Role>,
    pub employee_id: Option<i64>,
    pub employee_name: Option<String>,
}
