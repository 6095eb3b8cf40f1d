//! Manager approval models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Manager account awaiting or past admin approval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerApproval {
    pub id: i64,
    pub username: String,
    pub employee_name: Option<String>,
    pub employee_email: Option<String>,
    pub department: Option<String>,
    pub is_approved: Option<bool>,
    pub approved_by: Option<String>,
    pub approved_at: Option<NaiveDateTime>,
    pub created_at: Option<NaiveDateTime>,
}
