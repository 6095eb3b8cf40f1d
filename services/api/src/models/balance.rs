//! Leave balance models

use serde::{Deserialize, Serialize};

/// What happens to unused leave at the end of a year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum YearEndAction {
    CarryForward,
    Encashment,
}

impl YearEndAction {
    /// Question asked before the action is submitted
    pub fn confirmation(&self) -> &'static str {
        match self {
            YearEndAction::CarryForward => {
                "Carry forward unused leaves to next year (max 12 leaves)?"
            }
            YearEndAction::Encashment => "Encash unused leaves (max 10 leaves)?",
        }
    }
}

/// Leave balance of one employee for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveBalance {
    pub id: Option<i64>,
    pub employee_id: i64,
    pub employee_name: Option<String>,
    pub year: i32,
    pub total_entitlement: f64,
    pub used_leaves: f64,
    pub remaining_leaves: f64,
    pub carried_forward: f64,
    pub year_end_action: Option<YearEndAction>,
    #[serde(default)]
    pub can_process_year_end: bool,
}

/// Payload for `POST /leave-balance/employee/{id}/year-end`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearEndRequest {
    pub year: i32,
    pub action: YearEndAction,
}
