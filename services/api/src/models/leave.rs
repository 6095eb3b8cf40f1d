//! Leave request models

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a leave request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "PENDING",
            LeaveStatus::Approved => "APPROVED",
            LeaveStatus::Rejected => "REJECTED",
            LeaveStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveDuration {
    #[default]
    FullDay,
    HalfDay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HalfDayType {
    FirstHalf,
    SecondHalf,
}

/// Leave request as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leave {
    pub id: i64,
    pub employee_id: Option<i64>,
    pub employee_name: Option<String>,
    pub employee_email: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: Option<f64>,
    pub working_days: Option<f64>,
    pub reason: String,
    pub status: LeaveStatus,
    pub duration: Option<LeaveDuration>,
    pub half_day_type: Option<HalfDayType>,
    pub processed_at: Option<NaiveDateTime>,
    pub processed_by: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub can_cancel: bool,
}

/// Payload for `POST /leaves`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveApplication {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub duration: LeaveDuration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub half_day_type: Option<HalfDayType>,
}

impl LeaveApplication {
    /// Full-day leave over an inclusive date range
    pub fn full_days(start_date: NaiveDate, end_date: NaiveDate, reason: impl Into<String>) -> Self {
        Self {
            start_date,
            end_date,
            reason: reason.into(),
            duration: LeaveDuration::FullDay,
            half_day_type: None,
        }
    }

    /// Half-day leave; the end date is pinned to the start date
    pub fn half_day(date: NaiveDate, half: HalfDayType, reason: impl Into<String>) -> Self {
        Self {
            start_date: date,
            end_date: date,
            reason: reason.into(),
            duration: LeaveDuration::HalfDay,
            half_day_type: Some(half),
        }
    }

    /// Client-side checks run before submitting
    pub fn validate(&self, today: NaiveDate) -> Result<(), String> {
        if self.reason.trim().is_empty() {
            return Err("Reason cannot be empty".to_string());
        }
        if self.start_date < today {
            return Err("Start date cannot be in the past".to_string());
        }
        if self.end_date < self.start_date {
            return Err("End date cannot be before start date".to_string());
        }
        match (self.duration, self.half_day_type) {
            (LeaveDuration::HalfDay, None) => {
                Err("Half day type is required for half-day leave".to_string())
            }
            (LeaveDuration::HalfDay, Some(_)) if self.end_date != self.start_date => {
                Err("Half-day leave must start and end on the same date".to_string())
            }
            _ => Ok(()),
        }
    }
}
