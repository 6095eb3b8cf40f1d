//! Festival holiday models

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Holiday as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holiday {
    pub id: Option<i64>,
    pub name: String,
    pub date: NaiveDate,
    pub year: i32,
}

/// Payload for `POST /holidays`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewHoliday {
    pub name: String,
    pub date: NaiveDate,
    pub year: i32,
}

impl NewHoliday {
    /// Holiday on `date`, filed under that date's year
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            date,
            year: date.year(),
        }
    }
}
