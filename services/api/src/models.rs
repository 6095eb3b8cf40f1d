//! API models for request and response payloads

use serde::{Deserialize, Serialize};

pub mod approval;
pub mod balance;
pub mod holiday;
pub mod leave;

pub use approval::ManagerApproval;
pub use balance::{LeaveBalance, YearEndAction, YearEndRequest};
pub use holiday::{Holiday, NewHoliday};
pub use leave::{HalfDayType, Leave, LeaveApplication, LeaveDuration, LeaveStatus};

/// One page of a paginated collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    pub content: Vec<T>,
    pub total_pages: u32,
    pub total_elements: u64,
    /// Zero-based page index
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}

impl<T> Paged<T> {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.number > 0
    }

    pub fn has_next(&self) -> bool {
        self.number.saturating_add(1) < self.total_pages
    }
}

/// Query for a paginated collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub size: u32,
    pub sort_by: Option<String>,
}

/// Page size used by both dashboards
pub const PAGE_SIZE: u32 = 5;

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: PAGE_SIZE,
            sort_by: None,
        }
    }
}

impl PageQuery {
    pub fn page(page: u32) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }

    pub fn sorted_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self
    }

    /// `page=..&size=..[&sortBy=..]`
    pub fn to_query_string(&self) -> String {
        let mut query = format!("page={}&size={}", self.page, self.size);
        if let Some(sort_by) = &self.sort_by {
            query.push_str("&sortBy=");
            query.push_str(sort_by);
        }
        query
    }
}
