//! Admin and manager dashboard

use auth::{Role, Session};
use chrono::NaiveDate;
use tracing::error;

use super::{current_year, enter};
use crate::error::{ApiError, ApiResult};
use crate::models::{
    Holiday, Leave, LeaveStatus, ManagerApproval, NewHoliday, PageQuery, Paged,
};
use crate::state::AppState;

pub const ADMIN_ONLY_MESSAGE: &str = "Access denied. This page is for admin/manager only.";

/// Default sort for the leave lists
pub const DEFAULT_SORT: &str = "createdAt";

/// Counts shown at the top of the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeaveSummary {
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
    /// Only loaded for admins
    pub pending_managers: Option<u64>,
}

/// Which manager approvals to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManagerFilter {
    #[default]
    Pending,
    All,
}

/// Dashboard shared by admins and managers
pub struct AdminDashboard {
    state: AppState,
    session: Session,
}

impl AdminDashboard {
    /// Enter the dashboard; `ADMIN` and `MANAGER` sessions are admitted
    pub async fn open(state: &AppState) -> ApiResult<Self> {
        let session = enter(state, &[Role::Admin, Role::Manager], ADMIN_ONLY_MESSAGE).await?;
        Ok(Self {
            state: state.clone(),
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn greeting(&self) -> String {
        format!("Welcome, {}", self.session.display_name().unwrap_or("User"))
    }

    /// Manager approvals are an admin-only feature
    pub fn can_manage_managers(&self) -> bool {
        self.session.role == Some(Role::Admin)
    }

    fn require_admin(&self) -> ApiResult<()> {
        if self.can_manage_managers() {
            Ok(())
        } else {
            Err(ApiError::AccessDenied {
                message: "Only admins can manage manager approvals".to_string(),
                redirect: None,
            })
        }
    }

    /// Leave counts per status; a count that fails to load reads as zero
    pub async fn summary(&self) -> ApiResult<LeaveSummary> {
        let leaves = &self.state.leave_repository;
        let mut summary = LeaveSummary {
            pending: count_or_zero(leaves.count(LeaveStatus::Pending).await)?,
            approved: count_or_zero(leaves.count(LeaveStatus::Approved).await)?,
            rejected: count_or_zero(leaves.count(LeaveStatus::Rejected).await)?,
            pending_managers: None,
        };
        if self.can_manage_managers() {
            summary.pending_managers = Some(count_or_zero(
                self.state.approval_repository.pending_count().await,
            )?);
        }
        Ok(summary)
    }

    pub async fn pending_leaves(&self, page: u32, sort_by: Option<&str>) -> ApiResult<Paged<Leave>> {
        let query = PageQuery::page(page).sorted_by(sort_by.unwrap_or(DEFAULT_SORT));
        self.state
            .leave_repository
            .list(&query, Some(LeaveStatus::Pending))
            .await
    }

    pub async fn all_leaves(
        &self,
        page: u32,
        sort_by: Option<&str>,
        status: Option<LeaveStatus>,
    ) -> ApiResult<Paged<Leave>> {
        let query = PageQuery::page(page).sorted_by(sort_by.unwrap_or(DEFAULT_SORT));
        self.state.leave_repository.list(&query, status).await
    }

    pub async fn approve_leave(&self, id: i64) -> ApiResult<String> {
        self.state.leave_repository.approve(id).await
    }

    pub async fn reject_leave(&self, id: i64) -> ApiResult<String> {
        self.state.leave_repository.reject(id).await
    }

    pub async fn holidays(&self, year: Option<i32>) -> ApiResult<Vec<Holiday>> {
        let year = year.unwrap_or_else(|| current_year(self.state.clock.as_ref()));
        self.state.holiday_repository.for_year(year).await
    }

    pub async fn add_holiday(&self, name: &str, date: NaiveDate) -> ApiResult<String> {
        if name.trim().is_empty() {
            return Err(ApiError::Validation("Holiday name is required".to_string()));
        }
        self.state
            .holiday_repository
            .add(&NewHoliday::new(name.trim(), date))
            .await
    }

    pub async fn delete_holiday(&self, id: i64) -> ApiResult<String> {
        self.state.holiday_repository.delete(id).await
    }

    pub async fn managers(
        &self,
        filter: ManagerFilter,
        page: u32,
    ) -> ApiResult<Paged<ManagerApproval>> {
        self.require_admin()?;
        let query = PageQuery::page(page);
        match filter {
            ManagerFilter::Pending => self.state.approval_repository.pending(&query).await,
            ManagerFilter::All => self.state.approval_repository.all(&query).await,
        }
    }

    pub async fn approve_manager(&self, id: i64) -> ApiResult<String> {
        self.require_admin()?;
        self.state.approval_repository.approve(id).await
    }

    pub async fn reject_manager(&self, id: i64) -> ApiResult<String> {
        self.require_admin()?;
        self.state.approval_repository.reject(id).await
    }
}

/// Session-ending errors propagate; anything else leaves the counter at zero
fn count_or_zero(result: ApiResult<u64>) -> ApiResult<u64> {
    match result {
        Ok(count) => Ok(count),
        Err(e) if e.redirect_target().is_some() => Err(e),
        Err(e) => {
            error!("Error loading summary: {}", e);
            Ok(0)
        }
    }
}
