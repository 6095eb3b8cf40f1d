//! Employee dashboard

use auth::{Role, Session};
use tracing::info;

use super::{current_year, enter, today};
use crate::error::{ApiError, ApiResult};
use crate::models::{
    Holiday, Leave, LeaveApplication, LeaveBalance, PageQuery, Paged, YearEndAction,
};
use crate::state::AppState;

pub const EMPLOYEE_ONLY_MESSAGE: &str = "Access denied. This page is for employees only.";

/// Dashboard of the logged-in employee
pub struct EmployeeDashboard {
    state: AppState,
    session: Session,
}

impl EmployeeDashboard {
    /// Enter the dashboard; only `EMPLOYEE` sessions are admitted
    pub async fn open(state: &AppState) -> ApiResult<Self> {
        let session = enter(state, &[Role::Employee], EMPLOYEE_ONLY_MESSAGE).await?;
        Ok(Self {
            state: state.clone(),
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// `Welcome, <name>`
    pub fn greeting(&self) -> String {
        format!("Welcome, {}", self.session.display_name().unwrap_or("User"))
    }

    fn employee_id(&self) -> ApiResult<i64> {
        self.session
            .employee_id
            .ok_or(ApiError::MissingSessionField("employee id"))
    }

    /// Validate and submit a leave application
    pub async fn apply_leave(&self, application: &LeaveApplication) -> ApiResult<Leave> {
        application
            .validate(today(self.state.clock.as_ref()))
            .map_err(ApiError::Validation)?;
        self.state.leave_repository.apply(application).await
    }

    /// One page of the employee's own leaves
    pub async fn my_leaves(&self, page: u32, sort_by: &str) -> ApiResult<Paged<Leave>> {
        let query = PageQuery::page(page).sorted_by(sort_by);
        self.state
            .leave_repository
            .list_for_employee(self.employee_id()?, &query)
            .await
    }

    pub async fn cancel_leave(&self, id: i64) -> ApiResult<String> {
        self.state.leave_repository.cancel(id).await
    }

    /// Balance for `year`, defaulting to the current one
    pub async fn balance(&self, year: Option<i32>) -> ApiResult<LeaveBalance> {
        let year = year.unwrap_or_else(|| current_year(self.state.clock.as_ref()));
        self.state
            .balance_repository
            .for_employee(self.employee_id()?, year)
            .await
    }

    pub async fn holidays(&self, year: Option<i32>) -> ApiResult<Vec<Holiday>> {
        let year = year.unwrap_or_else(|| current_year(self.state.clock.as_ref()));
        self.state.holiday_repository.for_year(year).await
    }

    /// Apply a year-end action to the current year's balance
    pub async fn process_year_end(&self, action: YearEndAction) -> ApiResult<String> {
        let year = current_year(self.state.clock.as_ref());
        info!("Processing year-end {:?} for {}", action, year);
        self.state
            .balance_repository
            .process_year_end(self.employee_id()?, year, action)
            .await
    }
}
