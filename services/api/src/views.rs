//! Dashboard view controllers
//!
//! A dashboard is opened through the access guard and only exists for an
//! allowed session. Everything it loads goes through the repositories.

use auth::{AccessDecision, AuthError, Clock, Denial, Role};
use chrono::{DateTime, Datelike, Local, NaiveDate};
use tracing::warn;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub mod admin;
pub mod employee;

pub use admin::{AdminDashboard, LeaveSummary, ManagerFilter};
pub use employee::EmployeeDashboard;

/// Run the guard for `roles`, turning a denial into [`ApiError::AccessDenied`]
pub async fn enter(
    state: &AppState,
    roles: &[Role],
    wrong_role_message: &str,
) -> ApiResult<auth::Session> {
    let decision = state.guard.check(roles).await?;
    let redirect = decision.redirect_target();
    match decision {
        AccessDecision::Allowed(session) => Ok(session),
        AccessDecision::Denied(denial) => {
            let message = match denial {
                Denial::NoToken => AuthError::NotAuthenticated.to_string(),
                Denial::Expired => AuthError::SessionExpired.to_string(),
                Denial::WrongRole { .. } => wrong_role_message.to_string(),
            };
            warn!("Page entry refused: {:?}", denial);
            Err(ApiError::AccessDenied { message, redirect })
        }
    }
}

/// Guard for pages open to any logged-in role
pub async fn enter_any(state: &AppState) -> ApiResult<auth::Session> {
    enter(state, &[], "Access denied.").await
}

/// Local calendar date for the clock's current instant
pub(crate) fn today(clock: &dyn Clock) -> NaiveDate {
    DateTime::from_timestamp_millis(clock.now_millis())
        .map(|utc| utc.with_timezone(&Local).date_naive())
        .unwrap_or_else(|| Local::now().date_naive())
}

pub(crate) fn current_year(clock: &dyn Clock) -> i32 {
    today(clock).year()
}
