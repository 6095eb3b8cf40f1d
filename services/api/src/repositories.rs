//! Repositories for the leave management backend
//!
//! Each repository is a thin typed layer over [`RequestGateway`]; the
//! gateway owns the session handling, the repositories own the endpoints.

use auth::ApiResponse;

use crate::error::{ApiError, ApiResult};

pub mod approvals;
pub mod balances;
pub mod holidays;
pub mod leaves;

pub use approvals::ApprovalRepository;
pub use balances::BalanceRepository;
pub use holidays::HolidayRepository;
pub use leaves::LeaveRepository;

/// Unwrap the payload of a successful response
pub(crate) fn into_data<T>(response: ApiResponse<T>, fallback: &str) -> ApiResult<T> {
    match response {
        ApiResponse {
            success: true,
            data: Some(data),
            ..
        } => Ok(data),
        other => Err(ApiError::Rejected(other.failure_message(fallback))),
    }
}

/// Message of a successful command response
pub(crate) fn into_message<T>(
    response: ApiResponse<T>,
    success: &str,
    fallback: &str,
) -> ApiResult<String> {
    if response.success {
        Ok(response
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| success.to_string()))
    } else {
        Err(ApiError::Rejected(response.failure_message(fallback)))
    }
}
