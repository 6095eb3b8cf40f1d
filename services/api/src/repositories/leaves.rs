//! Leave request endpoints

use auth::RequestGateway;
use reqwest::Method;
use serde_json::Value;
use tracing::info;

use super::{into_data, into_message};
use crate::error::ApiResult;
use crate::models::{Leave, LeaveApplication, LeaveStatus, PageQuery, Paged};

/// Repository for `/leaves`
#[derive(Clone)]
pub struct LeaveRepository {
    gateway: RequestGateway,
}

impl LeaveRepository {
    pub fn new(gateway: RequestGateway) -> Self {
        Self { gateway }
    }

    /// Submit a leave application
    pub async fn apply(&self, application: &LeaveApplication) -> ApiResult<Leave> {
        let response = self
            .gateway
            .call::<Leave, _>("/leaves", Method::POST, Some(application))
            .await?;
        let leave = into_data(response, "Failed to apply leave")?;
        info!("Applied leave {} ({} to {})", leave.id, leave.start_date, leave.end_date);
        Ok(leave)
    }

    /// Leaves of one employee
    pub async fn list_for_employee(
        &self,
        employee_id: i64,
        query: &PageQuery,
    ) -> ApiResult<Paged<Leave>> {
        let path = format!("/leaves/employee/{}?{}", employee_id, query.to_query_string());
        into_data(self.gateway.get(&path).await?, "Error loading leaves")
    }

    /// Leaves of every employee, optionally filtered by status
    pub async fn list(
        &self,
        query: &PageQuery,
        status: Option<LeaveStatus>,
    ) -> ApiResult<Paged<Leave>> {
        let mut path = format!("/leaves?{}", query.to_query_string());
        if let Some(status) = status {
            path.push_str("&status=");
            path.push_str(status.as_str());
        }
        into_data(self.gateway.get(&path).await?, "Error loading leaves")
    }

    /// Number of leaves in `status`, read from a single-element page
    pub async fn count(&self, status: LeaveStatus) -> ApiResult<u64> {
        let query = PageQuery {
            page: 0,
            size: 1,
            sort_by: None,
        };
        Ok(self.list(&query, Some(status)).await?.total_elements)
    }

    pub async fn approve(&self, id: i64) -> ApiResult<String> {
        self.command(id, "approve", "Leave approved", "Failed to approve leave")
            .await
    }

    pub async fn reject(&self, id: i64) -> ApiResult<String> {
        self.command(id, "reject", "Leave rejected", "Failed to reject leave")
            .await
    }

    pub async fn cancel(&self, id: i64) -> ApiResult<String> {
        self.command(id, "cancel", "Leave cancelled", "Failed to cancel leave")
            .await
    }

    async fn command(
        &self,
        id: i64,
        action: &str,
        success: &str,
        fallback: &str,
    ) -> ApiResult<String> {
        let path = format!("/leaves/{}/{}", id, action);
        let response = self
            .gateway
            .call::<Value, ()>(&path, Method::PUT, None)
            .await?;
        let message = into_message(response, success, fallback)?;
        info!("Leave {} {}: {}", id, action, message);
        Ok(message)
    }
}
