//! Manager approval endpoints

use auth::RequestGateway;
use reqwest::Method;
use serde_json::Value;
use tracing::info;

use super::{into_data, into_message};
use crate::error::ApiResult;
use crate::models::{ManagerApproval, PageQuery, Paged};

/// Repository for `/manager-approvals`
#[derive(Clone)]
pub struct ApprovalRepository {
    gateway: RequestGateway,
}

impl ApprovalRepository {
    pub fn new(gateway: RequestGateway) -> Self {
        Self { gateway }
    }

    pub async fn pending(&self, query: &PageQuery) -> ApiResult<Paged<ManagerApproval>> {
        let path = format!("/manager-approvals/pending?{}", query.to_query_string());
        into_data(self.gateway.get(&path).await?, "Error loading manager approvals")
    }

    pub async fn all(&self, query: &PageQuery) -> ApiResult<Paged<ManagerApproval>> {
        let path = format!("/manager-approvals?{}", query.to_query_string());
        into_data(self.gateway.get(&path).await?, "Error loading manager approvals")
    }

    /// Number of managers awaiting approval
    pub async fn pending_count(&self) -> ApiResult<u64> {
        let query = PageQuery {
            page: 0,
            size: 1,
            sort_by: None,
        };
        Ok(self.pending(&query).await?.total_elements)
    }

    pub async fn approve(&self, id: i64) -> ApiResult<String> {
        self.command(id, "approve", "Manager approved", "Failed to approve manager")
            .await
    }

    pub async fn reject(&self, id: i64) -> ApiResult<String> {
        self.command(id, "reject", "Manager rejected", "Failed to reject manager")
            .await
    }

    async fn command(
        &self,
        id: i64,
        action: &str,
        success: &str,
        fallback: &str,
    ) -> ApiResult<String> {
        let path = format!("/manager-approvals/{}/{}", id, action);
        let response = self
            .gateway
            .call::<Value, ()>(&path, Method::PUT, None)
            .await?;
        let message = into_message(response, success, fallback)?;
        info!("Manager {} {}: {}", id, action, message);
        Ok(message)
    }
}
