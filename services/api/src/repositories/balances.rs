//! Leave balance endpoints

use auth::RequestGateway;
use reqwest::Method;
use serde_json::Value;

use super::{into_data, into_message};
use crate::error::ApiResult;
use crate::models::{LeaveBalance, YearEndAction, YearEndRequest};

/// Repository for `/leave-balance`
#[derive(Clone)]
pub struct BalanceRepository {
    gateway: RequestGateway,
}

impl BalanceRepository {
    pub fn new(gateway: RequestGateway) -> Self {
        Self { gateway }
    }

    pub async fn for_employee(&self, employee_id: i64, year: i32) -> ApiResult<LeaveBalance> {
        let path = format!("/leave-balance/employee/{}?year={}", employee_id, year);
        into_data(self.gateway.get(&path).await?, "Error loading balance")
    }

    /// Carry forward or encash the unused leave of `year`
    pub async fn process_year_end(
        &self,
        employee_id: i64,
        year: i32,
        action: YearEndAction,
    ) -> ApiResult<String> {
        let path = format!("/leave-balance/employee/{}/year-end", employee_id);
        let request = YearEndRequest { year, action };
        let response = self
            .gateway
            .call::<Value, _>(&path, Method::POST, Some(&request))
            .await?;
        into_message(
            response,
            "Year-end action processed",
            "Failed to process year-end action",
        )
    }
}
