//! Festival holiday endpoints

use auth::RequestGateway;
use reqwest::Method;
use serde_json::Value;

use super::{into_data, into_message};
use crate::error::ApiResult;
use crate::models::{Holiday, NewHoliday};

/// Repository for `/holidays`
#[derive(Clone)]
pub struct HolidayRepository {
    gateway: RequestGateway,
}

impl HolidayRepository {
    pub fn new(gateway: RequestGateway) -> Self {
        Self { gateway }
    }

    /// Holidays of one year, sorted by date
    pub async fn for_year(&self, year: i32) -> ApiResult<Vec<Holiday>> {
        let path = format!("/holidays/year/{}", year);
        let mut holidays: Vec<Holiday> =
            into_data(self.gateway.get(&path).await?, "Error loading holidays")?;
        holidays.sort_by_key(|h| h.date);
        Ok(holidays)
    }

    pub async fn add(&self, holiday: &NewHoliday) -> ApiResult<String> {
        let response = self
            .gateway
            .call::<Value, _>("/holidays", Method::POST, Some(holiday))
            .await?;
        into_message(response, "Holiday added", "Failed to add holiday")
    }

    pub async fn delete(&self, id: i64) -> ApiResult<String> {
        let path = format!("/holidays/{}", id);
        let response = self
            .gateway
            .call::<Value, ()>(&path, Method::DELETE, None)
            .await?;
        into_message(response, "Holiday deleted", "Failed to delete holiday")
    }
}
