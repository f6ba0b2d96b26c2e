use log::debug;
use reqwest::Client;
use std::time::Duration;

use crate::domain::ParsedSchedule;
use crate::errors::ScheduleError;
use crate::schedule::parse_schedule;

/// Unauthenticated client for the events-schedule endpoint.
#[derive(Clone)]
pub struct ScheduleClient {
    client: Client,
    pub api_url: String,
}

// ==================================================
// CONSTRUCTOR
// ==================================================
impl ScheduleClient {
    pub fn new(api_url: String, request_timeout: Duration) -> Result<Self, ScheduleError> {
        let client = Client::builder().timeout(request_timeout).build()?;

        Ok(Self { client, api_url })
    }

    // ==================================================
    // FETCH SCHEDULE
    // ==================================================
    pub async fn fetch_schedule(&self) -> Result<ParsedSchedule, ScheduleError> {
        debug!("GET {}", self.api_url);

        let response = self.client.get(&self.api_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScheduleError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        parse_schedule(&body)
    }
}
