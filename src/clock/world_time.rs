use std::time::Duration;

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

use super::DateSource;
use crate::core::{PricingError, Result};

const WORLD_TIME_URL: &str = "https://worldtimeapi.org/api/ip";

#[derive(Deserialize)]
struct WorldTimeResponse {
    datetime: Option<String>,
}

/// Date from the public world time API, for machines with an unreliable
/// clock. Blocking; meant to be wrapped in [`super::issue_date`].
#[derive(Debug, Clone)]
pub struct WorldTimeApi {
    url: String,
    timeout: Duration,
}

impl Default for WorldTimeApi {
    fn default() -> Self {
        Self {
            url: WORLD_TIME_URL.to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

impl WorldTimeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn clock_err(e: impl std::fmt::Display) -> PricingError {
    PricingError::Clock(e.to_string())
}

/// Extract the calendar date from a world time API body.
///
/// The date is taken in the offset the API reports, not converted to UTC.
pub(crate) fn parse_body(body: &str) -> Result<NaiveDate> {
    let resp: WorldTimeResponse = serde_json::from_str(body).map_err(clock_err)?;
    let raw = resp
        .datetime
        .ok_or_else(|| PricingError::Clock("response has no datetime".into()))?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(dt.date_naive());
    }
    let day = raw.get(..10).unwrap_or(&raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(clock_err)
}

impl DateSource for WorldTimeApi {
    fn today(&self) -> Result<NaiveDate> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(clock_err)?;
        let resp = client.get(&self.url).send().map_err(clock_err)?;
        let status = resp.status();
        let body = resp.text().map_err(clock_err)?;
        if !status.is_success() {
            return Err(PricingError::Clock(format!("HTTP {status}")));
        }
        parse_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_offset_datetime() {
        let body = r#"{"datetime":"2024-06-15T23:40:12.123456+03:30","utc_offset":"+03:30"}"#;
        assert_eq!(
            parse_body(body).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
        );
    }

    #[test]
    fn missing_datetime_is_clock_error() {
        assert!(matches!(parse_body("{}"), Err(PricingError::Clock(_))));
        assert!(matches!(parse_body("not json"), Err(PricingError::Clock(_))));
    }
}
