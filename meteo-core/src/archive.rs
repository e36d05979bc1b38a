//! Client for the historical weather archive.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use std::fmt::Debug;
use tracing::{debug, info};

use crate::{Config, error::FetchError};

/// Daily variables requested, in the column order the parser expects.
pub const DAILY_FIELDS: &str =
    "temperature_2m_min,temperature_2m_max,precipitation_sum,relative_humidity_2m_mean";

/// Inclusive date range to download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveRequest {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ArchiveRequest {
    /// `today` is the end of the range; `start` falls back to `default_start`.
    pub fn new(start: Option<NaiveDate>, default_start: NaiveDate, today: NaiveDate) -> Self {
        Self {
            start: start.unwrap_or(default_start),
            end: today,
        }
    }
}

/// Anything able to return the raw CSV payload for a date range.
#[async_trait]
pub trait ArchiveSource: Send + Sync + Debug {
    async fn fetch(&self, request: &ArchiveRequest) -> Result<String, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ArchiveClient {
    endpoint: String,
    latitude: f64,
    longitude: f64,
    timezone: String,
    http: Client,
}

impl ArchiveClient {
    pub fn new(config: &Config) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            latitude: config.latitude,
            longitude: config.longitude,
            timezone: config.timezone.clone(),
            http: Client::new(),
        }
    }

    pub fn query_params(&self, request: &ArchiveRequest) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", self.latitude.to_string()),
            ("longitude", self.longitude.to_string()),
            ("start_date", request.start.format("%Y-%m-%d").to_string()),
            ("end_date", request.end.format("%Y-%m-%d").to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            ("timezone", self.timezone.clone()),
            ("format", "csv".to_string()),
        ]
    }
}

#[async_trait]
impl ArchiveSource for ArchiveClient {
    async fn fetch(&self, request: &ArchiveRequest) -> Result<String, FetchError> {
        info!(start = %request.start, end = %request.end, "Downloading daily archive");

        let res = self
            .http
            .get(&self.endpoint)
            .query(&self.query_params(request))
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        debug!(bytes = body.len(), "Archive payload received");
        Ok(body)
    }
}
