//! Forecast collaborator: current/hourly/daily weather from Open-Meteo.
//! No API key required; units and field lists are request parameters.

use crate::error::ForecastError;
use crate::model::{Coordinates, UnitPreference};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use std::time::Duration;

pub const OPEN_METEO_URL: &str = "https://api.open-meteo.com";
const REQUEST_TIMEOUT_SECS: u64 = 10;

const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,apparent_temperature,precipitation,weather_code,wind_speed_10m";
const HOURLY_FIELDS: &str =
    "temperature_2m,apparent_temperature,relative_humidity_2m,precipitation,weather_code,wind_speed_10m";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min";

/// Raw forecast payload. Every section is optional; the snapshot builder
/// decides what is still renderable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub current: Option<CurrentBlock>,
    #[serde(default)]
    pub hourly: Option<HourlyBlock>,
    #[serde(default)]
    pub daily: Option<DailyBlock>,
}

/// Dedicated current-weather block. Individual fields can be absent
/// depending on which parameters were requested.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentBlock {
    #[serde(default)]
    pub temperature_2m: Option<f64>,
    #[serde(default)]
    pub apparent_temperature: Option<f64>,
    #[serde(default)]
    pub relative_humidity_2m: Option<f64>,
    #[serde(default)]
    pub precipitation: Option<f64>,
    #[serde(default)]
    pub weather_code: Option<i32>,
    #[serde(default)]
    pub wind_speed_10m: Option<f64>,
}

/// Hourly section: parallel arrays indexed by position, with local
/// ISO-8601 timestamps (the request uses `timezone=auto`, so no offset).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HourlyBlock {
    #[serde(default, deserialize_with = "local_timestamps")]
    pub time: Vec<NaiveDateTime>,
    #[serde(default)]
    pub temperature_2m: Vec<f64>,
    #[serde(default)]
    pub apparent_temperature: Vec<f64>,
    #[serde(default)]
    pub relative_humidity_2m: Vec<f64>,
    #[serde(default)]
    pub precipitation: Vec<f64>,
    #[serde(default)]
    pub weather_code: Vec<i32>,
    #[serde(default)]
    pub wind_speed_10m: Vec<f64>,
}

/// Daily section: parallel arrays with ISO-8601 dates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyBlock {
    #[serde(default)]
    pub time: Vec<NaiveDate>,
    #[serde(default)]
    pub weather_code: Vec<i32>,
    #[serde(default)]
    pub temperature_2m_max: Vec<f64>,
    #[serde(default)]
    pub temperature_2m_min: Vec<f64>,
}

// Open-Meteo emits minute precision ("2026-08-29T14:00"), which chrono's
// stock NaiveDateTime deserializer rejects.
fn local_timestamps<'de, D>(deserializer: D) -> Result<Vec<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<String> = Vec::deserialize(deserializer)?;
    raw.iter()
        .map(|s| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
                .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
                .map_err(|e| serde::de::Error::custom(format!("bad timestamp '{s}': {e}")))
        })
        .collect()
}

#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Fetch the raw forecast for a point under the requested unit bundle.
    async fn fetch(
        &self,
        coordinates: Coordinates,
        units: UnitPreference,
    ) -> Result<ForecastResponse, ForecastError>;
}

#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    base_url: String,
    http: Client,
}

impl OpenMeteoClient {
    pub fn new() -> Result<Self, ForecastError> {
        Self::with_base_url(OPEN_METEO_URL.to_string())
    }

    /// Client against a non-default endpoint, used by tests.
    pub fn with_base_url(base_url: String) -> Result<Self, ForecastError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { base_url, http })
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoClient {
    async fn fetch(
        &self,
        coordinates: Coordinates,
        units: UnitPreference,
    ) -> Result<ForecastResponse, ForecastError> {
        let url = format!("{}/v1/forecast", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", coordinates.latitude.to_string()),
                ("longitude", coordinates.longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("temperature_unit", units.temperature_unit().to_string()),
                ("wind_speed_unit", units.wind_speed_unit().to_string()),
                ("precipitation_unit", units.precipitation_unit().to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ForecastError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: ForecastResponse = serde_json::from_str(&body)?;
        Ok(parsed)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    // cut on a char boundary, error bodies are not always ASCII
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
