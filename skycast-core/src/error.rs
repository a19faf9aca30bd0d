//! Error taxonomy for the dashboard core.
//!
//! Geocoding and weather failures are deliberately asymmetric: a failed or
//! empty geocode blocks the whole sequence, so it surfaces as a user-visible
//! "city not found" notification; a failed weather fetch happens after the
//! user already has a location on screen, so it is logged and dropped
//! silently. Missing individual fields are never errors at all (see the
//! snapshot builder).

use thiserror::Error;

/// Failures talking to or interpreting the geocoding collaborator.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// The query produced no candidates at all.
    #[error("no location found for \"{0}\"")]
    NotFound(String),

    #[error("geocoding request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("geocoding request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to parse geocoding response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures talking to or interpreting the forecast collaborator.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("weather request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("weather request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to parse weather response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures building a render-ready snapshot from a raw weather response.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The response carried neither an hourly nor a daily section, so there
    /// is nothing renderable. Individual missing fields never raise this;
    /// they are defaulted instead.
    #[error("weather response carried neither hourly nor daily data")]
    IncompleteData,
}
