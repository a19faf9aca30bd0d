//! Core library for the `skycast` weather dashboard.
//!
//! This crate defines:
//! - Geocoding (city search, candidate selection, address resolution)
//! - The forecast collaborator and the snapshot builder
//! - Dashboard orchestration and configuration handling
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod geocode;
pub mod icon;
pub mod model;
pub mod snapshot;

pub use config::Config;
pub use dashboard::{Dashboard, Phase, Renderer, Trigger};
pub use error::{ForecastError, GeocodeError, SnapshotError};
pub use forecast::{ForecastProvider, ForecastResponse, OpenMeteoClient};
pub use geocode::{AddressRecord, GeoCandidate, GeocodeProvider, NominatimClient};
pub use icon::{Condition, icon_for};
pub use model::{
    Coordinates, CurrentReadings, DailyEntry, HourlyEntry, LocationLabel, UnitPreference,
    WeatherSnapshot,
};
pub use snapshot::build_snapshot;
