use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Unit system the dashboard was asked to display.
///
/// Units are a request parameter sent to the forecast collaborator, not a
/// response-side conversion: toggling re-issues the fetch under the new bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitPreference {
    #[default]
    Celsius,
    Fahrenheit,
}

impl UnitPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitPreference::Celsius => "celsius",
            UnitPreference::Fahrenheit => "fahrenheit",
        }
    }

    pub const fn all() -> &'static [UnitPreference] {
        &[UnitPreference::Celsius, UnitPreference::Fahrenheit]
    }

    /// Temperature unit string understood by the forecast API.
    pub fn temperature_unit(&self) -> &'static str {
        self.as_str()
    }

    pub fn wind_speed_unit(&self) -> &'static str {
        match self {
            UnitPreference::Celsius => "kmh",
            UnitPreference::Fahrenheit => "mph",
        }
    }

    pub fn precipitation_unit(&self) -> &'static str {
        match self {
            UnitPreference::Celsius => "mm",
            UnitPreference::Fahrenheit => "inch",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            UnitPreference::Celsius => "°C",
            UnitPreference::Fahrenheit => "°F",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            UnitPreference::Celsius => UnitPreference::Fahrenheit,
            UnitPreference::Fahrenheit => UnitPreference::Celsius,
        }
    }
}

impl std::fmt::Display for UnitPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnitPreference {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "c" | "celsius" => Ok(UnitPreference::Celsius),
            "f" | "fahrenheit" => Ok(UnitPreference::Fahrenheit),
            _ => Err(anyhow::anyhow!(
                "Unknown unit '{value}'. Supported units: C (celsius), F (fahrenheit)."
            )),
        }
    }
}

/// Geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Substitute location when a geocoding candidate carries no usable
/// coordinates: Rotterdam, NL.
pub const FALLBACK_COORDINATES: Coordinates = Coordinates {
    latitude: 51.9244,
    longitude: 4.4777,
};

/// "City, CC" pair handed to the renderer next to a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationLabel {
    pub city: String,
    pub country: String,
}

impl std::fmt::Display for LocationLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.city, self.country)
    }
}

/// Live readings shown in the current-conditions panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentReadings {
    pub temperature: f64,
    pub feels_like: f64,
    pub wind_speed: f64,
    pub humidity: f64,
    pub precipitation: f64,
    pub condition_code: i32,
}

/// One slot of the 8-entry hourly strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyEntry {
    /// 12-hour clock label, e.g. "3 PM".
    pub label: String,
    pub temperature: f64,
    pub condition_code: i32,
    /// True when this entry matches the wall-clock date and hour.
    pub is_current: bool,
}

/// One row of the 7-day table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    pub date: NaiveDate,
    pub max_temp: f64,
    pub min_temp: f64,
    pub condition_code: i32,
}

/// Render-ready weather data for one fetch cycle. Built fresh on every
/// successful fetch and discarded on the next one; never cached or merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub current: CurrentReadings,
    pub hourly: Vec<HourlyEntry>,
    pub daily: Vec<DailyEntry>,
    pub units: UnitPreference,
}
