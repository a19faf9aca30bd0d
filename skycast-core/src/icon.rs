//! Mapping from WMO weather codes to icon identifiers.
//! See: https://open-meteo.com/en/docs#weathervariables

/// Static-asset extension for the icon set. The dashboard ships lossy web
/// images; the identifier format is `icon-<category>.<ext>`.
const ICON_EXT: &str = "webp";

/// Weather condition categories mapped from WMO codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Condition {
    Clear,
    PartlyCloudy,
    #[default]
    Overcast,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Storm,
}

impl Condition {
    /// Convert a WMO weather code to its category. Unknown codes fall back
    /// to `Overcast`; this is silent and never an error.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1 | 2 => Self::PartlyCloudy,
            3 => Self::Overcast,
            45 | 48 => Self::Fog,
            51 | 53 | 55 | 56 | 57 => Self::Drizzle,
            61 | 63 | 65 | 66 | 67 | 80 | 81 | 82 => Self::Rain,
            71 | 73 | 75 | 77 | 85 | 86 => Self::Snow,
            95 | 96 | 99 => Self::Storm,
            other => {
                tracing::debug!(code = other, "unmapped weather code, showing overcast");
                Self::Overcast
            }
        }
    }

    /// Category slug used in icon file names.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::PartlyCloudy => "partly-cloudy",
            Self::Overcast => "overcast",
            Self::Fog => "fog",
            Self::Drizzle => "drizzle",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Storm => "storm",
        }
    }

    /// Human-readable description for text output.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Overcast => "Overcast",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Storm => "Thunderstorm",
        }
    }
}

/// Icon identifier for a weather code, e.g. `icon-rain.webp`.
pub fn icon_for(code: i32) -> String {
    format!("icon-{}.{}", Condition::from_code(code).category(), ICON_EXT)
}
