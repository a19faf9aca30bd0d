//! Builds a render-ready [`WeatherSnapshot`] from a raw forecast response.
//!
//! Weather telemetry is best-effort display, not a correctness-critical
//! path: individual missing fields are defaulted (feels-like falls back to
//! the current temperature, the rest to 0) instead of failing the build.
//! The only fatal case is a response with neither hourly nor daily data.

use crate::error::SnapshotError;
use crate::forecast::{DailyBlock, ForecastResponse, HourlyBlock};
use crate::model::{CurrentReadings, DailyEntry, HourlyEntry, UnitPreference, WeatherSnapshot};
use chrono::{NaiveDateTime, Timelike};

/// Entries emitted into the hourly strip.
const HOURLY_WINDOW: usize = 8;
/// Calendar days emitted into the daily table.
const DAILY_WINDOW: usize = 7;

/// WMO code shown when a reading carries no code at all; maps to the
/// overcast icon, same as any unknown code.
const DEFAULT_CODE: i32 = 3;

/// Build a snapshot for display under the requested unit bundle.
///
/// `now` is the wall-clock timestamp in the forecast's local timezone; it is
/// an explicit parameter so the hourly-window and current-hour lookups stay
/// deterministic under test.
pub fn build_snapshot(
    raw: &ForecastResponse,
    units: UnitPreference,
    now: NaiveDateTime,
) -> Result<WeatherSnapshot, SnapshotError> {
    if raw.hourly.is_none() && raw.daily.is_none() {
        return Err(SnapshotError::IncompleteData);
    }

    let current = current_readings(raw, now);
    let hourly = hourly_window(raw.hourly.as_ref(), now);
    let daily = daily_series(raw.daily.as_ref(), &current);

    Ok(WeatherSnapshot {
        current,
        hourly,
        daily,
        units,
    })
}

/// Current readings, preferring the dedicated current block and falling back
/// to the hourly sample closest to `now` when the block is absent (the block
/// is only returned when its fields were requested).
fn current_readings(raw: &ForecastResponse, now: NaiveDateTime) -> CurrentReadings {
    if let Some(current) = &raw.current {
        let temperature = current.temperature_2m.unwrap_or(0.0);
        return CurrentReadings {
            temperature,
            feels_like: current.apparent_temperature.unwrap_or(temperature),
            wind_speed: current.wind_speed_10m.unwrap_or(0.0),
            humidity: current.relative_humidity_2m.unwrap_or(0.0),
            precipitation: current.precipitation.unwrap_or(0.0),
            condition_code: current.weather_code.unwrap_or(DEFAULT_CODE),
        };
    }

    let synthetic = raw
        .hourly
        .as_ref()
        .and_then(|hourly| closest_hour_index(&hourly.time, now).map(|idx| (hourly, idx)));

    let Some((hourly, idx)) = synthetic else {
        tracing::debug!("no current block and no hourly samples, defaulting readings");
        return CurrentReadings {
            temperature: 0.0,
            feels_like: 0.0,
            wind_speed: 0.0,
            humidity: 0.0,
            precipitation: 0.0,
            condition_code: DEFAULT_CODE,
        };
    };

    let temperature = hourly.temperature_2m.get(idx).copied().unwrap_or(0.0);
    CurrentReadings {
        temperature,
        feels_like: hourly
            .apparent_temperature
            .get(idx)
            .copied()
            .unwrap_or(temperature),
        wind_speed: hourly.wind_speed_10m.get(idx).copied().unwrap_or(0.0),
        humidity: hourly.relative_humidity_2m.get(idx).copied().unwrap_or(0.0),
        precipitation: hourly.precipitation.get(idx).copied().unwrap_or(0.0),
        condition_code: hourly.weather_code.get(idx).copied().unwrap_or(DEFAULT_CODE),
    }
}

/// Index of the hourly timestamp closest to `now` by absolute difference.
fn closest_hour_index(times: &[NaiveDateTime], now: NaiveDateTime) -> Option<usize> {
    times
        .iter()
        .enumerate()
        .min_by_key(|(_, t)| (**t - now).num_seconds().abs())
        .map(|(idx, _)| idx)
}

/// Up to [`HOURLY_WINDOW`] consecutive entries starting at the first
/// timestamp >= `now` (index 0 when the whole series is in the past).
/// Stops at the end of the series, no wrap or pad.
fn hourly_window(hourly: Option<&HourlyBlock>, now: NaiveDateTime) -> Vec<HourlyEntry> {
    let Some(hourly) = hourly else {
        return Vec::new();
    };

    let start = hourly.time.iter().position(|t| *t >= now).unwrap_or(0);

    hourly
        .time
        .iter()
        .enumerate()
        .skip(start)
        .take(HOURLY_WINDOW)
        .map(|(idx, t)| HourlyEntry {
            label: hour_label(t.hour()),
            temperature: hourly.temperature_2m.get(idx).copied().unwrap_or(0.0),
            condition_code: hourly.weather_code.get(idx).copied().unwrap_or(DEFAULT_CODE),
            is_current: t.date() == now.date() && t.hour() == now.hour(),
        })
        .collect()
}

/// 12-hour clock label with AM/PM; hour 0 displays as "12".
pub fn hour_label(hour: u32) -> String {
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display} {suffix}")
}

/// Up to [`DAILY_WINDOW`] days. Today (index 0) mirrors the live current
/// reading for both temperatures and the icon, so the daily table never
/// disagrees with the current-conditions panel; later days use the daily
/// aggregates verbatim.
fn daily_series(daily: Option<&DailyBlock>, current: &CurrentReadings) -> Vec<DailyEntry> {
    let Some(daily) = daily else {
        return Vec::new();
    };

    daily
        .time
        .iter()
        .take(DAILY_WINDOW)
        .enumerate()
        .map(|(idx, date)| {
            if idx == 0 {
                DailyEntry {
                    date: *date,
                    max_temp: current.temperature,
                    min_temp: current.temperature,
                    condition_code: current.condition_code,
                }
            } else {
                DailyEntry {
                    date: *date,
                    max_temp: daily.temperature_2m_max.get(idx).copied().unwrap_or(0.0),
                    min_temp: daily.temperature_2m_min.get(idx).copied().unwrap_or(0.0),
                    condition_code: daily.weather_code.get(idx).copied().unwrap_or(DEFAULT_CODE),
                }
            }
        })
        .collect()
}
