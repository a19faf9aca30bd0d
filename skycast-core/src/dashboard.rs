//! Dashboard orchestration: geocode -> select -> weather fetch -> render.
//!
//! One sequence runs per trigger. No error here is fatal: every sequence
//! ends back in [`Phase::Idle`] and the next trigger is accepted.

use crate::error::GeocodeError;
use crate::forecast::ForecastProvider;
use crate::geocode::{self, GeoCandidate, GeocodeProvider};
use crate::model::{
    Coordinates, FALLBACK_COORDINATES, LocationLabel, UnitPreference, WeatherSnapshot,
};
use crate::snapshot::build_snapshot;
use chrono::{Local, NaiveDateTime};

/// Discrete events driving the dashboard, mirroring the two user-input
/// surfaces: a submitted search and a unit-toggle change.
#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    Search(String),
    Units(UnitPreference),
}

/// Where a sequence currently is. Terminal states return to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Geocoding,
    LocationResolved,
    WeatherFetching,
    Rendered,
    Failed,
}

/// Consumer of the dashboard's output. Render is handed a value, never a
/// handle into any particular UI.
pub trait Renderer {
    fn render(&mut self, snapshot: &WeatherSnapshot, label: &LocationLabel);

    /// Geocoding found nothing (or failed); the one user-visible error.
    fn city_not_found(&mut self, query: &str);
}

/// The impure coordinator owning the per-session state: the last resolved
/// coordinates (reused when units change without a new search) and the label
/// rendered next to each snapshot.
pub struct Dashboard<G, F, R> {
    geocoder: G,
    forecast: F,
    renderer: R,
    units: UnitPreference,
    coordinates: Option<Coordinates>,
    label: Option<LocationLabel>,
    phase: Phase,
    /// Monotonically increasing sequence tag; a sequence that is no longer
    /// the latest when its fetch resolves is discarded instead of racing the
    /// newer one's render (last-write-wins made explicit).
    generation: u64,
    clock: fn() -> NaiveDateTime,
}

impl<G, F, R> Dashboard<G, F, R>
where
    G: GeocodeProvider,
    F: ForecastProvider,
    R: Renderer,
{
    pub fn new(geocoder: G, forecast: F, renderer: R, units: UnitPreference) -> Self {
        Self {
            geocoder,
            forecast,
            renderer,
            units,
            coordinates: None,
            label: None,
            phase: Phase::Idle,
            generation: 0,
            clock: || Local::now().naive_local(),
        }
    }

    /// Replace the wall-clock source, for deterministic tests.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn units(&self) -> UnitPreference {
        self.units
    }

    /// Last successfully resolved coordinates, if any search succeeded yet.
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    /// Run one sequence to completion. Always returns with the dashboard
    /// back in `Idle`, whatever happened along the way.
    pub async fn handle(&mut self, trigger: Trigger) {
        match trigger {
            Trigger::Search(query) => {
                let query = query.trim().to_string();
                if query.is_empty() {
                    // blank input: no sequence at all
                    return;
                }
                let generation = self.next_generation();
                self.run_search(generation, &query).await;
            }
            Trigger::Units(units) => {
                self.units = units;
                let Some(coordinates) = self.coordinates else {
                    tracing::debug!("unit change before any resolved location, ignoring");
                    return;
                };
                let generation = self.next_generation();
                self.fetch_and_render(generation, coordinates).await;
            }
        }
    }

    async fn run_search(&mut self, generation: u64, query: &str) {
        self.set_phase(Phase::Geocoding);

        let candidates = match self.geocode_phase(query).await {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!(error = %e, query, "geocoding failed");
                self.renderer.city_not_found(query);
                self.set_phase(Phase::Failed);
                self.set_phase(Phase::Idle);
                return;
            }
        };

        if self.is_stale(generation) {
            tracing::debug!(generation, "discarding superseded geocode result");
            self.set_phase(Phase::Idle);
            return;
        }

        // non-empty list, so select always yields a candidate
        let Some(chosen) = geocode::select(&candidates) else {
            self.set_phase(Phase::Idle);
            return;
        };

        let coordinates = chosen.coordinates().unwrap_or_else(|| {
            tracing::warn!(
                display_name = chosen.display_name.as_deref().unwrap_or("<none>"),
                "candidate without usable coordinates, using fallback location"
            );
            FALLBACK_COORDINATES
        });

        self.label = Some(location_label(chosen));
        self.coordinates = Some(coordinates);
        self.set_phase(Phase::LocationResolved);

        // proceed unconditionally, even for a non-ideal candidate
        self.fetch_and_render(generation, coordinates).await;
    }

    async fn geocode_phase(&self, query: &str) -> Result<Vec<GeoCandidate>, GeocodeError> {
        let candidates = self.geocoder.search(query).await?;
        if candidates.is_empty() {
            return Err(GeocodeError::NotFound(query.to_string()));
        }
        Ok(candidates)
    }

    async fn fetch_and_render(&mut self, generation: u64, coordinates: Coordinates) {
        self.set_phase(Phase::WeatherFetching);

        let raw = match self.forecast.fetch(coordinates, self.units).await {
            Ok(raw) => raw,
            Err(e) => {
                // deliberately silent: the user already has a location on
                // screen, so a failed refresh only gets logged
                tracing::warn!(error = %e, "weather fetch failed, keeping the last view");
                self.set_phase(Phase::Failed);
                self.set_phase(Phase::Idle);
                return;
            }
        };

        if self.is_stale(generation) {
            tracing::debug!(generation, "discarding superseded weather result");
            self.set_phase(Phase::Idle);
            return;
        }

        match build_snapshot(&raw, self.units, (self.clock)()) {
            Ok(snapshot) => {
                let label = self.label.clone().unwrap_or_else(|| LocationLabel {
                    city: "Unknown location".to_string(),
                    country: "??".to_string(),
                });
                self.renderer.render(&snapshot, &label);
                self.set_phase(Phase::Rendered);
            }
            Err(e) => {
                tracing::warn!(error = %e, "weather response not renderable");
                self.set_phase(Phase::Failed);
            }
        }

        self.set_phase(Phase::Idle);
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    fn is_stale(&self, generation: u64) -> bool {
        generation != self.generation
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            tracing::trace!(from = ?self.phase, to = ?phase, "phase transition");
            self.phase = phase;
        }
    }
}

/// City plus 2-letter country label for the chosen candidate.
fn location_label(candidate: &GeoCandidate) -> LocationLabel {
    LocationLabel {
        city: geocode::city_name(candidate.address.as_ref()),
        country: geocode::country_label(candidate.address.as_ref()),
    }
}
