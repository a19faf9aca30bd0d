//! Forward geocoding: resolve a free-text city search to coordinates.
//! Uses Nominatim (OpenStreetMap) - free, no API key required.

use crate::error::GeocodeError;
use crate::model::Coordinates;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
const REQUEST_TIMEOUT_SECS: u64 = 10;
// Nominatim's usage policy requires an identifying User-Agent.
const USER_AGENT: &str = "skycast/0.1 (https://github.com/skycast)";

/// Country codes preferred when a search matches places on several
/// continents. Geocoders return ambiguous matches for common place names;
/// this static regional list disambiguates deterministically for the
/// deployment's European user base.
const PRIORITY_COUNTRIES: &[&str] = &[
    "gr", "nl", "de", "fr", "gb", "es", "it", "no", "be", "at",
];

const UNKNOWN_LOCATION: &str = "Unknown location";

/// Address breakdown of a geocoding candidate. Which keys are present
/// depends on settlement size and country; none are required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressRecord {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub municipality: Option<String>,
    pub suburb: Option<String>,
    pub city_district: Option<String>,
    pub county: Option<String>,
    pub state_district: Option<String>,
    pub state: Option<String>,
    pub province: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    /// Two-letter lowercase ISO code when present.
    pub country_code: Option<String>,
}

/// One geocoding search result. Nominatim serializes coordinates as strings,
/// so they are parsed lazily and leniently via [`GeoCandidate::coordinates`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeoCandidate {
    lat: Option<String>,
    lon: Option<String>,
    pub display_name: Option<String>,
    pub address: Option<AddressRecord>,
}

impl GeoCandidate {
    /// Coordinates of the candidate, or `None` when absent or unparsable.
    pub fn coordinates(&self) -> Option<Coordinates> {
        let latitude = self.lat.as_deref()?.trim().parse().ok()?;
        let longitude = self.lon.as_deref()?.trim().parse().ok()?;
        Some(Coordinates {
            latitude,
            longitude,
        })
    }

    pub fn country_code(&self) -> Option<&str> {
        self.address.as_ref()?.country_code.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn for_tests(lat: &str, lon: &str, address: Option<AddressRecord>) -> Self {
        Self {
            lat: Some(lat.to_string()),
            lon: Some(lon.to_string()),
            display_name: None,
            address,
        }
    }
}

/// Pick the candidate to use from an ordered result list.
///
/// First candidate whose country code is in the regional priority set wins;
/// with no such candidate the geocoder's own first result is returned
/// unconditionally, even if it has no address or coordinates.
pub fn select(candidates: &[GeoCandidate]) -> Option<&GeoCandidate> {
    candidates
        .iter()
        .find(|c| {
            c.country_code()
                .is_some_and(|cc| PRIORITY_COUNTRIES.contains(&cc.to_ascii_lowercase().as_str()))
        })
        .or_else(|| candidates.first())
}

/// Best-effort human city name from an address record.
///
/// Administrative geocoders label the same settlement differently depending
/// on size and country, so this scans from the most specific settlement kind
/// to the least specific one.
pub fn city_name(address: Option<&AddressRecord>) -> String {
    let Some(addr) = address else {
        return UNKNOWN_LOCATION.to_string();
    };

    [
        &addr.city,
        &addr.town,
        &addr.village,
        &addr.municipality,
        &addr.suburb,
        &addr.city_district,
        &addr.county,
        &addr.state_district,
        &addr.state,
        &addr.province,
        &addr.region,
    ]
    .into_iter()
    .flatten()
    .find(|value| !value.is_empty())
    .cloned()
    .unwrap_or_else(|| UNKNOWN_LOCATION.to_string())
}

/// Two-letter country label for display, or "??" when the record carries no
/// country code. Never fails.
pub fn country_label(address: Option<&AddressRecord>) -> String {
    address
        .and_then(|addr| addr.country_code.as_deref())
        .map(str::to_uppercase)
        .unwrap_or_else(|| "??".to_string())
}

#[async_trait]
pub trait GeocodeProvider: Send + Sync {
    /// Resolve a free-text query to an ordered list of candidates.
    async fn search(&self, query: &str) -> Result<Vec<GeoCandidate>, GeocodeError>;
}

#[derive(Debug, Clone)]
pub struct NominatimClient {
    base_url: String,
    http: Client,
}

impl NominatimClient {
    pub fn new() -> Result<Self, GeocodeError> {
        Self::with_base_url(NOMINATIM_URL.to_string())
    }

    /// Client against a non-default endpoint, used by tests.
    pub fn with_base_url(base_url: String) -> Result<Self, GeocodeError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { base_url, http })
    }
}

#[async_trait]
impl GeocodeProvider for NominatimClient {
    async fn search(&self, query: &str) -> Result<Vec<GeoCandidate>, GeocodeError> {
        let url = format!("{}/search", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("q", query), ("format", "jsonv2"), ("addressdetails", "1")])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(GeocodeError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let candidates: Vec<GeoCandidate> = serde_json::from_str(&body)?;
        Ok(candidates)
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
