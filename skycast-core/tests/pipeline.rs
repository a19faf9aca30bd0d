//! End-to-end pipeline tests against mocked HTTP collaborators:
//! free-text search -> geocode -> candidate selection -> weather fetch ->
//! snapshot render, plus the unit-toggle path.

use skycast_core::dashboard::{Dashboard, Renderer, Trigger};
use skycast_core::forecast::OpenMeteoClient;
use skycast_core::geocode::NominatimClient;
use skycast_core::model::{LocationLabel, UnitPreference, WeatherSnapshot};
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Rendered {
        label: String,
        snapshot: WeatherSnapshot,
    },
    NotFound(String),
}

#[derive(Clone)]
struct RecordingRenderer {
    events: Arc<Mutex<Vec<Event>>>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, snapshot: &WeatherSnapshot, label: &LocationLabel) {
        self.events.lock().unwrap().push(Event::Rendered {
            label: label.to_string(),
            snapshot: snapshot.clone(),
        });
    }

    fn city_not_found(&mut self, query: &str) {
        self.events
            .lock()
            .unwrap()
            .push(Event::NotFound(query.to_string()));
    }
}

fn geocode_body() -> serde_json::Value {
    serde_json::json!([
        {
            "lat": "42.9956",
            "lon": "-71.4548",
            "display_name": "Manchester, New Hampshire, United States",
            "address": {
                "city": "Manchester",
                "state": "New Hampshire",
                "country_code": "us"
            }
        },
        {
            "lat": "53.4794",
            "lon": "-2.2453",
            "display_name": "Manchester, Greater Manchester, England",
            "address": {
                "city": "Manchester",
                "state": "England",
                "country_code": "gb"
            }
        }
    ])
}

fn forecast_body() -> serde_json::Value {
    serde_json::json!({
        "current": {
            "temperature_2m": 18.0,
            "apparent_temperature": 16.5,
            "relative_humidity_2m": 71.0,
            "precipitation": 0.2,
            "weather_code": 61,
            "wind_speed_10m": 14.0
        },
        "hourly": {
            "time": [
                "2026-09-01T10:00", "2026-09-01T11:00", "2026-09-01T12:00",
                "2026-09-01T13:00", "2026-09-01T14:00", "2026-09-01T15:00",
                "2026-09-01T16:00", "2026-09-01T17:00", "2026-09-01T18:00"
            ],
            "temperature_2m": [15.0, 16.0, 17.0, 18.0, 18.5, 18.0, 17.5, 17.0, 16.0],
            "weather_code": [3, 3, 61, 61, 63, 61, 3, 2, 1]
        },
        "daily": {
            "time": [
                "2026-09-01", "2026-09-02", "2026-09-03", "2026-09-04",
                "2026-09-05", "2026-09-06", "2026-09-07", "2026-09-08"
            ],
            "weather_code": [61, 63, 3, 0, 1, 45, 95, 2],
            "temperature_2m_max": [21.0, 20.0, 19.0, 22.0, 23.0, 18.0, 17.0, 24.0],
            "temperature_2m_min": [12.0, 11.0, 10.0, 13.0, 14.0, 9.0, 8.0, 15.0]
        }
    })
}

fn fixed_now() -> chrono::NaiveDateTime {
    chrono::NaiveDate::from_ymd_opt(2026, 9, 1)
        .expect("valid date")
        .and_hms_opt(12, 30, 0)
        .expect("valid time")
}

async fn dashboard_against(
    server: &MockServer,
) -> (
    Dashboard<NominatimClient, OpenMeteoClient, RecordingRenderer>,
    Arc<Mutex<Vec<Event>>>,
) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let dashboard = Dashboard::new(
        NominatimClient::with_base_url(server.uri()).expect("geocode client builds"),
        OpenMeteoClient::with_base_url(server.uri()).expect("forecast client builds"),
        RecordingRenderer {
            events: Arc::clone(&events),
        },
        UnitPreference::Celsius,
    )
    .with_clock(fixed_now);

    (dashboard, events)
}

#[tokio::test]
async fn search_renders_preferred_candidate() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "manchester"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geocode_body()))
        .mount(&server)
        .await;

    // the GB candidate wins the regional tie-break, so its coordinates
    // must reach the forecast request
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "53.4794"))
        .and(query_param("temperature_unit", "celsius"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&server)
        .await;

    let (mut dashboard, events) = dashboard_against(&server).await;
    dashboard
        .handle(Trigger::Search("manchester".to_string()))
        .await;

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 1);

    let Event::Rendered { label, snapshot } = &events[0] else {
        panic!("expected a render, got {:?}", events[0]);
    };

    assert_eq!(label, "Manchester, GB");
    assert_eq!(snapshot.current.temperature, 18.0);
    assert_eq!(snapshot.current.feels_like, 16.5);

    // today mirrors the live reading, later days use the aggregates
    assert_eq!(snapshot.daily.len(), 7);
    assert_eq!(snapshot.daily[0].max_temp, 18.0);
    assert_eq!(snapshot.daily[0].min_temp, 18.0);
    assert_eq!(snapshot.daily[0].condition_code, 61);
    assert_eq!(snapshot.daily[1].max_temp, 20.0);

    // window starts at 13:00, the first hour at or after 12:30
    assert_eq!(snapshot.hourly.len(), 6);
    assert_eq!(snapshot.hourly[0].label, "1 PM");
    assert!(snapshot.hourly.iter().all(|entry| !entry.is_current));
}

#[tokio::test]
async fn unit_toggle_refetches_with_stored_coordinates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geocode_body()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("temperature_unit", "celsius"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "53.4794"))
        .and(query_param("temperature_unit", "fahrenheit"))
        .and(query_param("wind_speed_unit", "mph"))
        .and(query_param("precipitation_unit", "inch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&server)
        .await;

    let (mut dashboard, events) = dashboard_against(&server).await;
    dashboard
        .handle(Trigger::Search("manchester".to_string()))
        .await;
    dashboard
        .handle(Trigger::Units(UnitPreference::Fahrenheit))
        .await;

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 2);
    let Event::Rendered { snapshot, .. } = &events[1] else {
        panic!("expected a render, got {:?}", events[1]);
    };
    assert_eq!(snapshot.units, UnitPreference::Fahrenheit);
}

#[tokio::test]
async fn empty_geocode_response_surfaces_city_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let (mut dashboard, events) = dashboard_against(&server).await;
    dashboard.handle(Trigger::Search("atlantis".to_string())).await;

    assert_eq!(
        *events.lock().unwrap(),
        vec![Event::NotFound("atlantis".to_string())]
    );
}

#[tokio::test]
async fn weather_outage_after_geocode_stays_silent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geocode_body()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let (mut dashboard, events) = dashboard_against(&server).await;
    dashboard
        .handle(Trigger::Search("manchester".to_string()))
        .await;

    // no render, no notification; the session still holds coordinates
    assert!(events.lock().unwrap().is_empty());
    assert!(dashboard.coordinates().is_some());
}
