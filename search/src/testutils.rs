//! Helpers shared by the unit tests: canned itineraries and mock upstream
//! sources.

use crate::config::SourceConfig;
use crate::model::{Itinerary, Slice, SourceResponse};
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// One itinerary with a slice per flight number. Timestamps and airport
/// names are fixed so keys differ only through price and flight numbers.
pub fn itinerary(price: f64, flight_numbers: &[&str]) -> Itinerary {
    let slices = flight_numbers
        .iter()
        .map(|number| Slice {
            origin_name: "Schonefeld".to_string(),
            destination_name: "Stansted".to_string(),
            departure_date_time_utc: "2019-08-08T04:30:00.000Z".to_string(),
            arrival_date_time_utc: "2019-08-08T06:25:00.000Z".to_string(),
            flight_number: (*number).to_string(),
            duration: 115,
        })
        .collect();

    Itinerary { slices, price }
}

/// Starts a mock upstream serving `flights` on `GET /flights`, optionally
/// delaying every response.
pub async fn mock_source(flights: Vec<Itinerary>, delay: Option<Duration>) -> MockServer {
    let server = MockServer::start().await;

    let mut template = ResponseTemplate::new(200).set_body_json(SourceResponse { flights });
    if let Some(delay) = delay {
        template = template.set_delay(delay);
    }

    Mock::given(method("GET"))
        .and(path("/flights"))
        .respond_with(template)
        .mount(&server)
        .await;

    server
}

/// Source descriptor pointing at a mock upstream.
pub fn source(name: &str, server: &MockServer) -> SourceConfig {
    SourceConfig {
        name: name.to_string(),
        url: Url::parse(&format!("{}/flights", server.uri())).unwrap(),
    }
}

/// Source descriptor pointing at a closed port; fetches fail fast.
pub fn unreachable_source(name: &str) -> SourceConfig {
    SourceConfig {
        name: name.to_string(),
        url: Url::parse("http://127.0.0.1:1/flights").unwrap(),
    }
}
