//! Wire-format types for flight itineraries.
//!
//! Field names match the upstream JSON exactly; the same shapes are used for
//! upstream responses and for this service's own `/flights` envelope.

use serde::{Deserialize, Serialize};

/// One directional flight leg.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Slice {
    pub origin_name: String,
    pub destination_name: String,
    pub departure_date_time_utc: String,
    pub arrival_date_time_utc: String,
    pub flight_number: String,
    /// Flight duration in minutes
    pub duration: u32,
}

/// One priced travel option: an ordered sequence of slices plus a price.
///
/// Slice order is meaningful (outbound before inbound) and is preserved from
/// the upstream response through to the client.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Itinerary {
    pub slices: Vec<Slice>,
    pub price: f64,
}

/// Envelope returned by upstream flight sources.
#[derive(Debug, Deserialize, Serialize)]
pub struct SourceResponse {
    pub flights: Vec<Itinerary>,
}

/// Envelope returned by this service on `GET /flights`.
#[derive(Debug, Deserialize, Serialize)]
pub struct FlightsResponse {
    pub flights: Vec<Itinerary>,
}

/// Error envelope for unexpected internal failures.
#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_itinerary_round_trips_upstream_shape() {
        let json = r#"{
            "flights": [
                {
                    "slices": [
                        {
                            "origin_name": "Schonefeld",
                            "destination_name": "Stansted",
                            "departure_date_time_utc": "2019-08-08T04:30:00.000Z",
                            "arrival_date_time_utc": "2019-08-08T06:25:00.000Z",
                            "flight_number": "144",
                            "duration": 115
                        }
                    ],
                    "price": 129
                }
            ]
        }"#;

        let parsed: SourceResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.flights.len(), 1);

        let itinerary = &parsed.flights[0];
        assert_eq!(itinerary.price, 129.0);
        assert_eq!(itinerary.slices[0].flight_number, "144");
        assert_eq!(itinerary.slices[0].duration, 115);

        // Serialization keeps the exact field names
        let out = serde_json::to_value(itinerary).unwrap();
        assert!(out.get("slices").is_some());
        assert!(out["slices"][0].get("departure_date_time_utc").is_some());
    }
}
