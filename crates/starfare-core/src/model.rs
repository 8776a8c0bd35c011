//! Wire model returned by the fare search API.
//!
//! Only the fields the search pipeline reads are modelled; everything else in
//! the payload is ignored during decoding.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// One search response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Application-level errors reported by the API.
    #[serde(default)]
    pub errors: Option<Vec<RemoteError>>,
    /// Outbound offers, absent when the API found none.
    #[serde(default)]
    pub outbound_flights: Option<Vec<Flight>>,
    /// Inbound offers, absent when the API found none.
    #[serde(default)]
    pub inbound_flights: Option<Vec<Flight>>,
}

impl SearchResult {
    /// First reported error message, if any.
    #[must_use]
    pub fn first_error(&self) -> Option<&str> {
        self.errors
            .as_deref()
            .and_then(<[RemoteError]>::first)
            .map(|e| e.error_message.as_str())
    }

    /// Splits into outbound and inbound lists, treating absence as empty.
    #[must_use]
    pub fn into_flights(self) -> (Vec<Flight>, Vec<Flight>) {
        (
            self.outbound_flights.unwrap_or_default(),
            self.inbound_flights.unwrap_or_default(),
        )
    }
}

/// An error entry in a search response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteError {
    /// Human-readable message.
    #[serde(default)]
    pub error_message: String,
}

/// One priced trip in one direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    /// Number of stops (aircraft changes) on the trip.
    #[serde(default)]
    pub stops: u32,
    /// Departure in local time.
    pub start_time_in_local: NaiveDateTime,
    /// Arrival in local time.
    pub end_time_in_local: NaiveDateTime,
    /// Cabin offers.
    #[serde(default)]
    pub cabins: Cabins,
    /// Legs in travel order.
    #[serde(default)]
    pub segments: Vec<Segment>,
}

impl Flight {
    /// Whether a business cabin is offered.
    #[must_use]
    pub const fn has_business(&self) -> bool {
        self.cabins.business.is_some()
    }

    /// Local arrival minus local departure.
    #[must_use]
    pub fn elapsed(&self) -> TimeDelta {
        self.end_time_in_local - self.start_time_in_local
    }
}

/// Cabin offers for a trip. Only presence is inspected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cabins {
    /// Economy offer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub economy: Option<serde_json::Value>,
    /// Premium economy offer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium: Option<serde_json::Value>,
    /// Business offer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business: Option<serde_json::Value>,
}

/// One leg flown on a single aircraft.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Intermediate stops without changing aircraft.
    #[serde(default)]
    pub number_of_stops: u32,
    /// Departure airport.
    pub departure_airport: CodeName,
    /// Arrival airport.
    pub arrival_airport: CodeName,
    /// Carrier selling the leg.
    pub marketing_carrier: CodeName,
    /// Carrier flying the leg.
    pub operating_carrier: CodeName,
}

/// A short code with its display name (airport or carrier).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeName {
    /// IATA code.
    pub code: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

impl CodeName {
    /// Builds a code/name pair.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}
