//! Flight filter: decides whether one flight satisfies the policy.

use std::fmt;

use crate::model::Flight;
use crate::options::Policy;

/// Why a flight was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// No business cabin is offered.
    NoBusinessCabin,
    /// The trip has more stops than allowed.
    TooManyStops {
        /// Stops on the trip.
        stops: u32,
        /// Configured limit.
        limit: u32,
    },
    /// A segment has more transit stops than allowed.
    TooManyTransitStops {
        /// Transit stops on the segment.
        stops: u32,
        /// Configured limit.
        limit: i64,
    },
    /// A segment is sold or flown by a banned carrier.
    BannedCarrier(String),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoBusinessCabin => write!(f, "no business cabin"),
            Self::TooManyStops { stops, limit } => write!(f, "{stops} stops (max {limit})"),
            Self::TooManyTransitStops { stops, limit } => {
                write!(f, "{stops} transit stops on a segment (max {limit})")
            },
            Self::BannedCarrier(code) => write!(f, "banned carrier {code}"),
        }
    }
}

/// Checks `flight` against `policy`, stopping at the first failed condition.
pub fn check(flight: &Flight, policy: &Policy) -> Result<(), Rejection> {
    if !flight.has_business() {
        return Err(Rejection::NoBusinessCabin);
    }

    if let Some(limit) = policy.max_stops {
        if flight.stops > limit {
            return Err(Rejection::TooManyStops {
                stops: flight.stops,
                limit,
            });
        }
    }

    for segment in &flight.segments {
        if i64::from(segment.number_of_stops) > policy.max_transit_stops {
            return Err(Rejection::TooManyTransitStops {
                stops: segment.number_of_stops,
                limit: policy.max_transit_stops,
            });
        }

        for carrier in [&segment.operating_carrier, &segment.marketing_carrier] {
            if policy.is_banned(&carrier.code) {
                return Err(Rejection::BannedCarrier(carrier.code.clone()));
            }
        }
    }

    Ok(())
}

/// Whether `flight` passes every policy condition.
pub fn passes(flight: &Flight, policy: &Policy) -> bool {
    check(flight, policy).is_ok()
}
