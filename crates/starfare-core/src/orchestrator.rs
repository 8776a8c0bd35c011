//! Orchestrator for the per-destination query fan-out.
//!
//! For one destination, every day offset in the search span becomes one query.
//! All of them run concurrently and are joined before anything is aggregated,
//! so results come back in offset order no matter which query finished first.
//! A failing query contributes nothing; it never cancels its siblings.

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::client::{ALLIANCE_MODE, SearchClient, SearchQuery};
use crate::filter;
use crate::model::Flight;
use crate::options::Policy;

/// Flights returned for one day offset.
#[derive(Debug, Clone, Default)]
pub struct DayResult {
    /// Day offset the query was built for.
    pub offset: u32,
    /// Outbound flights as returned.
    pub outbound: Vec<Flight>,
    /// Inbound flights as returned.
    pub inbound: Vec<Flight>,
}

impl DayResult {
    /// A result with no flights.
    #[must_use]
    pub const fn empty(offset: u32) -> Self {
        Self {
            offset,
            outbound: Vec::new(),
            inbound: Vec::new(),
        }
    }
}

/// Filtered flights for one destination, in ascending day-offset order.
#[derive(Debug, Clone, Default)]
pub struct DestinationResults {
    /// Destination airport code.
    pub destination: String,
    /// Outbound flights that passed the filter.
    pub outbound: Vec<Flight>,
    /// Inbound flights that passed the filter.
    pub inbound: Vec<Flight>,
}

/// Runs the concurrent queries for a destination and aggregates them.
///
/// ## Example
///
/// ```rust,ignore
/// let orchestrator = SearchOrchestrator::new(HttpSearchClient::from_env()?);
/// for destination in &policy.destinations {
///     let results = orchestrator.search_destination(&policy, destination).await;
///     println!("{} outbound", results.outbound.len());
/// }
/// ```
#[derive(Debug)]
pub struct SearchOrchestrator<C: SearchClient> {
    client: C,
    mode: String,
}

impl<C: SearchClient> SearchOrchestrator<C> {
    /// Creates an orchestrator using the alliance search mode.
    #[must_use]
    pub fn new(client: C) -> Self {
        Self {
            client,
            mode: ALLIANCE_MODE.to_string(),
        }
    }

    /// The underlying client.
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// Builds the query for `destination` at day `offset`.
    #[must_use]
    pub fn build_query(&self, policy: &Policy, destination: &str, offset: u32) -> Option<SearchQuery> {
        let (out_date, in_date) = policy.dates_for(offset)?;
        Some(SearchQuery {
            mode: self.mode.clone(),
            origin: policy.origin.clone(),
            destination: destination.to_string(),
            out_date,
            in_date,
        })
    }

    /// Runs a single day's query. Failures degrade to an empty result.
    pub async fn query_day(&self, policy: &Policy, destination: &str, offset: u32) -> DayResult {
        let Some(query) = self.build_query(policy, destination, offset) else {
            warn!("Skipping day {} to {}: date out of range", offset, destination);
            return DayResult::empty(offset);
        };

        match self.client.search(&query).await {
            Ok(result) => {
                if let Some(message) = result.first_error() {
                    warn!("flysas.com says: {}", message);
                }
                let (outbound, inbound) = result.into_flights();
                debug!(
                    "{} -> {} on {}: {} outbound, {} inbound",
                    query.origin,
                    destination,
                    query.out_date,
                    outbound.len(),
                    inbound.len()
                );
                DayResult {
                    offset,
                    outbound,
                    inbound,
                }
            },
            Err(e) => {
                warn!(
                    "Error in query {} -> {} on {}: {}",
                    query.origin, destination, query.out_date, e
                );
                DayResult::empty(offset)
            },
        }
    }

    /// Queries every day in the span concurrently, then filters the
    /// concatenated results.
    pub async fn search_destination(&self, policy: &Policy, destination: &str) -> DestinationResults {
        info!("Searching to {}...", destination);

        let days = join_all(
            (0..policy.span_days).map(|offset| self.query_day(policy, destination, offset)),
        )
        .await;

        let mut results = DestinationResults {
            destination: destination.to_string(),
            ..DestinationResults::default()
        };
        for day in days {
            results
                .outbound
                .extend(day.outbound.into_iter().filter(|f| keep(f, policy)));
            results
                .inbound
                .extend(day.inbound.into_iter().filter(|f| keep(f, policy)));
        }
        results
    }
}

fn keep(flight: &Flight, policy: &Policy) -> bool {
    match filter::check(flight, policy) {
        Ok(()) => true,
        Err(reason) => {
            debug!("Dropping {}: {}", flight.start_time_in_local, reason);
            false
        },
    }
}
