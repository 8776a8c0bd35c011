//! # starfare-core
//!
//! Core functionality for starfare - a business-class availability search
//! across a date range and a list of destinations.
//!
//! ## Architecture
//!
//! - **Binding**: a table-driven argument binder mapping CLI tokens and
//!   `name=value` config lines onto typed fields, with validation and usage
//!   output
//! - **Options**: the bindable [`SearchOptions`] and the [`Policy`] derived
//!   from them
//! - **Client**: the [`SearchClient`] seam and its HTTP implementation
//! - **Orchestrator**: concurrent per-day queries for one destination, joined
//!   and aggregated in day order
//! - **Filter**: the per-flight policy predicate
//! - **Report**: text rendering and the code translation table
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use starfare_core::binding::{ArgumentParser, Registry};
//! use starfare_core::{
//!     CodeCollector, HttpSearchClient, Policy, ReportWriter, SearchOptions, SearchOrchestrator,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Registry::<SearchOptions>::build()?;
//! let mut options = SearchOptions::default();
//! ArgumentParser::new(&registry, &mut options)
//!     .parse(&["-From", "CPH", "-To", "JFK", "-Out", "2024-06-01", "-In", "2024-06-15"])?;
//!
//! let policy = Policy::from_options(&options)?;
//! let orchestrator = SearchOrchestrator::new(HttpSearchClient::from_env()?);
//! let mut codes = CodeCollector::new(policy.translate_codes);
//! let mut report = ReportWriter::new(std::io::stdout());
//! for destination in &policy.destinations {
//!     let results = orchestrator.search_destination(&policy, destination).await;
//!     report.write_destination(&results, &mut codes)?;
//! }
//! report.write_code_table(&codes)?;
//! # Ok(())
//! # }
//! ```

/// Declarative argument binding
pub mod binding;
/// Fare search API client
pub mod client;
/// Error types and result aliases
pub mod error;
/// Flight policy predicate
pub mod filter;
/// Wire data model
pub mod model;
/// Bindable options and derived policy
pub mod options;
/// Concurrent per-destination search
pub mod orchestrator;
/// Report rendering
pub mod report;

// Re-export commonly used types
pub use client::{HttpSearchClient, SearchClient, SearchQuery};
pub use error::{Error, Result};
pub use model::{CodeName, Flight, SearchResult, Segment};
pub use options::{Policy, SearchOptions};
pub use orchestrator::{DayResult, DestinationResults, SearchOrchestrator};
pub use report::{CodeCollector, ReportWriter};
