//! Search options as bound from the command line, and the policy derived
//! from them.

use std::collections::HashSet;
use std::path::Path;

use chrono::{Days, NaiveDate};

use crate::binding::{Bindable, Field, Slot};
use crate::{Error, Result};

/// Largest accepted `SearchSpan`; each day is one concurrent query.
pub const MAX_SEARCH_SPAN: u32 = 365;

/// Every option the search accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Originating airport code.
    pub from: String,
    /// Destination airport codes.
    pub to: Vec<String>,
    /// First outbound date.
    pub out_start: Option<NaiveDate>,
    /// First inbound date.
    pub in_start: Option<NaiveDate>,
    /// Number of consecutive days to query.
    pub search_span: i64,
    /// Carrier codes to reject.
    pub banned_carriers: Vec<String>,
    /// Maximum stops per trip, `-1` for no limit.
    pub max_stops: i64,
    /// Maximum transit stops per segment.
    pub max_transit_stops: i64,
    /// Config file to overlay, empty for none.
    pub config: String,
    /// Print the code translation table after the report.
    pub translate_codes: bool,
    /// Print usage and exit.
    pub help: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            from: String::new(),
            to: Vec::new(),
            out_start: None,
            in_start: None,
            search_span: 7,
            banned_carriers: Vec::new(),
            max_stops: -1,
            max_transit_stops: 0,
            config: String::new(),
            translate_codes: false,
            help: false,
        }
    }
}

impl Bindable for SearchOptions {
    fn bindings() -> Vec<Field<Self>> {
        type F = Field<SearchOptions>;
        vec![
            F::new("From", |o| Slot::Text(&mut o.from))
                .required()
                .describe("Originating airport (code)."),
            F::new("To", |o| Slot::TextList(&mut o.to))
                .required()
                .describe("Destination airport (code), comma separated for several."),
            F::new("Out", |o| Slot::Date(&mut o.out_start))
                .required()
                .describe("The first day to start searching out trips from (format YYYY-MM-DD)."),
            F::new("In", |o| Slot::Date(&mut o.in_start))
                .required()
                .describe("The first day to start searching return trips from (format YYYY-MM-DD)."),
            F::new("SearchSpan", |o| Slot::Integer(&mut o.search_span))
                .describe("Number of days to search in (each results in a new query)."),
            F::new("BannedCarriers", |o| Slot::TextList(&mut o.banned_carriers))
                .no_default()
                .describe("A comma separated list of carrier codes to filter out."),
            F::new("MaxStops", |o| Slot::Integer(&mut o.max_stops))
                .describe("Maximum numbers of stops to allow for the trip (-1 = no limit)."),
            F::new("MaxTransitStops", |o| Slot::Integer(&mut o.max_transit_stops)).describe(
                "Maximum number of transit stops per segment (stop without changing airplane).",
            ),
            F::new("Config", |o| Slot::Text(&mut o.config))
                .no_default()
                .describe("Config file to read options from. One option per line, format is argument=value. (Lines starting with # are ignored)."),
            F::new("TranslateCodes", |o| Slot::Boolean(&mut o.translate_codes))
                .describe("Write a table after all trips with translations for all codes."),
            F::new("Help", |o| Slot::Boolean(&mut o.help)).describe("Print this help message."),
        ]
    }

    fn help_requested(&self) -> bool {
        self.help
    }

    fn config_path(&self) -> Option<&Path> {
        let path = self.config.trim();
        (!path.is_empty()).then(|| Path::new(path))
    }
}

/// Resolved, read-only search and filter parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    /// Originating airport code.
    pub origin: String,
    /// Destinations, searched one after another.
    pub destinations: Vec<String>,
    /// First outbound date.
    pub outbound_start: NaiveDate,
    /// First inbound date.
    pub inbound_start: NaiveDate,
    /// Day offsets `0..span_days` are queried per destination.
    pub span_days: u32,
    /// Rejected operating or marketing carriers.
    pub banned_carriers: HashSet<String>,
    /// Stop limit per trip; `None` means unlimited.
    pub max_stops: Option<u32>,
    /// Transit-stop limit per segment. There is no sentinel: a negative
    /// limit rejects every segment.
    pub max_transit_stops: i64,
    /// Collect and print the code table.
    pub translate_codes: bool,
}

impl Policy {
    /// Derives a policy from fully bound options.
    pub fn from_options(options: &SearchOptions) -> Result<Self> {
        let outbound_start = options
            .out_start
            .ok_or_else(|| Error::Config("Out date is missing".to_string()))?;
        let inbound_start = options
            .in_start
            .ok_or_else(|| Error::Config("In date is missing".to_string()))?;
        let span_days = u32::try_from(options.search_span)
            .ok()
            .filter(|&days| days <= MAX_SEARCH_SPAN)
            .ok_or_else(|| {
                Error::Config(format!(
                    "SearchSpan must be between 0 and {MAX_SEARCH_SPAN}, got {}",
                    options.search_span
                ))
            })?;

        let policy = Self {
            origin: options.from.trim().to_string(),
            destinations: options.to.clone(),
            outbound_start,
            inbound_start,
            span_days,
            banned_carriers: options.banned_carriers.iter().cloned().collect(),
            max_stops: u32::try_from(options.max_stops).ok(),
            max_transit_stops: options.max_transit_stops,
            translate_codes: options.translate_codes,
        };

        if span_days > 0 && policy.dates_for(span_days - 1).is_none() {
            return Err(Error::Config(format!(
                "SearchSpan of {span_days} days runs past the supported calendar"
            )));
        }

        Ok(policy)
    }

    /// Outbound and inbound dates for a day offset.
    #[must_use]
    pub fn dates_for(&self, offset: u32) -> Option<(NaiveDate, NaiveDate)> {
        let days = Days::new(u64::from(offset));
        Some((
            self.outbound_start.checked_add_days(days)?,
            self.inbound_start.checked_add_days(days)?,
        ))
    }

    /// Whether `code` names a banned carrier.
    #[must_use]
    pub fn is_banned(&self, code: &str) -> bool {
        self.banned_carriers.contains(code)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::binding::{ArgumentParser, Registry};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bind(tokens: &[&str]) -> SearchOptions {
        let registry = Registry::<SearchOptions>::build().unwrap();
        let mut options = SearchOptions::default();
        ArgumentParser::new(&registry, &mut options)
            .parse(tokens)
            .unwrap();
        options
    }

    #[test]
    fn test_registry_declares_every_option() {
        let registry = Registry::<SearchOptions>::build().unwrap();
        let names: Vec<_> = registry.descriptors().map(|d| d.external_name).collect();
        assert_eq!(
            names,
            [
                "From",
                "To",
                "Out",
                "In",
                "SearchSpan",
                "BannedCarriers",
                "MaxStops",
                "MaxTransitStops",
                "Config",
                "TranslateCodes",
                "Help"
            ]
        );
        let required: Vec<_> = registry
            .descriptors()
            .filter(|d| d.is_required())
            .map(|d| d.external_name)
            .collect();
        assert_eq!(required, ["From", "To", "Out", "In"]);
    }

    #[test]
    fn test_help_defaults() {
        let registry = Registry::<SearchOptions>::build().unwrap();
        let display = |name: &str| registry.lookup(name).unwrap().0.default_display.clone();
        assert_eq!(display("SearchSpan").as_deref(), Some("7"));
        assert_eq!(display("MaxStops").as_deref(), Some("-1"));
        assert_eq!(display("MaxTransitStops").as_deref(), Some("0"));
        assert_eq!(display("Config"), None);
        assert_eq!(display("BannedCarriers"), None);
        assert_eq!(display("TranslateCodes"), None);
        assert_eq!(display("Out"), None);
    }

    #[test]
    fn test_policy_from_cli() {
        let options = bind(&[
            "-From", "CPH", "-To", "JFK,LAX", "-Out", "2024-06-01", "-In", "2024-06-15",
            "-SearchSpan", "3", "-BannedCarriers", "LH", "-MaxStops", "1",
        ]);
        let policy = Policy::from_options(&options).unwrap();
        assert_eq!(policy.origin, "CPH");
        assert_eq!(policy.destinations, ["JFK", "LAX"]);
        assert_eq!(policy.span_days, 3);
        assert_eq!(policy.max_stops, Some(1));
        assert_eq!(policy.max_transit_stops, 0);
        assert!(policy.is_banned("LH"));
        assert!(!policy.translate_codes);
        assert_eq!(
            policy.dates_for(2),
            Some((date(2024, 6, 3), date(2024, 6, 17)))
        );
    }

    #[test]
    fn test_negative_stop_limit_is_unlimited_transit_limit_is_kept() {
        let mut options = bind(&["-From", "CPH", "-To", "JFK", "-Out", "2024-06-01", "-In", "2024-06-15"]);
        options.max_transit_stops = -1;
        let policy = Policy::from_options(&options).unwrap();
        assert_eq!(policy.max_stops, None);
        assert_eq!(policy.max_transit_stops, -1);
        assert_eq!(policy.span_days, 7);
    }

    #[test]
    fn test_negative_span_is_rejected() {
        let mut options = bind(&["-From", "CPH", "-To", "JFK", "-Out", "2024-06-01", "-In", "2024-06-15"]);
        options.search_span = -2;
        let err = Policy::from_options(&options).unwrap_err();
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn test_span_upper_bound() {
        let mut options = bind(&["-From", "CPH", "-To", "JFK", "-Out", "2024-06-01", "-In", "2024-06-15"]);
        options.search_span = i64::from(MAX_SEARCH_SPAN);
        assert_eq!(Policy::from_options(&options).unwrap().span_days, MAX_SEARCH_SPAN);

        options.search_span = 100_000_000;
        let err = Policy::from_options(&options).unwrap_err();
        assert!(err.is_usage());
        assert_eq!(
            err.to_string(),
            "Configuration error: SearchSpan must be between 0 and 365, got 100000000"
        );
    }

    #[test]
    fn test_config_path_ignores_blank() {
        let mut options = SearchOptions::default();
        assert!(options.config_path().is_none());
        options.config = "  ".to_string();
        assert!(options.config_path().is_none());
        options.config = "trip.cfg".to_string();
        assert_eq!(options.config_path(), Some(Path::new("trip.cfg")));
    }
}
