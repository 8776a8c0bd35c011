//! Text report: per-destination flight listings and the code table.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::{self, Write};

use chrono::TimeDelta;

use crate::model::{CodeName, Flight};
use crate::orchestrator::DestinationResults;

const TIME_FORMAT: &str = "%d/%m %H:%M";
const RULE_WIDTH: usize = 46;

/// Collects airport and carrier codes seen while rendering.
///
/// The first display name observed for a code wins. Iteration is in ascending
/// code order.
#[derive(Debug, Default, Clone)]
pub struct CodeCollector {
    enabled: bool,
    codes: BTreeMap<String, String>,
}

impl CodeCollector {
    /// Creates a collector; a disabled collector ignores every observation.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self {
            enabled,
            codes: BTreeMap::new(),
        }
    }

    /// Whether observations are recorded.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Records `pair` unless its code is already known.
    pub fn observe(&mut self, pair: &CodeName) {
        if self.enabled && !self.codes.contains_key(&pair.code) {
            self.codes.insert(pair.code.clone(), pair.name.clone());
        }
    }

    /// Collected `(code, name)` pairs in ascending code order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.codes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of distinct codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether nothing has been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Renders a duration as `[-][d:]h:mm:ss`.
#[must_use]
pub fn format_elapsed(delta: TimeDelta) -> String {
    let sign = if delta < TimeDelta::zero() { "-" } else { "" };
    let total = delta.num_seconds().unsigned_abs();
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;
    if days > 0 {
        format!("{sign}{days}:{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{sign}{hours}:{minutes:02}:{seconds:02}")
    }
}

/// Renders one flight as a single line, observing every code it prints.
pub fn format_flight(flight: &Flight, codes: &mut CodeCollector) -> String {
    let mut line = format!(
        "{} -> {} | ",
        flight.start_time_in_local.format(TIME_FORMAT),
        flight.end_time_in_local.format(TIME_FORMAT)
    );

    for segment in &flight.segments {
        let _ = write!(
            line,
            "{} ({}",
            segment.departure_airport.code, segment.marketing_carrier.code
        );
        codes.observe(&segment.departure_airport);
        codes.observe(&segment.marketing_carrier);

        if segment.marketing_carrier.code != segment.operating_carrier.code {
            let _ = write!(line, "[{}]", segment.operating_carrier.code);
            codes.observe(&segment.operating_carrier);
        }

        let _ = write!(line, ") -> {} ", segment.arrival_airport.code);
        codes.observe(&segment.arrival_airport);
    }

    line.push_str("TIME ");
    line.push_str(&format_elapsed(flight.elapsed()));
    line
}

/// Writes the report to an output stream.
#[derive(Debug)]
pub struct ReportWriter<W: Write> {
    out: W,
}

impl<W: Write> ReportWriter<W> {
    /// Wraps `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Writes one destination's outbound and inbound listings.
    pub fn write_destination(
        &mut self,
        results: &DestinationResults,
        codes: &mut CodeCollector,
    ) -> io::Result<()> {
        writeln!(self.out, "Results to {}", results.destination)?;
        writeln!(self.out, "***** Out-bound *****")?;
        self.write_flights(&results.outbound, codes)?;
        writeln!(self.out, "***** In-bound *****")?;
        self.write_flights(&results.inbound, codes)?;
        writeln!(self.out, "{}", "-".repeat(RULE_WIDTH))?;
        self.out.flush()
    }

    fn write_flights(&mut self, flights: &[Flight], codes: &mut CodeCollector) -> io::Result<()> {
        for flight in flights {
            writeln!(self.out, "{}", format_flight(flight, codes))?;
        }
        Ok(())
    }

    /// Writes the code translation table when the collector is enabled.
    pub fn write_code_table(&mut self, codes: &CodeCollector) -> io::Result<()> {
        if !codes.is_enabled() {
            return Ok(());
        }
        writeln!(self.out)?;
        writeln!(self.out, "Airline and Airport Codes")?;
        for (code, name) in codes.entries() {
            let row = format!("{code:<10}{name:<20}");
            writeln!(self.out, "{}", row.trim_end())?;
        }
        self.out.flush()
    }

    /// Returns the underlying stream.
    pub fn into_inner(self) -> W {
        self.out
    }
}
