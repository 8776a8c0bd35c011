//! The search run: one destination at a time, report after each.

use std::io::Write;

use anyhow::Result;
use starfare_core::binding::DATE_FORMAT;
use starfare_core::{CodeCollector, Policy, ReportWriter, SearchClient, SearchOrchestrator};
use tracing::info;

/// Searches every destination in `policy` and writes the report to `out`.
///
/// Destinations are searched sequentially; each one's day queries run
/// concurrently inside the orchestrator. The code table, when enabled, is
/// written after the last destination.
pub async fn execute<C: SearchClient, W: Write>(
    policy: &Policy,
    orchestrator: &SearchOrchestrator<C>,
    out: W,
) -> Result<()> {
    info!(
        "Searching for {} to {}",
        policy.origin,
        policy.destinations.join(", ")
    );
    info!(
        "Searching for dates {} - {} (search range {} days)",
        policy.outbound_start.format(DATE_FORMAT),
        policy.inbound_start.format(DATE_FORMAT),
        policy.span_days
    );

    let mut codes = CodeCollector::new(policy.translate_codes);
    let mut report = ReportWriter::new(out);

    for destination in &policy.destinations {
        let results = orchestrator.search_destination(policy, destination).await;
        report.write_destination(&results, &mut codes)?;
    }

    report.write_code_table(&codes)?;
    Ok(())
}
