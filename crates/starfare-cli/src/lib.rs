//! starfare CLI - business-class availability search
//!
//! Binds the command line, derives the search policy, then searches each
//! destination in turn and prints the report to stdout.

use std::io::{self, Write};
use std::process::ExitCode;

use colored::Colorize;
use starfare_core::{HttpSearchClient, Policy, SearchOrchestrator};

pub mod args;
mod commands;
pub mod error;
mod logging;

use crate::error::CliError;

/// Run the CLI against the process arguments and map the outcome to an exit
/// code.
pub async fn run() -> ExitCode {
    if let Err(err) = logging::initialize_logging() {
        eprintln!("{} failed to initialize logging: {err}", "warning:".yellow());
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let stdout = io::stdout();
    match execute(&args, stdout.lock()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            err.as_exit_code()
        },
    }
}

/// Bind `args`, run the search and write the report to `out`.
///
/// A closed output pipe ends the run quietly.
///
/// # Errors
///
/// Returns a usage error for bad arguments, configuration or `-Help`, and an
/// internal error when the client cannot be built or the report cannot be
/// written.
pub async fn execute<S: AsRef<str>, W: Write>(args: &[S], out: W) -> Result<(), CliError> {
    let options = args::parse_options(args)?;
    let policy = Policy::from_options(&options)?;
    let orchestrator = SearchOrchestrator::new(HttpSearchClient::from_env()?);

    match commands::search::execute(&policy, &orchestrator, out).await {
        Ok(()) => Ok(()),
        Err(err) if is_broken_pipe(&err) => Ok(()),
        Err(err) => Err(CliError::internal(err)),
    }
}

fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe)
}

fn report_error(err: &CliError) {
    if let Some(usage) = args::help_text(err) {
        eprintln!("{usage}");
        return;
    }
    for line in err.to_string().lines() {
        eprintln!("{} {line}", "error:".red().bold());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;

    #[tokio::test]
    async fn test_negative_span_is_usage_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "SearchSpan=-3").unwrap();
        let path = file.path().to_str().unwrap().to_owned();

        let args = [
            "-From", "CPH", "-To", "JFK", "-Out", "2024-06-01", "-In", "2024-06-15",
            "-Config", path.as_str(),
        ];
        let err = execute(&args, Vec::new()).await.unwrap_err();
        assert_eq!(err.category, ErrorCategory::Usage);
        assert!(err.to_string().contains("SearchSpan"));
    }

    #[tokio::test]
    async fn test_help_writes_no_report() {
        let mut out = Vec::new();
        let err = execute(&["-help"], &mut out).await.unwrap_err();
        assert!(args::help_text(&err).is_some());
        assert!(out.is_empty());
    }

    #[test]
    fn test_broken_pipe_detection() {
        let err = anyhow::Error::new(io::Error::from(io::ErrorKind::BrokenPipe));
        assert!(is_broken_pipe(&err));
        assert!(!is_broken_pipe(&anyhow::anyhow!("other")));
    }
}
