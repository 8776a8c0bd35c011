//! Binding process arguments onto [`SearchOptions`].

use starfare_core::Error as CoreError;
use starfare_core::SearchOptions;
use starfare_core::binding::{ArgumentParser, ParseError, Registry};

use crate::error::CliError;

/// Parses CLI tokens (without the program name), overlays the config file
/// they name, and validates required options.
///
/// Help output is reported as a usage error carrying the listing; see
/// [`help_text`].
pub fn parse_options<S: AsRef<str>>(args: &[S]) -> Result<SearchOptions, CliError> {
    let registry = Registry::<SearchOptions>::build()
        .map_err(|err| CliError::internal(CoreError::from(err)))?;

    let mut options = SearchOptions::default();
    ArgumentParser::new(&registry, &mut options)
        .parse(args)
        .map_err(|err| CliError::from(CoreError::from(err)))?;

    Ok(options)
}

/// The usage listing, when `err` is a help request.
pub fn help_text(err: &CliError) -> Option<&str> {
    match err.source.downcast_ref::<CoreError>() {
        Some(CoreError::Argument(ParseError::HelpRequested(usage))) => Some(usage),
        _ => None,
    }
}
