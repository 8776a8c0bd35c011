//! Error types and handling for starfare-core operations.
//!
//! Errors are grouped by where they originate so callers can decide how to
//! surface them:
//!
//! - **Argument Errors**: bad CLI tokens, unknown options, unconvertible values,
//!   malformed config lines, missing required options
//! - **Registry Errors**: a misdeclared binding table (programming error)
//! - **Network Errors**: transport failures talking to the fare API
//! - **Decode Errors**: a response body that does not match the wire model
//! - **I/O Errors**: file system access
//!
//! ```rust
//! use starfare_core::Error;
//!
//! let err = Error::Config("SearchSpan must not be negative".to_string());
//! assert_eq!(err.category(), "config");
//! assert!(!err.is_recoverable());
//! ```

use thiserror::Error;

use crate::binding::{ParseError, RegistryError};

/// The main error type for starfare-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// File system failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport failure or non-success status.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body could not be decoded into the wire model.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The binding table is misdeclared.
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// User input could not be parsed or validated.
    #[error(transparent)]
    Argument(#[from] ParseError),

    /// Parsed options are inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl Error {
    /// Whether retrying the same operation might succeed.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Io(e) => {
                matches!(
                    e.kind(),
                    std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
                )
            },
            _ => false,
        }
    }

    /// Short machine-readable category name.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Network(_) => "network",
            Self::Decode(_) => "decode",
            Self::Registry(_) => "registry",
            Self::Argument(_) => "argument",
            Self::Config(_) => "config",
        }
    }

    /// Whether the error stems from user input rather than the environment.
    #[must_use]
    pub const fn is_usage(&self) -> bool {
        matches!(self, Self::Argument(_) | Self::Config(_))
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display_formatting() {
        let err = Error::Decode("expected value at line 1".to_string());
        assert_eq!(err.to_string(), "Decode error: expected value at line 1");

        let err = Error::Config("SearchSpan must not be negative".to_string());
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_argument_errors_are_transparent() {
        let err: Error = ParseError::UnknownArgument {
            name: "-Bogus".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Unknown argument -Bogus");
        assert!(err.is_usage());
    }

    #[test]
    fn test_error_from_io_error() {
        let error: Error = io::Error::new(io::ErrorKind::NotFound, "file not found").into();
        match error {
            Error::Io(inner) => assert_eq!(inner.kind(), io::ErrorKind::NotFound),
            other => panic!("Expected IO error variant, got {other:?}"),
        }
    }

    #[test]
    fn test_error_from_serde_json() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = err.into();
        assert_eq!(error.category(), "decode");
    }

    #[test]
    fn test_error_categories() {
        let cases = vec![
            (Error::Io(io::Error::other("test")), "io"),
            (Error::Decode("test".to_string()), "decode"),
            (
                Error::Registry(RegistryError::DuplicateName("to".to_string())),
                "registry",
            ),
            (Error::Config("test".to_string()), "config"),
        ];

        for (error, expected) in cases {
            assert_eq!(error.category(), expected);
        }
    }

    #[test]
    fn test_recoverability() {
        assert!(Error::Io(io::Error::new(io::ErrorKind::TimedOut, "slow")).is_recoverable());
        assert!(!Error::Io(io::Error::new(io::ErrorKind::NotFound, "gone")).is_recoverable());
        assert!(!Error::Config("bad".to_string()).is_recoverable());
    }
}
