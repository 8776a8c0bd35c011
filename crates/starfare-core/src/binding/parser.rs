//! Argument parser driven by a [`Registry`].
//!
//! Values arrive from two sources, applied in order: CLI tokens, then the
//! optional `name=value` config file. Scalars take the last value written;
//! repeated fields accumulate across both sources. Required fields are checked
//! once both sources have been applied.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::registry::{Bindable, Registry};
use super::value::ValueKind;

/// Prefix that introduces an option name.
pub const OPTION_MARKER: char = '-';

/// Banner printed above the usage listing.
pub const HELP_BANNER: &str = "STAR ALLIANCE BUSINESS CLASS SEARCH";

/// Failures while binding user input.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A bare value appeared where an option name was expected.
    #[error("Incorrect syntax ({token}), arguments must start with -. (add -help for help)")]
    Syntax {
        /// Offending token.
        token: String,
    },

    /// No field is registered under this name.
    #[error("Unknown argument {name}")]
    UnknownArgument {
        /// Name as written by the user.
        name: String,
    },

    /// The value cannot be converted to the field's kind.
    #[error("Failed to parse argument {name} {value} as type {kind}")]
    Conversion {
        /// Name as written by the user.
        name: String,
        /// Text that failed to convert.
        value: String,
        /// Target kind.
        kind: ValueKind,
    },

    /// A config line is not a single `name=value` pair.
    #[error("Invalid option format {line} (line {line_number}). Format must be Argument=Value")]
    ConfigFormat {
        /// The line as it appears in the file.
        line: String,
        /// 1-based line number.
        line_number: usize,
    },

    /// The config file could not be read.
    #[error("Failed to read config file {}: {source}", path.display())]
    ConfigRead {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Required fields were never supplied.
    #[error("{}", missing_message(.0))]
    MissingArguments(Vec<String>),

    /// Usage output was requested; the payload is the rendered listing.
    #[error("{0}")]
    HelpRequested(String),
}

fn missing_message(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("Must provide argument {name}. See -help for more info."))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Binds text onto a target through a registry.
///
/// The parser owns the parse state for one pass: the set of names that were
/// assigned at least once.
pub struct ArgumentParser<'a, T> {
    registry: &'a Registry<T>,
    target: &'a mut T,
    seen: HashSet<String>,
}

impl<'a, T> ArgumentParser<'a, T> {
    /// Starts a fresh pass writing into `target`.
    pub fn new(registry: &'a Registry<T>, target: &'a mut T) -> Self {
        Self {
            registry,
            target,
            seen: HashSet::new(),
        }
    }

    /// The target as bound so far.
    pub fn target(&self) -> &T {
        &*self.target
    }

    /// Whether `name` was assigned during this pass.
    pub fn is_seen(&self, name: &str) -> bool {
        self.seen.contains(&name.to_lowercase())
    }

    /// Consumes CLI tokens left to right.
    ///
    /// An option followed by a token that is not itself an option takes that
    /// token as its value; otherwise it is a flag with an empty value. Stops at
    /// the first error.
    pub fn parse_tokens<S: AsRef<str>>(&mut self, tokens: &[S]) -> Result<(), ParseError> {
        let mut tokens = tokens.iter().map(|token| token.as_ref()).peekable();
        while let Some(token) = tokens.next() {
            if !token.starts_with(OPTION_MARKER) {
                return Err(ParseError::Syntax {
                    token: token.to_owned(),
                });
            }
            let value = tokens
                .next_if(|next| !next.starts_with(OPTION_MARKER))
                .unwrap_or_default();
            self.resolve_one(token, value)?;
        }
        Ok(())
    }

    /// Resolves one `name`/`raw` pair onto its field.
    ///
    /// Booleans given no value become `true`. Repeated fields append every
    /// comma-separated part; scalars are replaced. Nothing is written when
    /// conversion fails.
    pub fn resolve_one(&mut self, name: &str, raw: &str) -> Result<(), ParseError> {
        let key = name.strip_prefix(OPTION_MARKER).unwrap_or(name).to_lowercase();
        let registry = self.registry;
        let Some((descriptor, access)) = registry.lookup(&key) else {
            return Err(ParseError::UnknownArgument {
                name: name.to_owned(),
            });
        };

        let raw = if descriptor.kind == ValueKind::Boolean && raw.is_empty() {
            "true"
        } else {
            raw
        };

        access(self.target)
            .store(raw)
            .map_err(|value| ParseError::Conversion {
                name: name.to_owned(),
                value,
                kind: descriptor.kind,
            })?;

        debug!("Bound {} = {}", descriptor.external_name, raw);
        self.seen.insert(key);
        Ok(())
    }

    /// Reads a config file and applies it with [`Self::apply_config`].
    pub fn load_config(&mut self, path: &Path) -> Result<(), ParseError> {
        let contents = fs::read_to_string(path).map_err(|source| ParseError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loading config from {}", path.display());
        self.apply_config(&contents)
    }

    /// Applies `name=value` lines in order.
    ///
    /// Blank lines and lines starting with `#` are skipped. A line that does
    /// not split into exactly two parts on `=` aborts loading; lines after it
    /// are not applied.
    pub fn apply_config(&mut self, contents: &str) -> Result<(), ParseError> {
        for (number, line) in contents.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = trimmed.split('=').collect();
            let [name, value] = parts.as_slice() else {
                return Err(ParseError::ConfigFormat {
                    line: line.to_owned(),
                    line_number: number + 1,
                });
            };
            self.resolve_one(name.trim(), value.trim())?;
        }
        Ok(())
    }

    /// Ends the pass.
    ///
    /// In help mode the usage listing is returned as an error so nothing runs.
    /// Otherwise every required field missing from the parse state is
    /// reported together.
    pub fn finalize(&self, help: bool) -> Result<(), ParseError> {
        if help {
            return Err(ParseError::HelpRequested(self.registry.usage(HELP_BANNER)));
        }

        let missing: Vec<String> = self
            .registry
            .descriptors()
            .filter(|d| d.is_required() && !self.is_seen(d.external_name))
            .map(|d| d.external_name.to_owned())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ParseError::MissingArguments(missing))
        }
    }
}

impl<T: Bindable> ArgumentParser<'_, T> {
    /// Runs a full pass: CLI tokens, then the config file the target names,
    /// then validation.
    pub fn parse<S: AsRef<str>>(&mut self, tokens: &[S]) -> Result<(), ParseError> {
        self.parse_tokens(tokens)?;

        if let Some(path) = self.target.config_path().map(Path::to_path_buf) {
            self.load_config(&path)?;
        }

        self.finalize(self.target.help_requested())
    }
}
