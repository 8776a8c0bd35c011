#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used)]

mod common;

use std::io::Write;

use common::{REQUIRED_ARGS, starfare_cmd};
use predicates::prelude::*;

#[test]
fn help_prints_banner_and_listing() {
    starfare_cmd()
        .arg("-Help")
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("STAR ALLIANCE BUSINESS CLASS SEARCH"))
        .stderr(predicate::str::contains("Arguments: (default value in parenthesis)"))
        .stderr(predicate::str::contains("-SearchSpan"));
}

#[test]
fn help_skips_required_validation() {
    starfare_cmd()
        .args(["-From", "CPH", "-help"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Must provide").not());
}

#[test]
fn missing_required_options_are_listed() {
    starfare_cmd()
        .args(["-From", "CPH", "-Out", "2024-06-01"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "Must provide argument To. See -help for more info.",
        ))
        .stderr(predicate::str::contains(
            "Must provide argument In. See -help for more info.",
        ))
        .stderr(predicate::str::contains("argument From").not());
}

#[test]
fn unknown_argument_fails() {
    starfare_cmd()
        .args(REQUIRED_ARGS)
        .arg("-Bogus")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown argument -Bogus"));
}

#[test]
fn token_without_marker_is_syntax_error() {
    starfare_cmd()
        .args(["From", "CPH"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "Incorrect syntax (From), arguments must start with -.",
        ));
}

#[test]
fn unconvertible_value_names_the_type() {
    starfare_cmd()
        .args(REQUIRED_ARGS)
        .args(["-MaxStops", "many"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "Failed to parse argument -MaxStops many as type Int64",
        ));
}

#[test]
fn malformed_config_line_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "MaxStops=1=2").unwrap();

    starfare_cmd()
        .args(REQUIRED_ARGS)
        .arg("-Config")
        .arg(file.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("MaxStops=1=2"));
}

#[test]
fn missing_config_file_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.cfg");

    starfare_cmd()
        .args(REQUIRED_ARGS)
        .arg("-Config")
        .arg(&missing)
        .assert()
        .code(2);
}

#[test]
fn oversized_search_span_is_rejected() {
    starfare_cmd()
        .args(REQUIRED_ARGS)
        .args(["-SearchSpan", "100000000"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "SearchSpan must be between 0 and 365, got 100000000",
        ));
}
