#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::time::Duration;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// The required options, for tests that only care about the rest.
#[allow(dead_code)]
pub const REQUIRED_ARGS: [&str; 8] = [
    "-From", "CPH", "-To", "JFK", "-Out", "2024-06-01", "-In", "2024-06-15",
];

/// Create a configured `starfare` command suitable for integration tests.
///
/// The API host points at an unroutable address so nothing leaves the machine
/// unless a test overrides it.
#[allow(dead_code)]
pub fn starfare_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("starfare"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env("NO_COLOR", "1");
    cmd.env("STARFARE_API_URL", "http://127.0.0.1:9");
    cmd.env("STARFARE_TIMEOUT_SECS", "2");
    cmd.env_remove("STARFARE_LOG");
    cmd
}

/// Same as [`starfare_cmd`], talking to `base_url`.
#[allow(dead_code)]
pub fn starfare_cmd_for(base_url: &str) -> Command {
    let mut cmd = starfare_cmd();
    cmd.env("STARFARE_API_URL", base_url);
    cmd
}
