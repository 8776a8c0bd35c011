//! starfare CLI - business-class availability search
//!
//! Thin entry point; everything lives in the library so it can be tested.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    starfare_cli::run().await
}
