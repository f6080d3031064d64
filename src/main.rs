//! Chopstick: minimal livelock demonstration.
//!
//! Worker threads contend for one exclusive resource ("the chopstick") using
//! non-blocking try-acquire, backing off and retrying on failure. The main
//! thread blocks on a completion barrier until every worker's retry loop has
//! exited. Under adversarial scheduling the workers can retry forever without
//! ever blocking: that livelock is the subject of the demonstration, not a
//! defect to handle.

mod cli;
mod commands;
pub mod barrier;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod guard;
pub mod report;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            // Return appropriate exit code
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
