//! CLI argument parsing for chopstick.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module only defines the flag surface; the run itself lives in the
//! `commands` module.

use crate::config::{DEFAULT_HOLD_MS, DEFAULT_RETRY_MS, DEFAULT_WORKERS, RunConfig};
use clap::Parser;
use std::time::Duration;

/// Chopstick: minimal livelock demonstration.
///
/// Launches worker threads that contend for one exclusive resource with
/// non-blocking try-acquire and fixed backoff, then waits for all of them
/// to finish. With the default unbounded retries the run can in principle
/// loop forever; that is the condition being demonstrated.
#[derive(Parser, Debug)]
#[command(name = "chopstick")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Number of workers contending for the resource.
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// How long a worker holds the resource after acquiring it, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_HOLD_MS)]
    pub hold_ms: u64,

    /// Backoff between failed acquisition attempts, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_RETRY_MS)]
    pub retry_ms: u64,

    /// Give up after this many failed attempts per worker (default: retry forever).
    #[arg(long)]
    pub max_attempts: Option<u64>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Build the run configuration from the parsed flags.
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            workers: self.workers,
            hold: Duration::from_millis(self.hold_ms),
            retry_backoff: Duration::from_millis(self.retry_ms),
            max_attempts: self.max_attempts,
        }
    }
}
