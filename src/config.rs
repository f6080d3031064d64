//! Run configuration for chopstick.
//!
//! This module defines the RunConfig struct assembled from CLI arguments.
//! The defaults reproduce the classic demonstration: two workers, a 500ms
//! hold, and a 100ms retry backoff with no attempt bound. Tests shrink the
//! durations so contention scenarios finish quickly.

use crate::error::{ChopstickError, Result};
use std::time::Duration;

/// Default number of contending workers.
pub const DEFAULT_WORKERS: usize = 2;

/// Default time a worker holds the resource after acquiring it, in milliseconds.
pub const DEFAULT_HOLD_MS: u64 = 500;

/// Default backoff between failed acquisition attempts, in milliseconds.
pub const DEFAULT_RETRY_MS: u64 = 100;

/// Configuration for a single demonstration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Number of workers contending for the resource.
    pub workers: usize,

    /// How long a worker holds the resource after a successful acquisition.
    pub hold: Duration,

    /// How long a worker backs off after a failed acquisition attempt.
    pub retry_backoff: Duration,

    /// Maximum acquisition attempts per worker. `None` means unbounded,
    /// which is the default: the retry loop can livelock forever.
    pub max_attempts: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            hold: Duration::from_millis(DEFAULT_HOLD_MS),
            retry_backoff: Duration::from_millis(DEFAULT_RETRY_MS),
            max_attempts: None,
        }
    }
}

impl RunConfig {
    /// Validate the configuration values.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Configuration is usable
    /// * `Err(ChopstickError::UserError)` - A value is out of range
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(ChopstickError::UserError(
                "at least one worker is required".to_string(),
            ));
        }

        if self.max_attempts == Some(0) {
            return Err(ChopstickError::UserError(
                "--max-attempts must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
