//! Worker retry loop.

use super::state::ResourceGuard;
use crate::config::RunConfig;
use crate::error::{ChopstickError, Result};
use crate::report::{Event, Reporter, WorkerEvent};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// One contending task.
///
/// A worker holds no persistent state beyond its id and a reference to the
/// shared [`ResourceGuard`]; it exists for the duration of one retry loop.
#[derive(Clone)]
pub struct Worker {
    id: usize,
    guard: Arc<ResourceGuard>,
    reporter: Arc<dyn Reporter>,
    hold: Duration,
    retry_backoff: Duration,
    max_attempts: Option<u64>,
}

/// How a worker's retry loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerOutcome {
    /// Id of the worker.
    pub worker: usize,

    /// Number of acquisition attempts, including the successful one.
    pub attempts: u64,
}

impl Worker {
    /// Create a worker bound to a shared resource and reporter.
    pub fn new(
        id: usize,
        guard: Arc<ResourceGuard>,
        reporter: Arc<dyn Reporter>,
        config: &RunConfig,
    ) -> Self {
        Self {
            id,
            guard,
            reporter,
            hold: config.hold,
            retry_backoff: config.retry_backoff,
            max_attempts: config.max_attempts,
        }
    }

    /// Run the try/backoff/retry loop to completion.
    ///
    /// Each pass attempts a non-blocking acquisition. On success the worker
    /// holds the resource for the configured duration, releases it, and
    /// terminates. On failure it backs off for the configured duration and
    /// tries again.
    ///
    /// In the default unbounded mode the loop has no attempt limit: under
    /// adversarial scheduling it can run forever. That indefinite retry is
    /// the livelock being demonstrated, not a failure path.
    ///
    /// # Returns
    ///
    /// * `Ok(WorkerOutcome)` - Acquired, held, and released the resource
    /// * `Err(ChopstickError::RetriesExhausted)` - Bounded mode only: the
    ///   attempt limit was reached without a successful acquisition
    pub fn run(&self) -> Result<WorkerOutcome> {
        let mut attempt: u64 = 0;
        loop {
            attempt += 1;
            match self.guard.try_acquire() {
                Some(hold) => {
                    self.record(attempt, WorkerEvent::Acquired);
                    thread::sleep(self.hold);
                    hold.release();
                    self.record(attempt, WorkerEvent::Released);
                    return Ok(WorkerOutcome {
                        worker: self.id,
                        attempts: attempt,
                    });
                }
                None => {
                    self.record(attempt, WorkerEvent::Busy);
                    if let Some(max) = self.max_attempts
                        && attempt >= max
                    {
                        return Err(ChopstickError::RetriesExhausted {
                            worker: self.id,
                            attempts: attempt,
                        });
                    }
                    thread::sleep(self.retry_backoff);
                }
            }
        }
    }

    fn record(&self, attempt: u64, kind: WorkerEvent) {
        self.reporter.record(Event::now(self.id, attempt, kind));
    }
}

impl std::fmt::Debug for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker")
            .field("id", &self.id)
            .field("hold", &self.hold)
            .field("retry_backoff", &self.retry_backoff)
            .field("max_attempts", &self.max_attempts)
            .finish_non_exhaustive()
    }
}
