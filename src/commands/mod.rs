//! Run orchestration for chopstick.
//!
//! This module wires the pieces together: it builds the run configuration
//! from CLI flags, creates the one shared resource and the completion
//! barrier, launches the workers, and blocks until all of them have
//! terminated. Worker results are then collected so bounded-retry failures
//! and worker panics surface with distinct exit codes.

use crate::barrier::{CompletionToken, WaitGroup};
use crate::cli::Cli;
use crate::config::RunConfig;
use crate::error::{ChopstickError, Result};
use crate::guard::{ResourceGuard, Worker, WorkerOutcome};
use crate::report::{ConsoleReporter, Reporter};
use std::any::Any;
use std::sync::Arc;
use std::thread;

/// Dispatch the parsed CLI to the run implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = cli.run_config();
    config.validate()?;

    eprintln!(
        "chopstick: {} workers, hold {}ms, retry backoff {}ms, {}",
        config.workers,
        config.hold.as_millis(),
        config.retry_backoff.as_millis(),
        match config.max_attempts {
            Some(n) => format!("max {} attempts", n),
            None => "unbounded retries".to_string(),
        }
    );

    let outcomes = run(&config, Arc::new(ConsoleReporter))?;
    for outcome in outcomes {
        eprintln!(
            "worker {} finished after {} attempt{}",
            outcome.worker,
            outcome.attempts,
            if outcome.attempts == 1 { "" } else { "s" }
        );
    }

    Ok(())
}

/// Launch the configured workers against one shared resource and wait for
/// all of them to terminate.
///
/// The completion barrier is registered for the full worker count before
/// any thread starts, and each worker carries an RAII completion token, so
/// the barrier cannot miss a termination even when a worker panics. After
/// the barrier opens, the threads are joined to collect their outcomes.
///
/// # Returns
///
/// * `Ok(outcomes)` - Every worker acquired and released the resource
/// * `Err(ChopstickError::RetriesExhausted)` - A bounded worker gave up
/// * `Err(ChopstickError::WorkerPanicked)` - A worker thread panicked
pub fn run(config: &RunConfig, reporter: Arc<dyn Reporter>) -> Result<Vec<WorkerOutcome>> {
    let guard = Arc::new(ResourceGuard::new());
    let wait_group = Arc::new(WaitGroup::new());
    wait_group.register(config.workers);

    let mut handles = Vec::with_capacity(config.workers);
    for id in 0..config.workers {
        let worker = Worker::new(id, Arc::clone(&guard), Arc::clone(&reporter), config);
        let token = CompletionToken::new(Arc::clone(&wait_group));
        handles.push(thread::spawn(move || {
            let _token = token;
            worker.run()
        }));
    }

    // Block until every worker's retry loop has exited. This is the
    // program's only termination path; with unbounded retries it can in
    // principle wait forever.
    wait_group.wait();

    // All retry loops have exited, so nobody can still be holding.
    debug_assert!(!guard.is_held());

    let mut outcomes = Vec::with_capacity(handles.len());
    for handle in handles {
        match handle.join() {
            Ok(Ok(outcome)) => outcomes.push(outcome),
            Ok(Err(err)) => return Err(err),
            Err(payload) => {
                return Err(ChopstickError::WorkerPanicked(panic_message(
                    payload.as_ref(),
                )));
            }
        }
    }

    Ok(outcomes)
}

/// Extract a readable message from a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{MemoryReporter, WorkerEvent};
    use clap::Parser;
    use serial_test::serial;
    use std::time::Duration;

    fn fast_config(workers: usize) -> RunConfig {
        RunConfig {
            workers,
            hold: Duration::from_millis(5),
            retry_backoff: Duration::from_millis(1),
            max_attempts: None,
        }
    }

    #[test]
    #[serial]
    fn run_completes_with_two_workers() {
        let reporter = Arc::new(MemoryReporter::new());
        let outcomes = run(&fast_config(2), Arc::clone(&reporter) as Arc<dyn Reporter>).unwrap();

        assert_eq!(outcomes.len(), 2);

        // Each worker succeeded exactly once.
        for id in 0..2 {
            let acquired = reporter
                .events_for(id)
                .iter()
                .filter(|e| e.kind == WorkerEvent::Acquired)
                .count();
            assert_eq!(acquired, 1, "worker {} acquired {} times", id, acquired);
        }
    }

    #[test]
    #[serial]
    fn run_completes_with_many_workers() {
        let reporter = Arc::new(MemoryReporter::new());
        let outcomes = run(&fast_config(5), Arc::clone(&reporter) as Arc<dyn Reporter>).unwrap();

        assert_eq!(outcomes.len(), 5);

        let mut workers: Vec<_> = outcomes.iter().map(|o| o.worker).collect();
        workers.sort_unstable();
        assert_eq!(workers, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn run_with_single_worker_never_retries() {
        let reporter = Arc::new(MemoryReporter::new());
        let outcomes = run(&fast_config(1), Arc::clone(&reporter) as Arc<dyn Reporter>).unwrap();

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].attempts, 1);
        assert!(
            reporter
                .events()
                .iter()
                .all(|e| e.kind != WorkerEvent::Busy)
        );
    }

    #[test]
    fn dispatch_rejects_zero_workers() {
        let cli = Cli::try_parse_from(["chopstick", "--workers", "0", "--hold-ms", "1"]).unwrap();
        let err = dispatch(cli).unwrap_err();
        assert!(matches!(err, ChopstickError::UserError(_)));
    }

    #[test]
    fn dispatch_rejects_zero_max_attempts() {
        let cli = Cli::try_parse_from(["chopstick", "--max-attempts", "0"]).unwrap();
        let err = dispatch(cli).unwrap_err();
        assert!(matches!(err, ChopstickError::UserError(_)));
    }

    #[test]
    fn panic_message_handles_common_payloads() {
        let boxed: Box<dyn Any + Send> = Box::new("static panic");
        assert_eq!(panic_message(boxed.as_ref()), "static panic");

        let boxed: Box<dyn Any + Send> = Box::new("owned panic".to_string());
        assert_eq!(panic_message(boxed.as_ref()), "owned panic");

        let boxed: Box<dyn Any + Send> = Box::new(42_u32);
        assert_eq!(panic_message(boxed.as_ref()), "unknown panic");
    }
}
