//! Completion barrier for waiting on a known number of workers.
//!
//! [`WaitGroup`] is a counted-wait primitive: the launcher registers the
//! number of outstanding workers up front, each worker signals `done()`
//! exactly once on termination, and `wait()` blocks until the count reaches
//! zero. Calling `done()` more times than registered is a caller contract
//! violation and panics rather than corrupting the count.
//!
//! [`CompletionToken`] wraps `done()` in an RAII drop so a worker signals
//! completion exactly once even if it panics mid-loop.

use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

#[derive(Debug, Default)]
struct WaitGroupState {
    outstanding: usize,
}

/// Counted-wait completion barrier.
#[derive(Debug, Default)]
pub struct WaitGroup {
    state: Mutex<WaitGroupState>,
    cond: Condvar,
}

impl WaitGroup {
    /// Create a barrier with no outstanding workers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `n` additional outstanding workers.
    ///
    /// Must be called before the workers are launched, so `wait()` cannot
    /// observe a transient zero between registration and the first `done()`.
    pub fn register(&self, n: usize) {
        let mut state = self.lock_state();
        state.outstanding += n;
    }

    /// Signal that one registered worker has terminated.
    ///
    /// Concurrent calls from multiple workers are safe; each call consumes
    /// exactly one registration.
    ///
    /// # Panics
    ///
    /// Panics if called more times than workers were registered.
    pub fn done(&self) {
        let mut state = self.lock_state();
        assert!(
            state.outstanding > 0,
            "WaitGroup::done() called more times than registered"
        );
        state.outstanding -= 1;
        if state.outstanding == 0 {
            self.cond.notify_all();
        }
    }

    /// Block until every registered worker has called `done()`.
    pub fn wait(&self) {
        let mut state = self.lock_state();
        while state.outstanding > 0 {
            state = self
                .cond
                .wait(state)
                .unwrap_or_else(|poison| poison.into_inner());
        }
    }

    /// Block until all workers are done, or until the timeout elapses.
    ///
    /// Returns `true` if all workers completed, `false` on timeout. Intended
    /// for test harnesses, where a missing `done()` should surface as a
    /// failed assertion instead of a hung test.
    #[allow(dead_code)]
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let mut state = self.lock_state();
        while state.outstanding > 0 {
            let (next, result) = self
                .cond
                .wait_timeout(state, timeout)
                .unwrap_or_else(|poison| poison.into_inner());
            state = next;
            if result.timed_out() && state.outstanding > 0 {
                return false;
            }
        }
        true
    }

    /// Number of workers still outstanding.
    #[allow(dead_code)]
    pub fn outstanding(&self) -> usize {
        self.lock_state().outstanding
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, WaitGroupState> {
        self.state
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

/// RAII completion signal.
///
/// Each token corresponds to one registered worker; dropping it calls
/// `done()` exactly once, including when the owning thread unwinds.
#[derive(Debug)]
pub struct CompletionToken {
    group: Arc<WaitGroup>,
}

impl CompletionToken {
    /// Create a token for one registered worker.
    pub fn new(group: Arc<WaitGroup>) -> Self {
        Self { group }
    }
}

impl Drop for CompletionToken {
    fn drop(&mut self) {
        self.group.done();
    }
}
