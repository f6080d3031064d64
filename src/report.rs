//! Progress reporting for worker activity.
//!
//! The program's only observable output is a stream of human-readable
//! progress lines ("chopstick picked up", "chopstick busy, retrying...").
//! Workers emit events through the [`Reporter`] trait rather than printing
//! directly, so tests can capture the per-worker event sequence in memory
//! while the CLI renders the same events to stdout.
//!
//! # Event Format
//!
//! Each event carries:
//! - `ts`: UTC timestamp when the event occurred
//! - `worker`: the emitting worker's id
//! - `attempt`: the acquisition attempt number (1-based)
//! - `kind`: what happened (busy / acquired / released)

use chrono::{DateTime, Utc};
use std::sync::Mutex;

/// What a worker observed on one pass through its retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerEvent {
    /// The resource was already held; the worker will back off and retry.
    Busy,
    /// The worker acquired the resource.
    Acquired,
    /// The worker released the resource and is about to terminate.
    Released,
}

impl std::fmt::Display for WorkerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkerEvent::Busy => write!(f, "chopstick busy, retrying..."),
            WorkerEvent::Acquired => write!(f, "chopstick picked up"),
            WorkerEvent::Released => write!(f, "chopstick released"),
        }
    }
}

/// A single timestamped progress record.
#[derive(Debug, Clone)]
pub struct Event {
    /// UTC timestamp when the event occurred.
    pub ts: DateTime<Utc>,

    /// Id of the worker that emitted the event.
    pub worker: usize,

    /// Acquisition attempt number (1-based) this event belongs to.
    pub attempt: u64,

    /// What happened.
    pub kind: WorkerEvent,
}

impl Event {
    /// Create an event stamped with the current time.
    pub fn now(worker: usize, attempt: u64, kind: WorkerEvent) -> Self {
        Self {
            ts: Utc::now(),
            worker,
            attempt,
            kind,
        }
    }
}

/// Sink for worker progress events.
///
/// Implementations must tolerate concurrent calls from multiple workers.
pub trait Reporter: Send + Sync {
    /// Record a single event.
    fn record(&self, event: Event);
}

/// Reporter that prints progress lines to stdout.
///
/// This is the CLI's default reporter. Output is purely diagnostic text,
/// not a structured protocol; the timestamp and worker id prefix keep
/// interleaved lines attributable.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn record(&self, event: Event) {
        println!(
            "{} [worker {}] {} (attempt {})",
            event.ts.format("%H:%M:%S%.3f"),
            event.worker,
            event.kind,
            event.attempt
        );
    }
}

/// Reporter that accumulates events in memory.
///
/// Used by tests to assert per-worker event sequences without parsing
/// stdout. The cross-worker interleaving is scheduler-dependent and must
/// not be asserted; only each worker's own sequence is meaningful.
// Only exercised from test code; the release binary reports to the console.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct MemoryReporter {
    events: Mutex<Vec<Event>>,
}

#[allow(dead_code)]
impl MemoryReporter {
    /// Create an empty reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot all recorded events in arrival order.
    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .clone()
    }

    /// Snapshot the events emitted by one worker, in arrival order.
    pub fn events_for(&self, worker: usize) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|e| e.worker == worker)
            .collect()
    }
}

impl Reporter for MemoryReporter {
    fn record(&self, event: Event) {
        self.events
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_display_matches_progress_lines() {
        assert_eq!(WorkerEvent::Acquired.to_string(), "chopstick picked up");
        assert_eq!(
            WorkerEvent::Busy.to_string(),
            "chopstick busy, retrying..."
        );
        assert_eq!(WorkerEvent::Released.to_string(), "chopstick released");
    }

    #[test]
    fn memory_reporter_records_in_order() {
        let reporter = MemoryReporter::new();
        reporter.record(Event::now(0, 1, WorkerEvent::Busy));
        reporter.record(Event::now(0, 2, WorkerEvent::Acquired));
        reporter.record(Event::now(0, 2, WorkerEvent::Released));

        let events = reporter.events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].kind, WorkerEvent::Busy);
        assert_eq!(events[1].kind, WorkerEvent::Acquired);
        assert_eq!(events[2].kind, WorkerEvent::Released);
    }

    #[test]
    fn memory_reporter_filters_by_worker() {
        let reporter = MemoryReporter::new();
        reporter.record(Event::now(0, 1, WorkerEvent::Acquired));
        reporter.record(Event::now(1, 1, WorkerEvent::Busy));
        reporter.record(Event::now(1, 2, WorkerEvent::Acquired));

        assert_eq!(reporter.events_for(0).len(), 1);
        assert_eq!(reporter.events_for(1).len(), 2);
        assert_eq!(reporter.events_for(2).len(), 0);
    }

    #[test]
    fn event_timestamps_are_recent() {
        let event = Event::now(0, 1, WorkerEvent::Acquired);
        let age = Utc::now().signed_duration_since(event.ts);
        assert!(age.num_minutes() < 1);
    }
}
