//! Resource guard subsystem for chopstick.
//!
//! This module implements the contended resource at the center of the
//! demonstration:
//! - [`ResourceGuard`]: one exclusive-access resource behind an atomic
//!   try-acquire
//! - [`HoldGuard`]: RAII proof of ownership, releasing on drop
//! - [`Worker`]: the try/backoff/retry loop run by each contending thread
//!
//! # Acquisition
//!
//! Acquisition is strictly non-blocking: `try_acquire` either takes
//! ownership or returns immediately, and there is no queue, fairness
//! policy, or starvation avoidance. Workers that lose the race back off
//! for a fixed duration and try again, which is exactly the shape that
//! lets a livelock manifest.
//!
//! # RAII Guards
//!
//! A successful acquisition yields a [`HoldGuard`] that releases the
//! resource when dropped. Releasing the resource while it is not held is a
//! caller contract violation and panics instead of corrupting the state.

mod state;
mod worker;


// Re-export public API
pub use state::{HoldGuard, ResourceGuard};
pub use worker::{Worker, WorkerOutcome};
