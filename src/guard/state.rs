//! Lock state and RAII hold guard.

use std::sync::atomic::{AtomicBool, Ordering};

/// One exclusive-access resource (the chopstick).
///
/// Wraps a binary lock state. At most one holder exists at any instant;
/// all transitions go through the atomic try-acquire/release pair and the
/// raw state is never exposed.
#[derive(Debug, Default)]
pub struct ResourceGuard {
    locked: AtomicBool,
}

impl ResourceGuard {
    /// Create an unheld resource.
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-blocking attempt to take exclusive ownership.
    ///
    /// Atomically transitions unlocked -> locked. Returns a [`HoldGuard`]
    /// on success; returns `None` and leaves the state unchanged if the
    /// resource is already held. Two concurrent callers can never both
    /// observe success.
    pub fn try_acquire(&self) -> Option<HoldGuard<'_>> {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
            .then(|| HoldGuard::new(self))
    }

    /// Whether the resource is currently held.
    ///
    /// Diagnostic observation only; the answer can be stale by the time
    /// the caller acts on it. Acquisition decisions must go through
    /// [`try_acquire`](Self::try_acquire).
    pub fn is_held(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }

    /// Transition locked -> unlocked.
    ///
    /// # Panics
    ///
    /// Panics if the resource is not currently held. Release without
    /// ownership is a programming error, detected rather than silently
    /// corrupting the lock state.
    pub(super) fn release(&self) {
        let was_locked = self.locked.swap(false, Ordering::Release);
        assert!(was_locked, "ResourceGuard released without being held");
    }
}

/// RAII proof of ownership of a [`ResourceGuard`].
///
/// When dropped, the resource is automatically released. Ownership of this
/// value is the only way to release, so a release without a prior
/// successful acquisition is unrepresentable in safe callers.
#[derive(Debug)]
pub struct HoldGuard<'a> {
    guard: &'a ResourceGuard,
    released: bool,
}

impl<'a> HoldGuard<'a> {
    /// Create a guard for a freshly acquired resource.
    pub(super) fn new(guard: &'a ResourceGuard) -> Self {
        Self {
            guard,
            released: false,
        }
    }

    /// Manually release the resource.
    ///
    /// This is useful when you want the release to be visible in the code
    /// rather than implied by scope end.
    pub fn release(mut self) {
        self.released = true;
        self.guard.release();
    }
}

impl Drop for HoldGuard<'_> {
    fn drop(&mut self) {
        if !self.released {
            self.guard.release();
        }
    }
}
