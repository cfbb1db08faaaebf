/*!
 * Lock-Free Dispatch Statistics
 * Atomic counters updated on the dispatch hot path
 */

use super::types::DispatchStats;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic dispatch statistics for lock-free updates
///
/// # Performance
/// - Cache-line aligned to prevent false sharing
#[repr(C, align(64))]
pub struct AtomicDispatchStats {
    events_raised: AtomicU64,
    receivers_invoked: AtomicU64,
    receiver_failures: AtomicU64,
}

impl AtomicDispatchStats {
    #[inline]
    pub fn new() -> Self {
        Self {
            events_raised: AtomicU64::new(0),
            receivers_invoked: AtomicU64::new(0),
            receiver_failures: AtomicU64::new(0),
        }
    }

    /// Hot path - called on every raise
    #[inline(always)]
    pub fn inc_events_raised(&self) {
        self.events_raised.fetch_add(1, Ordering::Relaxed);
    }

    /// Hot path - called once per receiver invocation
    #[inline(always)]
    pub fn inc_receivers_invoked(&self) {
        self.receivers_invoked.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_receiver_failures(&self) {
        self.receiver_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of current stats (no locks required)
    ///
    /// `registered` comes from the receiver table itself, which owns that count.
    ///
    /// # Note
    /// Values may not be perfectly consistent with each other under concurrent
    /// updates, but each individual value is accurate.
    #[inline]
    pub fn snapshot(&self, registered: usize) -> DispatchStats {
        DispatchStats {
            events_raised: self.events_raised.load(Ordering::Acquire),
            receivers_invoked: self.receivers_invoked.load(Ordering::Acquire),
            receiver_failures: self.receiver_failures.load(Ordering::Acquire),
            receivers_registered: registered,
        }
    }
}

impl Default for AtomicDispatchStats {
    fn default() -> Self {
        Self::new()
    }
}
