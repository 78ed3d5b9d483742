//! Request counters.
//!
//! # Responsibilities
//! - Track total, allowed, and blocked request counts for observability
//!
//! # Design Decisions
//! - A single explicitly-owned struct, not ambient globals: the server owns
//!   one instance and hands it to each connection
//! - Atomics with relaxed ordering: the accept loop is the only writer and
//!   the counts are observational only, never load-bearing for correctness

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic request counters owned by the processing loop.
#[derive(Debug, Default)]
pub struct Counters {
    requests: AtomicU64,
    allowed: AtomicU64,
    blocked: AtomicU64,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterSnapshot {
    pub requests: u64,
    pub allowed: u64,
    pub blocked: u64,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    /// A request head was read and is being processed.
    pub fn record_request(&self) -> u64 {
        self.requests.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// The request was scored benign and handed to the backend path.
    pub fn record_allowed(&self) {
        self.allowed.fetch_add(1, Ordering::Relaxed);
    }

    /// The request was scored malicious and answered with a block page.
    pub fn record_blocked(&self) {
        self.blocked.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            allowed: self.allowed.load(Ordering::Relaxed),
            blocked: self.blocked.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_increment_independently() {
        let counters = Counters::new();
        assert_eq!(counters.record_request(), 1);
        counters.record_allowed();
        assert_eq!(counters.record_request(), 2);
        counters.record_blocked();

        let snap = counters.snapshot();
        assert_eq!(snap.requests, 2);
        assert_eq!(snap.allowed, 1);
        assert_eq!(snap.blocked, 1);
    }
}
