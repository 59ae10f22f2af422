//! Lightweight peak tracking.
//!
//! Keep this cheap: it runs on every positive consume.

use std::sync::atomic::{AtomicI64, Ordering};

#[derive(Debug, Default)]
pub struct PeakTracker {
    peak_bytes: AtomicI64,
}

impl PeakTracker {
    pub fn new() -> Self {
        Self {
            peak_bytes: AtomicI64::new(0),
        }
    }

    /// Record a new "consumed bytes" value; updates peak if higher.
    pub fn record(&self, consumed: i64) {
        self.peak_bytes.fetch_max(consumed, Ordering::AcqRel);
    }

    pub fn peak(&self) -> i64 {
        self.peak_bytes.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_only_moves_up() {
        let p = PeakTracker::new();
        p.record(10);
        p.record(4);
        assert_eq!(p.peak(), 10);
        p.record(12);
        assert_eq!(p.peak(), 12);
    }
}
