//! Abstract memory tracker interface.
//!
//! The concrete hierarchical tracker lives in `rowlist-mem`. Only the trait is
//! kept here so containers can report usage without pulling in its internals.

/// Accepts signed byte deltas to a running consumption total.
///
/// Positive deltas record newly held memory, negative deltas release it.
/// Implementations must be cheap to call; containers batch their reports
/// (one call per sealed block, not per row).
pub trait MemoryTracker: Send + Sync {
    /// Add `delta` bytes (may be negative) to the running total.
    fn consume(&self, delta: i64);

    /// Current running total in bytes.
    fn bytes_consumed(&self) -> i64;

    /// Human-readable label used in logs.
    fn label(&self) -> &str {
        "tracker"
    }
}
