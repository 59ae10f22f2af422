//! Hierarchical memory tracker.
//!
//! A `Tracker` is a cheap, cloneable handle. Every consume is applied to the
//! tracker itself and then to each ancestor, so a parent always reports the
//! sum of what its attached children hold plus its own direct charges.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rowlist_core::tracker::MemoryTracker;

use crate::error::{Error, Result};
use crate::tracking::PeakTracker;

#[derive(Debug)]
struct TrackerInner {
    label: String,
    bytes_limit: Option<i64>,
    consumed: AtomicI64,
    peak: PeakTracker,
    parent: Mutex<Option<Tracker>>,
}

/// Concrete `MemoryTracker` used by row containers.
#[derive(Debug, Clone)]
pub struct Tracker {
    inner: Arc<TrackerInner>,
}

impl Tracker {
    pub fn new(label: impl Into<String>) -> Self {
        Self::build(label.into(), None)
    }

    /// Tracker with an advisory byte limit. Crossing it is reported through
    /// [`Tracker::limit_exceeded`]; consumption itself is never refused.
    pub fn with_limit(label: impl Into<String>, bytes_limit: i64) -> Self {
        Self::build(label.into(), Some(bytes_limit))
    }

    fn build(label: String, bytes_limit: Option<i64>) -> Self {
        Self {
            inner: Arc::new(TrackerInner {
                label,
                bytes_limit,
                consumed: AtomicI64::new(0),
                peak: PeakTracker::new(),
                parent: Mutex::new(None),
            }),
        }
    }

    /// Attach this tracker as a child of `parent`.
    ///
    /// Bytes already held move with the child: they are released from the
    /// previous parent (if any) and charged to the new one. The move happens
    /// under the child's parent lock, which `consume` also holds while it
    /// updates the child's total, so concurrent consumes land in exactly one
    /// parent.
    pub fn attach_to(&self, parent: &Tracker) -> Result<()> {
        let mut cur = Some(parent.clone());
        while let Some(t) = cur {
            if t.ptr_eq(self) {
                return Err(Error::TrackerCycle {
                    child: self.inner.label.clone(),
                    parent: parent.inner.label.clone(),
                });
            }
            cur = t.parent();
        }

        let mut slot = self.parent_slot();
        let bytes = self.bytes_consumed();
        if let Some(old) = slot.take() {
            old.consume(-bytes);
        }
        parent.consume(bytes);
        *slot = Some(parent.clone());
        drop(slot);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            child = %self.inner.label,
            parent = %parent.inner.label,
            bytes = self.bytes_consumed(),
            "tracker attached"
        );
        Ok(())
    }

    /// Detach from the current parent, releasing this tracker's bytes from it.
    /// No-op for a root tracker.
    pub fn detach(&self) {
        let mut slot = self.parent_slot();
        let Some(parent) = slot.take() else {
            return;
        };
        parent.consume(-self.bytes_consumed());
        drop(slot);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            child = %self.inner.label,
            parent = %parent.inner.label,
            "tracker detached"
        );
    }

    pub fn parent(&self) -> Option<Tracker> {
        self.parent_slot().clone()
    }

    /// Highest total observed so far.
    pub fn max_consumed(&self) -> i64 {
        self.inner.peak.peak()
    }

    pub fn bytes_limit(&self) -> Option<i64> {
        self.inner.bytes_limit
    }

    pub fn limit_exceeded(&self) -> bool {
        self.inner
            .bytes_limit
            .is_some_and(|limit| self.bytes_consumed() > limit)
    }

    /// Whether both handles refer to the same tracker.
    pub fn ptr_eq(&self, other: &Tracker) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn parent_slot(&self) -> MutexGuard<'_, Option<Tracker>> {
        self.inner
            .parent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn add_local(&self, delta: i64) {
        let now = self.inner.consumed.fetch_add(delta, Ordering::AcqRel) + delta;
        if delta > 0 {
            self.inner.peak.record(now);
            #[cfg(feature = "tracing")]
            if let Some(limit) = self.inner.bytes_limit {
                if now > limit && now - delta <= limit {
                    tracing::warn!(
                        label = %self.inner.label,
                        consumed = now,
                        limit,
                        "memory tracker exceeded its limit"
                    );
                }
            }
        }
    }
}

impl MemoryTracker for Tracker {
    fn consume(&self, delta: i64) {
        if delta == 0 {
            return;
        }
        // Lock order is always child before ancestor.
        let parent = {
            let slot = self.parent_slot();
            self.add_local(delta);
            slot.clone()
        };
        if let Some(parent) = parent {
            parent.consume(delta);
        }
    }

    fn bytes_consumed(&self) -> i64 {
        self.inner.consumed.load(Ordering::Acquire)
    }

    fn label(&self) -> &str {
        &self.inner.label
    }
}

impl fmt::Display for Tracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\"{{ consumed: {}, peak: {}",
            self.inner.label,
            self.bytes_consumed(),
            self.max_consumed()
        )?;
        if let Some(limit) = self.inner.bytes_limit {
            write!(f, ", limit: {}", limit)?;
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_and_release() {
        let t = Tracker::new("t");
        t.consume(100);
        t.consume(50);
        t.consume(-120);
        assert_eq!(t.bytes_consumed(), 30);
        assert_eq!(t.max_consumed(), 150);
        assert_eq!(t.label(), "t");
    }

    #[test]
    fn consume_propagates_to_ancestors() {
        let root = Tracker::new("query");
        let mid = Tracker::new("operator");
        let leaf = Tracker::new("list");
        mid.attach_to(&root).unwrap();
        leaf.attach_to(&mid).unwrap();

        leaf.consume(64);
        mid.consume(16);
        assert_eq!(leaf.bytes_consumed(), 64);
        assert_eq!(mid.bytes_consumed(), 80);
        assert_eq!(root.bytes_consumed(), 80);

        leaf.consume(-64);
        assert_eq!(root.bytes_consumed(), 16);
    }

    #[test]
    fn attach_moves_existing_bytes() {
        let a = Tracker::new("a");
        let b = Tracker::new("b");
        let child = Tracker::new("child");
        child.consume(40);

        child.attach_to(&a).unwrap();
        assert_eq!(a.bytes_consumed(), 40);

        child.attach_to(&b).unwrap();
        assert_eq!(a.bytes_consumed(), 0);
        assert_eq!(b.bytes_consumed(), 40);
        assert!(child.parent().unwrap().ptr_eq(&b));

        child.detach();
        assert_eq!(b.bytes_consumed(), 0);
        assert!(child.parent().is_none());
        assert_eq!(child.bytes_consumed(), 40);
    }

    #[test]
    fn reattach_under_concurrent_consume_keeps_parents_balanced() {
        let a = Tracker::new("a");
        let b = Tracker::new("b");
        let child = Tracker::new("child");
        child.attach_to(&a).unwrap();

        let worker = {
            let child = child.clone();
            std::thread::spawn(move || {
                for i in 0..20_000 {
                    child.consume(if i % 3 == 0 { -8 } else { 8 });
                }
            })
        };
        for i in 0..2_000 {
            let target = if i % 2 == 0 { &b } else { &a };
            child.attach_to(target).unwrap();
        }
        worker.join().unwrap();

        let total = child.bytes_consumed();
        assert!(child.parent().unwrap().ptr_eq(&a));
        assert_eq!(a.bytes_consumed(), total);
        assert_eq!(b.bytes_consumed(), 0);

        child.detach();
        assert_eq!(a.bytes_consumed(), 0);
    }

    #[test]
    fn attach_rejects_cycles() {
        let a = Tracker::new("a");
        let b = Tracker::new("b");
        b.attach_to(&a).unwrap();

        assert!(matches!(a.attach_to(&b), Err(Error::TrackerCycle { .. })));
        assert!(matches!(a.attach_to(&a), Err(Error::TrackerCycle { .. })));
        assert!(a.parent().is_none());
    }

    #[test]
    fn limit_is_advisory() {
        let t = Tracker::with_limit("capped", 100);
        t.consume(80);
        assert!(!t.limit_exceeded());
        t.consume(40);
        assert!(t.limit_exceeded());
        assert_eq!(t.bytes_consumed(), 120);
        t.consume(-40);
        assert!(!t.limit_exceeded());
    }

    #[test]
    fn display_reports_totals() {
        let t = Tracker::with_limit("list", 10);
        t.consume(4);
        assert_eq!(t.to_string(), "\"list\"{ consumed: 4, peak: 4, limit: 10 }");
    }
}
