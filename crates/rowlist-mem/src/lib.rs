#![forbid(unsafe_code)]
//! rowlist-mem: concrete memory tracking for row containers.
//!
//! Provides the hierarchical [`Tracker`] behind the `MemoryTracker` interface
//! defined in `rowlist-core::tracker`. A tracker is handed to each container;
//! owners aggregate usage by attaching container trackers under a parent
//! (for example one per query). There is no process-wide root.

pub mod error;
pub mod tracker;
pub mod tracking;

pub use error::{Error, Result};
pub use tracker::Tracker;
pub use tracking::PeakTracker;
