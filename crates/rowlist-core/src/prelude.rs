//! Convenient re-exports for downstream crates.

pub use crate::config::ListConfig;
pub use crate::error::{Error, Result};
pub use crate::id::BlockId;
pub use crate::schema::{DataType, Field, Schema};
pub use crate::tracker::MemoryTracker;
pub use crate::types::Scalar;
