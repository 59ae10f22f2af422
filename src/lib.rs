#![forbid(unsafe_code)]
//! rowlist: append-optimized in-memory row lists for query execution.
//!
//! Re-exports the workspace crates so tests, benches and embedders can depend
//! on a single package.

pub use rowlist_chunk::{Block, Row, RowContainer, RowList, RowPtr};
pub use rowlist_chunk::Error as ListError;
pub use rowlist_core::prelude::*;
pub use rowlist_mem::Tracker;
