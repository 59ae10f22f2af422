#![forbid(unsafe_code)]
//! rowlist-chunk: row blocks and the in-memory row list.
//!
//! Design intent:
//! - Rows are appended into fixed-capacity [`Block`]s; blocks grow
//!   geometrically up to a bound and are recycled across resets.
//! - Memory is reported to a [`rowlist_mem::Tracker`] once per block, when the
//!   block is sealed, never per row.
//! - Rows are addressed by [`RowPtr`] (block index, row offset).

pub mod block;
pub mod container;
pub mod error;
pub mod list;
pub mod row;

pub use block::Block;
pub use container::RowContainer;
pub use error::{Error, Result};
pub use list::RowList;
pub use row::{Row, RowPtr};
