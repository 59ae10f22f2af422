//! Container contract shared by the in-memory row list and disk-backed lists.
//!
//! Callers that only need to address rows and feed whole blocks depend on this
//! trait rather than on a concrete container.

use crate::block::Block;
use crate::error::Result;
use crate::row::{Row, RowPtr};

pub trait RowContainer {
    /// Number of rows stored in block `idx`.
    fn rows_in_block(&self, idx: usize) -> usize;

    fn num_blocks(&self) -> usize;

    /// Fetch the row at `ptr`. The in-memory list never fails here; disk-backed
    /// containers report read errors.
    fn get_row(&self, ptr: RowPtr) -> Result<Row<'_>>;

    /// Take ownership of a non-empty, pre-built block.
    fn add_block(&mut self, block: Block) -> Result<()>;
}
