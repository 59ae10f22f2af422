//! In-memory row list.
//!
//! `RowList` accumulates rows in a growing sequence of blocks. Block capacity
//! starts at `init_capacity` and doubles up to `max_capacity`. Reset moves every
//! block onto a free list, and later appends draw from it before allocating.
//!
//! Memory accounting is per block and lazy: a block's footprint is charged to
//! the tracker once, when it is sealed. Sealing happens when a sibling block
//! starts, when a pre-built block is added, or on reset. Until then the open
//! block's growth is invisible to the tracker. Recycling a block from the free
//! list releases the charge it carried into the pool.

use std::sync::Arc;

use rowlist_core::config::ListConfig;
use rowlist_core::schema::Schema;
use rowlist_core::tracker::MemoryTracker;
use rowlist_core::types::Scalar;
use rowlist_mem::Tracker;

use crate::block::Block;
use crate::container::RowContainer;
use crate::error::{BoxError, Error, Result};
use crate::row::{Row, RowPtr};

/// Label of the tracker a list creates for itself.
pub const TRACKER_LABEL: &str = "chunk.RowList";

#[derive(Debug)]
pub struct RowList {
    schema: Arc<Schema>,
    init_capacity: usize,
    max_capacity: usize,
    length: usize,
    blocks: Vec<Block>,
    freelist: Vec<Block>,
    tracker: Tracker,
    /// Index of the last block in `blocks` whose footprint has been charged.
    charged: Option<usize>,
}

impl RowList {
    pub fn new(schema: impl Into<Arc<Schema>>, init_capacity: usize, max_capacity: usize) -> Self {
        Self::with_tracker(schema, init_capacity, max_capacity, Tracker::new(TRACKER_LABEL))
    }

    /// Build a list reporting to `tracker`, which becomes dedicated to this
    /// list: it is detached from its parent when the list is dropped.
    pub fn with_tracker(
        schema: impl Into<Arc<Schema>>,
        init_capacity: usize,
        max_capacity: usize,
        tracker: Tracker,
    ) -> Self {
        let init_capacity = init_capacity.max(1);
        Self {
            schema: schema.into(),
            init_capacity,
            max_capacity: max_capacity.max(init_capacity),
            length: 0,
            blocks: Vec::new(),
            freelist: Vec::new(),
            tracker,
            charged: None,
        }
    }

    pub fn from_config(
        schema: impl Into<Arc<Schema>>,
        cfg: &ListConfig,
    ) -> rowlist_core::error::Result<Self> {
        cfg.validate()?;
        Ok(Self::new(schema, cfg.init_block_rows, cfg.max_block_rows))
    }

    /// Tracker this list charges; attach it under a parent to aggregate.
    pub fn mem_tracker(&self) -> &Tracker {
        &self.tracker
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn init_capacity(&self) -> usize {
        self.init_capacity
    }

    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// Total number of rows.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    pub fn rows_in_block(&self, idx: usize) -> usize {
        self.blocks[idx].num_rows()
    }

    pub fn block(&self, idx: usize) -> &Block {
        &self.blocks[idx]
    }

    /// Number of retired blocks waiting for reuse.
    pub fn pooled_blocks(&self) -> usize {
        self.freelist.len()
    }

    /// Copy `row` into the list and return its address.
    pub fn append_row(&mut self, row: &[Scalar]) -> RowPtr {
        let blk_idx = self.block_for_write();
        let block = &mut self.blocks[blk_idx];
        let row_idx = block.num_rows();
        block.append_row(row);
        self.length += 1;
        RowPtr::new(blk_idx, row_idx)
    }

    /// Take ownership of a pre-built block. The block is charged immediately
    /// and sealed: later appends start a new block after it.
    pub fn add_block(&mut self, mut block: Block) -> Result<()> {
        if block.is_empty() {
            return Err(Error::EmptyBlock);
        }
        debug_assert!(
            block.schema().as_ref() == self.schema.as_ref(),
            "block schema does not match list schema"
        );
        self.seal_last();
        let bytes = block.footprint_bytes();
        self.tracker.consume(bytes as i64);
        block.set_charged(bytes);
        self.length += block.num_rows();
        self.blocks.push(block);
        self.charged = Some(self.blocks.len() - 1);
        Ok(())
    }

    /// Row at `ptr`. `ptr` must come from this list since its last reset.
    pub fn get_row(&self, ptr: RowPtr) -> Row<'_> {
        self.blocks[ptr.block()].get_row(ptr.row())
    }

    /// Empty the list, keeping every block for reuse.
    ///
    /// The open block is sealed first, so the tracker keeps reporting the
    /// pooled capacity until those blocks are drawn again.
    pub fn reset(&mut self) {
        self.seal_last();
        self.freelist.append(&mut self.blocks);
        self.length = 0;
        self.charged = None;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            pooled = self.freelist.len(),
            consumed = self.tracker.bytes_consumed(),
            "row list reset"
        );
    }

    /// Claim a slot shaped like `hint`, to be written later with
    /// [`RowList::fill_row`].
    ///
    /// Slot selection matches `append_row`. Intended for populating an empty
    /// list out of order once every position is known; do not interleave with
    /// `append_row` while slots are still unfilled.
    pub fn reserve_row(&mut self, hint: &[Scalar]) -> RowPtr {
        let blk_idx = self.block_for_write();
        let row_idx = self.blocks[blk_idx].reserve_row(hint);
        self.length += 1;
        RowPtr::new(blk_idx, row_idx)
    }

    /// Write the final content of a slot claimed by `reserve_row`.
    ///
    /// A fill on a block that is already sealed is not reported to the
    /// tracker; the block still releases exactly its sealed charge when it is
    /// recycled.
    pub fn fill_row(&mut self, ptr: RowPtr, row: &[Scalar]) {
        self.blocks[ptr.block()].set_row(ptr.row(), row);
    }

    /// Visit every row in block order, then offset order.
    ///
    /// Stops at the first failing visit and returns its error with the row
    /// position attached.
    pub fn walk<F, E>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(Row<'_>) -> std::result::Result<(), E>,
        E: Into<BoxError>,
    {
        for (blk_idx, block) in self.blocks.iter().enumerate() {
            for (row_idx, row) in block.rows().enumerate() {
                visit(row).map_err(|e| Error::Walk {
                    ptr: RowPtr::new(blk_idx, row_idx),
                    source: e.into(),
                })?;
            }
        }
        Ok(())
    }

    /// Index of the block the next row goes into, pushing a new one if the
    /// last block is full or already sealed.
    fn block_for_write(&mut self) -> usize {
        let last = self.blocks.len().checked_sub(1);
        let need_new = match last {
            None => true,
            Some(idx) => self.blocks[idx].is_full() || self.charged == Some(idx),
        };
        if need_new {
            let block = self.alloc_block();
            self.blocks.push(block);
            if let Some(idx) = last {
                if self.charged != Some(idx) {
                    self.seal(idx);
                }
            }
        }
        self.blocks.len() - 1
    }

    fn alloc_block(&mut self) -> Block {
        if let Some(mut block) = self.freelist.pop() {
            // Release what was charged at sealing; fills after that may
            // have moved the footprint.
            self.tracker.consume(-(block.take_charged() as i64));
            block.reset();

            #[cfg(feature = "tracing")]
            tracing::trace!(block = %block.id(), capacity = block.capacity(), "recycled block");
            return block;
        }
        match self.blocks.last() {
            Some(last) => Block::grow_from(last, self.max_capacity),
            None => Block::new(Arc::clone(&self.schema), self.init_capacity),
        }
    }

    fn seal_last(&mut self) {
        if let Some(last) = self.blocks.len().checked_sub(1) {
            if self.charged != Some(last) {
                self.seal(last);
            }
        }
    }

    fn seal(&mut self, idx: usize) {
        let block = &mut self.blocks[idx];
        let bytes = block.footprint_bytes();
        block.set_charged(bytes);
        self.tracker.consume(bytes as i64);
        self.charged = Some(idx);

        #[cfg(feature = "tracing")]
        tracing::trace!(block = idx, bytes, "sealed block");
    }
}

impl RowContainer for RowList {
    fn rows_in_block(&self, idx: usize) -> usize {
        RowList::rows_in_block(self, idx)
    }

    fn num_blocks(&self) -> usize {
        RowList::num_blocks(self)
    }

    fn get_row(&self, ptr: RowPtr) -> Result<Row<'_>> {
        Ok(RowList::get_row(self, ptr))
    }

    fn add_block(&mut self, block: Block) -> Result<()> {
        RowList::add_block(self, block)
    }
}

impl Drop for RowList {
    fn drop(&mut self) {
        self.tracker.detach();
    }
}
