//! Fixed-capacity row blocks.
//!
//! A block stores its rows row-major in a single pre-sized `Vec<Scalar>`, so
//! its memory footprint reflects the reserved capacity, not only the rows in
//! use. Blocks are reset in place and reused; their `BlockId` never changes.

use std::mem::size_of;
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rowlist_core::id::BlockId;
use rowlist_core::schema::Schema;
use rowlist_core::types::Scalar;

use crate::row::Row;

static NEXT_BLOCK_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Debug)]
pub struct Block {
    id: BlockId,
    schema: Arc<Schema>,
    capacity: usize,
    num_rows: usize,
    data: Vec<Scalar>,
    /// Heap bytes owned by Str/Bin values currently stored.
    heap_bytes: usize,
    /// Bytes a row list charged for this block when sealing it; 0 if uncharged.
    charged_bytes: usize,
}

impl Block {
    /// Create an empty block able to hold `capacity` rows without reallocating.
    pub fn new(schema: Arc<Schema>, capacity: usize) -> Self {
        let data = Vec::with_capacity(capacity * schema.width());
        Self {
            id: BlockId::new(NEXT_BLOCK_ID.fetch_add(1, Ordering::Relaxed)),
            schema,
            capacity,
            num_rows: 0,
            data,
            heap_bytes: 0,
            charged_bytes: 0,
        }
    }

    /// Create the block that follows `prev`: same schema, twice its capacity,
    /// bounded by `max_capacity`.
    pub fn grow_from(prev: &Block, max_capacity: usize) -> Self {
        let capacity = prev.capacity.saturating_mul(2).min(max_capacity).max(1);
        Self::new(Arc::clone(&prev.schema), capacity)
    }

    /// Build a filled block, sized exactly to `rows`.
    pub fn from_rows<I>(schema: Arc<Schema>, rows: I) -> Self
    where
        I: IntoIterator<Item = Vec<Scalar>>,
    {
        let rows: Vec<Vec<Scalar>> = rows.into_iter().collect();
        let mut block = Self::new(schema, rows.len());
        for row in &rows {
            block.append_row(row);
        }
        block
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn width(&self) -> usize {
        self.schema.width()
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.num_rows >= self.capacity
    }

    /// Bytes held by this block: reserved row slots plus owned heap payloads.
    pub fn footprint_bytes(&self) -> usize {
        self.capacity.max(self.num_rows) * self.width() * size_of::<Scalar>() + self.heap_bytes
    }

    /// Copy `row` into the next free slot.
    ///
    /// Appending past `capacity` grows the storage; row lists never do this,
    /// but blocks handed to a list in bulk may be over-full.
    pub fn append_row(&mut self, row: &[Scalar]) {
        debug_assert!(self.schema.conforms(row), "row does not match block schema");
        self.data.extend_from_slice(row);
        self.heap_bytes += row.iter().map(Scalar::heap_bytes).sum::<usize>();
        self.num_rows += 1;
    }

    pub fn get_row(&self, offset: usize) -> Row<'_> {
        debug_assert!(offset < self.num_rows, "row offset {offset} out of range");
        Row::borrowed(&self.data[self.slot(offset)])
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        (0..self.num_rows).map(move |i| self.get_row(i))
    }

    /// Claim the next slot, writing `hint` as placeholder content.
    /// Returns the offset of the claimed slot.
    pub fn reserve_row(&mut self, hint: &[Scalar]) -> usize {
        let offset = self.num_rows;
        self.append_row(hint);
        offset
    }

    /// Overwrite the row at `offset` in place.
    pub fn set_row(&mut self, offset: usize, row: &[Scalar]) {
        debug_assert!(offset < self.num_rows, "row offset {offset} out of range");
        debug_assert!(self.schema.conforms(row), "row does not match block schema");
        let range = self.slot(offset);
        for (slot, value) in self.data[range].iter_mut().zip(row) {
            self.heap_bytes -= slot.heap_bytes();
            self.heap_bytes += value.heap_bytes();
            *slot = value.clone();
        }
    }

    /// Drop all rows, keeping capacity and identity.
    pub fn reset(&mut self) {
        self.data.clear();
        self.num_rows = 0;
        self.heap_bytes = 0;
    }

    /// Record the bytes charged for this block. The same amount must be
    /// released later, whatever the footprint has become by then.
    pub(crate) fn set_charged(&mut self, bytes: usize) {
        self.charged_bytes = bytes;
    }

    /// Clear and return the recorded charge.
    pub(crate) fn take_charged(&mut self) -> usize {
        std::mem::take(&mut self.charged_bytes)
    }

    #[cfg(test)]
    pub(crate) fn charged_bytes(&self) -> usize {
        self.charged_bytes
    }

    fn slot(&self, offset: usize) -> Range<usize> {
        let w = self.width();
        offset * w..(offset + 1) * w
    }
}
