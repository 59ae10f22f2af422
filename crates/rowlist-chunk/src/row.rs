//! Row views and row addresses.

use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;

use rowlist_core::types::Scalar;
use serde::{Deserialize, Serialize};

/// One row, as handed out by a container.
///
/// In-memory containers lend their storage; containers that must materialize
/// rows (e.g. read back from disk) hand out owned values through the same type.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<'a> {
    values: Cow<'a, [Scalar]>,
}

impl<'a> Row<'a> {
    pub fn borrowed(values: &'a [Scalar]) -> Self {
        Self {
            values: Cow::Borrowed(values),
        }
    }

    pub fn owned(values: Vec<Scalar>) -> Row<'static> {
        Row {
            values: Cow::Owned(values),
        }
    }

    pub fn values(&self) -> &[Scalar] {
        &self.values
    }

    /// Copy the row out of its container.
    pub fn into_owned(self) -> Vec<Scalar> {
        self.values.into_owned()
    }
}

impl Deref for Row<'_> {
    type Target = [Scalar];

    fn deref(&self) -> &Self::Target {
        &self.values
    }
}

impl PartialEq<[Scalar]> for Row<'_> {
    fn eq(&self, other: &[Scalar]) -> bool {
        self.values.as_ref() == other
    }
}

impl PartialEq<Vec<Scalar>> for Row<'_> {
    fn eq(&self, other: &Vec<Scalar>) -> bool {
        self.values.as_ref() == other.as_slice()
    }
}

/// Address of a row inside the container that returned it.
///
/// Only meaningful for that container, and only until it is reset. No
/// generation is carried: dereferencing a stale pointer is a caller bug.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct RowPtr {
    pub block_idx: u32,
    pub row_idx: u32,
}

impl RowPtr {
    /// Both indexes are stored as `u32`; lists are limited to `u32::MAX`
    /// blocks and blocks to `u32::MAX` rows.
    pub fn new(block_idx: usize, row_idx: usize) -> Self {
        debug_assert!(block_idx <= u32::MAX as usize && row_idx <= u32::MAX as usize);
        Self {
            block_idx: block_idx as u32,
            row_idx: row_idx as u32,
        }
    }

    pub fn block(self) -> usize {
        self.block_idx as usize
    }

    pub fn row(self) -> usize {
        self.row_idx as usize
    }
}

impl fmt::Display for RowPtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.block_idx, self.row_idx)
    }
}
