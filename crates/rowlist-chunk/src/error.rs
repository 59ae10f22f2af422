use thiserror::Error;

use crate::row::RowPtr;

/// Result type local to rowlist-chunk.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed failure returned by a walk visitor.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("block appended to a row list must hold at least 1 row")]
    EmptyBlock,

    #[error("walk aborted at row {ptr}: {source}")]
    Walk {
        ptr: RowPtr,
        #[source]
        source: BoxError,
    },
}
