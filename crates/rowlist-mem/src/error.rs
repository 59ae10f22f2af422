use thiserror::Error;

/// Result type local to rowlist-mem.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("attaching tracker '{child}' under '{parent}' would form a cycle")]
    TrackerCycle { child: String, parent: String },
}
