//! Crate-wide error taxonomy.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LifeError>;

/// Errors surfaced by board construction, the text reader, and the engine.
#[derive(Error, Debug)]
pub enum LifeError {
    /// Grid dimensions are invalid or cell storage cannot be reserved.
    #[error("cannot allocate {size}x{size} board: {message}")]
    Allocation { size: usize, message: String },

    /// Bounds violation on a cell accessor. Correct partitioning never
    /// produces one; seeing this means a worker touched a row it does not
    /// own.
    #[error("cell ({row}, {col}) is out of bounds for a {size}x{size} board")]
    Index { row: usize, col: usize, size: usize },

    /// The textual input does not match its declared dimensions.
    #[error("malformed input: {message}")]
    MalformedInput { message: String },

    /// A worker/barrier configuration that could never release the
    /// generation barrier, such as zero workers.
    #[error("deadlocked configuration: {message}")]
    Deadlock { message: String },

    /// A worker thread terminated abnormally mid-run.
    #[error("worker {worker} terminated abnormally during the run")]
    WorkerPanicked { worker: usize },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
