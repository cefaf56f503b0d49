use std::io;

use thiserror::Error;

/// Errors that can stop a benchmark run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The sample data range cannot be sampled uniformly.
    #[error("invalid sample range {start}..{end}: {problem}")]
    InvalidRange {
        /// Inclusive lower bound of the rejected range.
        start: f64,

        /// Exclusive upper bound of the rejected range.
        end: f64,

        /// A human-readable description of the problem.
        problem: String,
    },

    /// The operating system refused to create a fork-join worker thread.
    #[error("failed to spawn transform worker {worker_index}")]
    WorkerSpawn {
        /// Zero-based index of the worker that could not be started.
        worker_index: usize,

        /// The underlying spawn failure.
        #[source]
        source: io::Error,
    },

    /// The report could not be written to its destination.
    #[error("failed to write benchmark report")]
    Output(#[from] io::Error),
}

/// A specialized `Result` type for benchmark operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
