//! Hand-rolled fork-join transform over a fixed number of freshly spawned threads.
//!
//! The input is split into contiguous chunks of near-equal length, one per worker, and every
//! worker writes into its own disjoint slice of the output. Threads are created for every call
//! and joined before returning, so thread lifecycle cost is part of what this strategy measures.

use std::num::NonZero;
use std::{mem, thread};

use new_zealand::nz;
use num_integer::Integer;
use tracing::trace;

use crate::strategy::transform_sequential;
use crate::{Error, Result};

/// Coerces a requested thread count to the number of workers actually used.
///
/// Zero is treated as one.
#[must_use]
pub fn worker_count(requested: usize) -> NonZero<usize> {
    NonZero::new(requested).unwrap_or(nz!(1))
}

/// Returns the length of each worker's chunk when `len` elements are split across `workers`.
///
/// The first `len % workers` chunks receive one extra element, so lengths never differ by
/// more than one and always sum to `len`.
///
/// # Examples
///
/// ```
/// use new_zealand::nz;
/// use transform_bench::fork_join::chunk_lengths;
///
/// let lengths: Vec<_> = chunk_lengths(10, nz!(4)).collect();
///
/// assert_eq!(lengths, [3, 3, 2, 2]);
/// ```
pub fn chunk_lengths(len: usize, workers: NonZero<usize>) -> impl Iterator<Item = usize> {
    let (base, remainder) = len.div_rem(&workers.get());

    (0..workers.get()).map(move |index| {
        if index < remainder {
            base.checked_add(1)
                .expect("a chunk can never be longer than the whole slice")
        } else {
            base
        }
    })
}

/// Applies `op` to every element of `input`, writing into `output`, using exactly
/// `worker_count(requested_threads)` newly spawned threads.
///
/// Returns the number of workers that were spawned.
///
/// # Errors
///
/// Returns [`Error::WorkerSpawn`] if a worker thread cannot be created. Workers that were
/// already started are still joined before returning.
///
/// # Panics
///
/// Panics if `input` and `output` differ in length, or if `op` panics on any worker.
pub fn transform<F>(
    input: &[f64],
    output: &mut [f64],
    op: &F,
    requested_threads: usize,
) -> Result<NonZero<usize>>
where
    F: Fn(f64) -> f64 + Sync,
{
    assert_eq!(
        input.len(),
        output.len(),
        "input and output of a transform must have the same length"
    );

    let workers = worker_count(requested_threads);

    thread::scope(|scope| -> Result<()> {
        let mut remaining_input = input;
        let mut remaining_output = output;

        for (worker_index, chunk_len) in chunk_lengths(input.len(), workers).enumerate() {
            let (input_chunk, input_rest) = remaining_input.split_at(chunk_len);
            let (output_chunk, output_rest) =
                mem::take(&mut remaining_output).split_at_mut(chunk_len);

            remaining_input = input_rest;
            remaining_output = output_rest;

            thread::Builder::new()
                .name(format!("transform-worker-{worker_index}"))
                .spawn_scoped(scope, move || {
                    trace!(worker_index, chunk_len, "transform worker started");
                    transform_sequential(input_chunk, output_chunk, op);
                })
                .map_err(|source| Error::WorkerSpawn {
                    worker_index,
                    source,
                })?;
        }

        Ok(())
    })?;

    Ok(workers)
}
