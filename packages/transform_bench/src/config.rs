use std::num::NonZero;
use std::ops::Range;
use std::thread;

use nonempty::{NonEmpty, nonempty};

use crate::Operation;

/// Everything a benchmark run needs to know, fixed before the first measurement.
///
/// The [`Default`] configuration is the one the binary runs with. Tests and benchmarks
/// narrow it down with the `with_*` methods.
///
/// # Examples
///
/// ```
/// use nonempty::nonempty;
/// use transform_bench::{BenchConfig, Operation};
///
/// let config = BenchConfig::default()
///     .with_sizes(vec![1_000])
///     .with_operations(vec![Operation::FAST])
///     .with_thread_counts(nonempty![1, 2]);
///
/// assert_eq!(config.sizes(), [1_000]);
/// assert_eq!(config.seed(), 42);
/// ```
#[derive(Clone, Debug)]
pub struct BenchConfig {
    sizes: Vec<usize>,
    seed: u64,
    sample_range: Range<f64>,
    thread_counts: NonEmpty<usize>,
    operations: Vec<Operation>,
    hardware_threads: usize,
}

impl BenchConfig {
    /// Number of samples generated for each round of measurements, in run order.
    #[must_use]
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Seed for the sample generator. Every size uses the same seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Range the samples are drawn from, inclusive start and exclusive end.
    #[must_use]
    pub fn sample_range(&self) -> Range<f64> {
        self.sample_range.clone()
    }

    /// Thread counts swept for the fork-join strategy, in report order.
    #[must_use]
    pub fn thread_counts(&self) -> &NonEmpty<usize> {
        &self.thread_counts
    }

    /// Operations measured for each size, in report order.
    #[must_use]
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Hardware concurrency reported by the host, or zero if it could not be determined.
    #[must_use]
    pub fn hardware_threads(&self) -> usize {
        self.hardware_threads
    }

    /// Replaces the sample sizes.
    #[must_use]
    pub fn with_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.sizes = sizes;
        self
    }

    /// Replaces the generator seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replaces the sample range.
    #[must_use]
    pub fn with_sample_range(mut self, sample_range: Range<f64>) -> Self {
        self.sample_range = sample_range;
        self
    }

    /// Replaces the fork-join thread count candidates.
    #[must_use]
    pub fn with_thread_counts(mut self, thread_counts: NonEmpty<usize>) -> Self {
        self.thread_counts = thread_counts;
        self
    }

    /// Replaces the measured operations.
    #[must_use]
    pub fn with_operations(mut self, operations: Vec<Operation>) -> Self {
        self.operations = operations;
        self
    }

    /// Overrides the detected hardware concurrency.
    #[must_use]
    pub fn with_hardware_threads(mut self, hardware_threads: usize) -> Self {
        self.hardware_threads = hardware_threads;
        self
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sizes: vec![10_000, 100_000, 1_000_000],
            seed: 42,
            sample_range: 0.0..1.0,
            thread_counts: nonempty![1, 2, 4, 8, 16, 32],
            operations: vec![Operation::FAST, Operation::SLOW],
            hardware_threads: hardware_concurrency(),
        }
    }
}

/// Number of concurrent execution contexts the host reports, or zero if it cannot tell.
#[must_use]
pub fn hardware_concurrency() -> usize {
    thread::available_parallelism().map_or(0, NonZero::get)
}
