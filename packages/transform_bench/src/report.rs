use std::io::Write;
use std::time::Duration;

use crate::{ExecutionPolicy, Result};

const SEPARATOR: &str = "-------------------------------------";

const THREADS_HEADER: &str = "K";
const TIME_HEADER: &str = "Time (seconds)";

// Both table columns are left-aligned and padded to these widths, the last one included.
const THREADS_WIDTH: usize = 10;
const TIME_WIDTH: usize = 15;

/// Elapsed time of one fork-join trial.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ThreadCountTiming {
    /// Thread count candidate as configured (zero is timed as one thread).
    pub threads: usize,

    /// How long the transform took with this many threads.
    pub elapsed: Duration,
}

/// All measurements taken for one operation at one data size.
#[derive(Clone, Debug)]
pub struct OperationTimings {
    operation: &'static str,
    unscheduled: Duration,
    policies: [(ExecutionPolicy, Duration); 3],
    fork_join: Vec<ThreadCountTiming>,
}

impl OperationTimings {
    /// Starts a record for `operation` with the timings of the non-fork-join strategies.
    #[must_use]
    pub fn new(
        operation: &'static str,
        unscheduled: Duration,
        policies: [(ExecutionPolicy, Duration); 3],
    ) -> Self {
        Self {
            operation,
            unscheduled,
            policies,
            fork_join: Vec::new(),
        }
    }

    /// Appends the timing of one fork-join thread count candidate.
    pub fn push_fork_join(&mut self, threads: usize, elapsed: Duration) {
        self.fork_join.push(ThreadCountTiming { threads, elapsed });
    }

    /// The fork-join timings, in candidate order.
    #[must_use]
    pub fn fork_join(&self) -> &[ThreadCountTiming] {
        &self.fork_join
    }

    /// The fastest fork-join candidate. On a tie the earliest candidate wins.
    ///
    /// Returns `None` if no fork-join trial has been recorded.
    #[must_use]
    pub fn best_fork_join(&self) -> Option<ThreadCountTiming> {
        self.fork_join
            .iter()
            .copied()
            .min_by_key(|timing| timing.elapsed)
    }
}

/// Ratio of the best thread count to the hardware concurrency.
///
/// A hardware concurrency of zero is not special-cased and yields infinity.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "thread counts are far below the point where f64 loses integer precision"
)]
pub fn relation_to_hardware(best_threads: usize, hardware_threads: usize) -> f64 {
    best_threads as f64 / hardware_threads as f64
}

pub(crate) fn write_header(out: &mut impl Write, hardware_threads: usize) -> Result<()> {
    writeln!(out, "Number of processor threads: {hardware_threads}")?;
    writeln!(out)?;
    Ok(())
}

pub(crate) fn write_size(out: &mut impl Write, size: usize) -> Result<()> {
    writeln!(out, "Data size: {size}")?;
    Ok(())
}

pub(crate) fn write_operation(
    out: &mut impl Write,
    timings: &OperationTimings,
    hardware_threads: usize,
) -> Result<()> {
    writeln!(out, "Operation: {}", timings.operation)?;
    writeln!(
        out,
        "Sequential transform (no policy): {} seconds",
        seconds(timings.unscheduled)
    )?;

    for (policy, elapsed) in timings.policies {
        writeln!(
            out,
            "Transform with {policy} policy: {} seconds",
            seconds(elapsed)
        )?;
    }

    writeln!(out, "Custom parallel transform:")?;
    writeln!(
        out,
        "{THREADS_HEADER:<THREADS_WIDTH$}{TIME_HEADER:<TIME_WIDTH$}"
    )?;

    for timing in &timings.fork_join {
        writeln!(
            out,
            "{:<THREADS_WIDTH$}{:<TIME_WIDTH$}",
            timing.threads,
            seconds(timing.elapsed)
        )?;
    }

    if let Some(best) = timings.best_fork_join() {
        writeln!(out, "Best K: {}", best.threads)?;
        writeln!(
            out,
            "Relation to processor threads: {} / {hardware_threads} = {}",
            best.threads,
            relation_to_hardware(best.threads, hardware_threads)
        )?;
    }

    writeln!(out)?;
    writeln!(out, "{SEPARATOR}")?;
    Ok(())
}

fn seconds(elapsed: Duration) -> String {
    format!("{:.9}", elapsed.as_secs_f64())
}
