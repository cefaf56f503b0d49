use std::io::Write;
use std::time::Duration;

use tracing::info;

use crate::report::{write_header, write_operation, write_size};
use crate::{BenchConfig, ExecutionPolicy, Operation, OperationTimings, Result, Strategy};
use crate::{generate, measure};

/// Runs every strategy for every configured data size and operation, writing the report to
/// `out` as each operation completes.
///
/// Each size gets one freshly generated sample array, shared read-only by all operations
/// and strategies at that size. Every configuration is measured exactly once.
///
/// # Errors
///
/// Returns an error if the sample range is invalid, if a fork-join worker cannot be spawned
/// or if writing to `out` fails. The run stops at the first error.
///
/// # Examples
///
/// ```
/// use nonempty::nonempty;
/// use transform_bench::{BenchConfig, Operation, run};
///
/// let config = BenchConfig::default()
///     .with_sizes(vec![100])
///     .with_operations(vec![Operation::FAST])
///     .with_thread_counts(nonempty![1, 2]);
///
/// let mut out = Vec::new();
/// run(&config, &mut out).unwrap();
///
/// assert!(String::from_utf8(out).unwrap().contains("Best K: "));
/// ```
pub fn run(config: &BenchConfig, out: &mut impl Write) -> Result<()> {
    info!(
        hardware_threads = config.hardware_threads(),
        sizes = ?config.sizes(),
        "starting transform benchmark"
    );

    write_header(out, config.hardware_threads())?;

    for &size in config.sizes() {
        let samples = generate(size, config.seed(), config.sample_range())?;
        info!(size, seed = config.seed(), "generated samples");

        write_size(out, size)?;

        for &operation in config.operations() {
            let timings = measure_operation(config, &samples, operation)?;
            write_operation(out, &timings, config.hardware_threads())?;
            out.flush()?;
        }
    }

    Ok(())
}

fn measure_operation(
    config: &BenchConfig,
    samples: &[f64],
    operation: Operation,
) -> Result<OperationTimings> {
    let op = operation.function();

    let unscheduled = measure(Strategy::Unscheduled, samples, &op)?;

    let mut policies = ExecutionPolicy::ALL.map(|policy| (policy, Duration::ZERO));
    for (policy, elapsed) in &mut policies {
        *elapsed = measure(Strategy::Policy(*policy), samples, &op)?;
    }

    let mut timings = OperationTimings::new(operation.name(), unscheduled, policies);

    for &threads in config.thread_counts() {
        let elapsed = measure(Strategy::ForkJoin { threads }, samples, &op)?;
        timings.push_fork_join(threads, elapsed);
    }

    Ok(timings)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use nonempty::nonempty;

    use super::*;
    use crate::Error;

    fn small_config() -> BenchConfig {
        BenchConfig::default()
            .with_sizes(vec![1_000, 2_000])
            .with_thread_counts(nonempty![1, 2, 4])
            .with_hardware_threads(4)
    }

    #[test]
    fn measures_every_candidate_in_order() {
        let samples = generate(1_000, 42, 0.0..1.0).unwrap();

        let timings = measure_operation(&small_config(), &samples, Operation::SLOW).unwrap();

        let threads: Vec<_> = timings.fork_join().iter().map(|t| t.threads).collect();
        assert_eq!(threads, [1, 2, 4]);

        let best = timings.best_fork_join().unwrap();
        assert!([1, 2, 4].contains(&best.threads));
    }

    #[test]
    fn one_block_per_size_and_operation() {
        let mut out = Vec::new();

        run(&small_config(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Number of processor threads: 4\n\n"));
        assert_eq!(text.matches("Data size: ").count(), 2);
        assert_eq!(text.matches("Operation: fast").count(), 2);
        assert_eq!(text.matches("Operation: slow").count(), 2);
        assert_eq!(text.matches("Best K: ").count(), 4);

        let separators = text
            .lines()
            .filter(|line| *line == "-------------------------------------")
            .count();
        assert_eq!(separators, 4);
    }

    #[test]
    fn no_sizes_prints_only_header() {
        let mut out = Vec::new();

        run(&small_config().with_sizes(Vec::new()), &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Number of processor threads: 4\n\n"
        );
    }

    #[test]
    fn invalid_range_stops_run() {
        let mut out = Vec::new();

        let result = run(&small_config().with_sample_range(1.0..0.0), &mut out);

        assert!(matches!(result, Err(Error::InvalidRange { .. })));
    }
}
