use std::hint::black_box;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::{Result, Strategy};

/// Times a single transform of `input` under `strategy`.
///
/// A fresh output buffer of the same length is allocated before the clock starts and dropped
/// after it stops. The transformed values are never inspected, only the elapsed time matters.
///
/// # Errors
///
/// Propagates the error of [`Strategy::apply`].
///
/// # Examples
///
/// ```
/// use transform_bench::{Operation, Strategy, measure};
///
/// let input = vec![0.5; 1000];
/// let elapsed = measure(Strategy::Unscheduled, &input, &Operation::SLOW.function()).unwrap();
///
/// println!("took {elapsed:?}");
/// ```
#[cfg_attr(test, mutants::skip)] // Elapsed times are not deterministic enough to assert on.
pub fn measure<F>(strategy: Strategy, input: &[f64], op: &F) -> Result<Duration>
where
    F: Fn(f64) -> f64 + Sync,
{
    let mut output = vec![0.0; input.len()];

    let start = Instant::now();
    strategy.apply(input, &mut output, op)?;
    let elapsed = start.elapsed();

    black_box(&output);

    debug!(%strategy, len = input.len(), ?elapsed, "transform measured");

    Ok(elapsed)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::{ExecutionPolicy, fast, slow};

    #[test]
    fn durations_are_non_negative() {
        let input = vec![0.25; 10_000];

        for strategy in [
            Strategy::Unscheduled,
            Strategy::Policy(ExecutionPolicy::Sequenced),
            Strategy::Policy(ExecutionPolicy::Parallel),
            Strategy::Policy(ExecutionPolicy::ParallelUnsequenced),
            Strategy::ForkJoin { threads: 0 },
            Strategy::ForkJoin { threads: 4 },
        ] {
            let elapsed = measure(strategy, &input, &slow).unwrap();
            assert!(elapsed >= Duration::ZERO);
        }
    }

    #[test]
    fn every_element_is_transformed_once() {
        let input = vec![1.0; 12_345];
        let calls = AtomicUsize::new(0);

        let op = |x: f64| {
            calls.fetch_add(1, Ordering::Relaxed);
            x
        };

        measure(Strategy::ForkJoin { threads: 3 }, &input, &op).unwrap();
        assert_eq!(calls.load(Ordering::Relaxed), 12_345);

        calls.store(0, Ordering::Relaxed);
        measure(Strategy::Policy(ExecutionPolicy::Parallel), &input, &op).unwrap();
        assert_eq!(calls.load(Ordering::Relaxed), 12_345);
    }

    #[test]
    fn empty_input() {
        let elapsed = measure(Strategy::Unscheduled, &[], &fast).unwrap();

        assert!(elapsed >= Duration::ZERO);
    }
}
