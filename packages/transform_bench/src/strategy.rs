use std::fmt;

use rayon::prelude::*;

use crate::{Result, fork_join};

/// Number of elements each rayon task processes in one tight loop under
/// [`ExecutionPolicy::ParallelUnsequenced`].
pub const UNSEQUENCED_BLOCK_LEN: usize = 4096;

/// How the parallel-transform primitive is allowed to schedule the per-element calls.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum ExecutionPolicy {
    /// Go through the parallel primitive but forbid it from splitting the work, so every call
    /// runs in order on the calling thread.
    Sequenced,

    /// Let rayon split the work across its pool however it sees fit.
    Parallel,

    /// Let rayon split the work into fixed-size blocks, each processed by a loop that the
    /// compiler may vectorize. Element order within and across blocks is unconstrained.
    ParallelUnsequenced,
}

impl ExecutionPolicy {
    /// All policies, in report order.
    pub const ALL: [Self; 3] = [Self::Sequenced, Self::Parallel, Self::ParallelUnsequenced];
}

impl fmt::Display for ExecutionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequenced => write!(f, "seq"),
            Self::Parallel => write!(f, "par"),
            Self::ParallelUnsequenced => write!(f, "par_unseq"),
        }
    }
}

/// A way of scheduling an elementwise transform.
///
/// # Examples
///
/// ```
/// use transform_bench::{ExecutionPolicy, Operation, Strategy};
///
/// let input = [1.0, 2.0, 3.0];
/// let mut output = [0.0; 3];
///
/// Strategy::Policy(ExecutionPolicy::Parallel)
///     .apply(&input, &mut output, &Operation::FAST.function())
///     .unwrap();
///
/// assert_eq!(output, [2.0, 3.0, 4.0]);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
#[expect(
    variant_size_differences,
    reason = "the largest variant is one usize, which is small enough to pass by value"
)]
pub enum Strategy {
    /// A plain loop on the calling thread.
    Unscheduled,

    /// The rayon parallel-transform primitive under the given policy.
    Policy(ExecutionPolicy),

    /// A fixed number of freshly spawned threads, each owning one contiguous chunk.
    ///
    /// A thread count of zero is treated as one.
    ForkJoin {
        /// Requested number of worker threads.
        threads: usize,
    },
}

impl Strategy {
    /// Applies `op` to every element of `input`, writing the results into `output`.
    ///
    /// # Errors
    ///
    /// Returns an error only for [`Strategy::ForkJoin`], if a worker thread cannot be created.
    ///
    /// # Panics
    ///
    /// Panics if `input` and `output` differ in length.
    pub fn apply<F>(self, input: &[f64], output: &mut [f64], op: &F) -> Result<()>
    where
        F: Fn(f64) -> f64 + Sync,
    {
        assert_eq!(
            input.len(),
            output.len(),
            "input and output of a transform must have the same length"
        );

        match self {
            Self::Unscheduled => transform_sequential(input, output, op),
            Self::Policy(policy) => transform_with_policy(input, output, op, policy),
            Self::ForkJoin { threads } => {
                fork_join::transform(input, output, op, threads)?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unscheduled => write!(f, "no policy"),
            Self::Policy(policy) => write!(f, "{policy} policy"),
            Self::ForkJoin { threads } => write!(f, "fork-join x{threads}"),
        }
    }
}

pub(crate) fn transform_sequential<F>(input: &[f64], output: &mut [f64], op: &F)
where
    F: Fn(f64) -> f64,
{
    for (out, &x) in output.iter_mut().zip(input) {
        *out = op(x);
    }
}

fn transform_with_policy<F>(input: &[f64], output: &mut [f64], op: &F, policy: ExecutionPolicy)
where
    F: Fn(f64) -> f64 + Sync,
{
    match policy {
        ExecutionPolicy::Sequenced => output
            .par_iter_mut()
            .zip(input.par_iter())
            .with_min_len(usize::MAX)
            .for_each(|(out, &x)| *out = op(x)),
        ExecutionPolicy::Parallel => output
            .par_iter_mut()
            .zip(input.par_iter())
            .for_each(|(out, &x)| *out = op(x)),
        ExecutionPolicy::ParallelUnsequenced => output
            .par_chunks_mut(UNSEQUENCED_BLOCK_LEN)
            .zip(input.par_chunks(UNSEQUENCED_BLOCK_LEN))
            .for_each(|(out, block)| transform_sequential(block, out, op)),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::thread;

    use static_assertions::assert_impl_all;

    use super::*;
    use crate::{fast, generate, slow};

    assert_impl_all!(Strategy: Send, Sync, Copy);
    assert_impl_all!(ExecutionPolicy: Send, Sync, Copy);

    fn all_strategies() -> Vec<Strategy> {
        let mut strategies = vec![Strategy::Unscheduled];
        strategies.extend(ExecutionPolicy::ALL.map(Strategy::Policy));
        strategies.extend([1, 2, 3, 4, 8].map(|threads| Strategy::ForkJoin { threads }));
        strategies
    }

    fn apply_to_new(strategy: Strategy, input: &[f64], op: fn(f64) -> f64) -> Vec<f64> {
        let mut output = vec![0.0; input.len()];
        strategy.apply(input, &mut output, &op).unwrap();
        output
    }

    #[test]
    fn all_strategies_agree_on_fast() {
        // Longer than a few unsequenced blocks, and not a multiple of the block length.
        let input = generate(3 * UNSEQUENCED_BLOCK_LEN + 17, 42, 0.0..1.0).unwrap();
        let expected: Vec<f64> = input.iter().map(|x| x + 1.0).collect();

        for strategy in all_strategies() {
            let output = apply_to_new(strategy, &input, fast);
            assert_eq!(output, expected, "{strategy} disagrees");
        }
    }

    #[test]
    fn all_strategies_agree_on_slow() {
        let input = generate(2000, 7, -1.0..1.0).unwrap();
        let expected = apply_to_new(Strategy::Unscheduled, &input, slow);

        for strategy in all_strategies() {
            let output = apply_to_new(strategy, &input, slow);
            assert_eq!(output, expected, "{strategy} disagrees");
        }
    }

    #[test]
    fn empty_input_is_fine_everywhere() {
        for strategy in all_strategies() {
            assert!(apply_to_new(strategy, &[], fast).is_empty());
        }
    }

    #[test]
    fn sequenced_policy_stays_on_calling_thread() {
        let input = vec![0.5; 50_000];
        let mut output = vec![0.0; input.len()];
        let seen_threads = Mutex::new(HashSet::new());

        let op = |x: f64| {
            seen_threads.lock().unwrap().insert(thread::current().id());
            x
        };

        Strategy::Policy(ExecutionPolicy::Sequenced)
            .apply(&input, &mut output, &op)
            .unwrap();

        let seen_threads = seen_threads.into_inner().unwrap();
        assert_eq!(seen_threads.len(), 1);
        assert!(seen_threads.contains(&thread::current().id()));
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn mismatched_lengths_panic() {
        let mut output = vec![0.0; 1];

        Strategy::Unscheduled
            .apply(&[1.0, 2.0], &mut output, &fast)
            .unwrap();
    }

    #[test]
    fn display_names() {
        let unsequenced = Strategy::Policy(ExecutionPolicy::ParallelUnsequenced);
        let fork_join = Strategy::ForkJoin { threads: 8 };

        assert_eq!(Strategy::Unscheduled.to_string(), "no policy");
        assert_eq!(unsequenced.to_string(), "par_unseq policy");
        assert_eq!(fork_join.to_string(), "fork-join x8");
    }
}
