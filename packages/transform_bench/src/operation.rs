use std::hint::black_box;

/// Number of sine terms accumulated by [`slow`] on every call.
pub const SLOW_TERMS: u32 = 100;

/// A named elementwise operation that the strategies apply to every sample.
///
/// The function must be pure: strategies call it in any order and from any thread.
///
/// # Examples
///
/// ```
/// use transform_bench::Operation;
///
/// let op = Operation::FAST;
///
/// assert_eq!(op.name(), "fast");
/// assert_eq!(op.apply(1.5), 2.5);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Operation {
    name: &'static str,
    function: fn(f64) -> f64,
}

impl Operation {
    /// The cheap operation, dominated by per-element dispatch overhead.
    pub const FAST: Self = Self::new("fast", fast);

    /// The expensive operation, with enough floating-point work per element for parallel
    /// speedup to become visible.
    pub const SLOW: Self = Self::new("slow", slow);

    /// Pairs a display name with a pure unary function.
    #[must_use]
    pub const fn new(name: &'static str, function: fn(f64) -> f64) -> Self {
        Self { name, function }
    }

    /// The name used to label this operation in the report.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The underlying function, in a form that can be handed to any strategy.
    #[must_use]
    pub const fn function(&self) -> fn(f64) -> f64 {
        self.function
    }

    /// Applies the operation to a single value.
    #[must_use]
    pub fn apply(&self, x: f64) -> f64 {
        (self.function)(x)
    }
}

/// Returns `x + 1.0`.
#[must_use]
pub fn fast(x: f64) -> f64 {
    x + 1.0
}

/// Returns the sum of `sin(i)` for `i` in `0..SLOW_TERMS`, plus `x`.
///
/// The amount of work is the same for every input.
#[must_use]
pub fn slow(x: f64) -> f64 {
    let mut sum = 0.0;

    for i in 0..SLOW_TERMS {
        // Otherwise the whole sum is loop-invariant and gets hoisted out of the transform.
        sum += f64::from(black_box(i)).sin();
    }

    sum + x
}
