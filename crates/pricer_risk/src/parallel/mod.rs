//! Rayon-based parallelisation helpers.
//!
//! Asset books share no state, so each one can be aggregated on its own
//! worker. Results are collected in input order, which keeps the parallel
//! and sequential risk tables identical.

use rayon::prelude::*;

/// Minimum number of asset books before aggregation goes parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 8;

/// Order-preserving parallel map.
///
/// # Examples
/// ```
/// use pricer_risk::parallel::parallel_map;
///
/// let squares = parallel_map(&[1, 2, 3, 4], |x| x * x);
/// assert_eq!(squares, vec![1, 4, 9, 16]);
/// ```
pub fn parallel_map<T, R, F>(items: &[T], mapper: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    items.par_iter().map(mapper).collect()
}

/// Configuration for parallel execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Minimum items before using parallelism
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ParallelConfig {
    /// Creates a configuration with the given threshold.
    pub fn new(parallel_threshold: usize) -> Self {
        Self { parallel_threshold }
    }

    /// Never parallelise.
    pub fn sequential() -> Self {
        Self {
            parallel_threshold: usize::MAX,
        }
    }

    /// Returns whether to use parallel processing for the given item count.
    #[inline]
    pub fn should_parallelize(&self, n_items: usize) -> bool {
        n_items >= self.parallel_threshold
    }
}
