//! Testability port for injecting randomness.

// =============================================================================
// Testability Ports
// =============================================================================

/// Source of every random draw made during generation.
#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// Uniform integer in `min..=max`. Returns `min` when `max <= min`.
    fn gen_range(&self, min: i32, max: i32) -> i32;

    /// Index drawn with probability proportional to `weights[i]`.
    ///
    /// Falls back to a uniform draw when every weight is zero; returns 0 for
    /// an empty slice.
    fn weighted_index(&self, weights: &[u64]) -> usize;

    /// `amount` distinct indices from `0..len`, in random order.
    /// `amount` is capped at `len`.
    fn sample_indices(&self, len: usize, amount: usize) -> Vec<usize>;
}
