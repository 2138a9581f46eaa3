//! Random implementations.

use std::sync::Mutex;

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::infrastructure::ports::RandomPort;

/// System random - uses real randomness.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        gen_range_with(&mut rand::thread_rng(), min, max)
    }

    fn weighted_index(&self, weights: &[u64]) -> usize {
        weighted_index_with(&mut rand::thread_rng(), weights)
    }

    fn sample_indices(&self, len: usize, amount: usize) -> Vec<usize> {
        sample_indices_with(&mut rand::thread_rng(), len, amount)
    }
}

/// Seeded random - the same seed gives the same sequence of draws.
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn with_rng<T>(&self, draw: impl FnOnce(&mut StdRng) -> T) -> T {
        // A poisoned lock still holds a usable generator.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        draw(&mut rng)
    }
}

impl RandomPort for SeededRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        self.with_rng(|rng| gen_range_with(rng, min, max))
    }

    fn weighted_index(&self, weights: &[u64]) -> usize {
        self.with_rng(|rng| weighted_index_with(rng, weights))
    }

    fn sample_indices(&self, len: usize, amount: usize) -> Vec<usize> {
        self.with_rng(|rng| sample_indices_with(rng, len, amount))
    }
}

fn gen_range_with<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..=max)
}

fn weighted_index_with<R: Rng + ?Sized>(rng: &mut R, weights: &[u64]) -> usize {
    if weights.is_empty() {
        return 0;
    }
    match WeightedIndex::new(weights) {
        Ok(distribution) => distribution.sample(rng),
        // All weights zero: every entry is equally likely
        Err(_) => rng.gen_range(0..weights.len()),
    }
}

fn sample_indices_with<R: Rng + ?Sized>(rng: &mut R, len: usize, amount: usize) -> Vec<usize> {
    rand::seq::index::sample(rng, len, amount.min(len)).into_vec()
}

/// Fixed random for testing: `gen_range` always returns the clamped value,
/// weighted and sampled draws take the first entries.
#[cfg(test)]
pub struct FixedRandom(pub i32);

#[cfg(test)]
impl RandomPort for FixedRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        self.0.clamp(min, max.max(min))
    }

    fn weighted_index(&self, _weights: &[u64]) -> usize {
        0
    }

    fn sample_indices(&self, len: usize, amount: usize) -> Vec<usize> {
        (0..amount.min(len)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gen_range_is_inclusive() {
        let random = SeededRandom::new(7);
        let draws: Vec<i32> = (0..500).map(|_| random.gen_range(1, 3)).collect();
        assert!(draws.iter().all(|d| (1..=3).contains(d)));
        assert!(draws.contains(&1));
        assert!(draws.contains(&3));
    }

    #[test]
    fn test_gen_range_degenerate_range() {
        let random = SystemRandom::new();
        assert_eq!(random.gen_range(5, 5), 5);
        assert_eq!(random.gen_range(5, 2), 5);
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let a = SeededRandom::new(1925);
        let b = SeededRandom::new(1925);
        let draws_a: Vec<i32> = (0..20).map(|_| a.gen_range(0, 100)).collect();
        let draws_b: Vec<i32> = (0..20).map(|_| b.gen_range(0, 100)).collect();
        assert_eq!(draws_a, draws_b);
    }

    #[test]
    fn test_weighted_index_skips_zero_weights() {
        let random = SeededRandom::new(3);
        for _ in 0..200 {
            assert_eq!(random.weighted_index(&[0, 0, 5, 0]), 2);
        }
    }

    #[test]
    fn test_weighted_index_all_zero_is_uniform() {
        let random = SeededRandom::new(11);
        let draws: Vec<usize> = (0..200).map(|_| random.weighted_index(&[0, 0, 0])).collect();
        assert!(draws.iter().all(|d| *d < 3));
        assert!(draws.contains(&0) && draws.contains(&2));
        assert_eq!(random.weighted_index(&[]), 0);
    }

    #[test]
    fn test_sample_indices_are_distinct() {
        let random = SeededRandom::new(5);
        let mut sample = random.sample_indices(6, 4);
        assert_eq!(sample.len(), 4);
        sample.sort_unstable();
        sample.dedup();
        assert_eq!(sample.len(), 4);
        assert!(sample.iter().all(|i| *i < 6));
        assert_eq!(random.sample_indices(2, 5).len(), 2);
    }
}
