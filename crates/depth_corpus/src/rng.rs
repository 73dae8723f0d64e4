//! Thread-local randomness for the augmentation pipeline.
//!
//! Randomized transforms draw through these helpers instead of holding their
//! own generators. By default the draws come from `rand::rng()`; tests (or
//! any caller wanting reproducible augmentation content) can install a
//! seeded generator for the current thread with [`init_pipeline_rng`].

use rand::rngs::StdRng;
use rand::Rng as _;
use rand::SeedableRng;
use std::cell::RefCell;

thread_local! {
    /// Seeded pipeline RNG for the current thread, if one was installed.
    pub static PIPELINE_RNG: RefCell<Option<StdRng>> = const { RefCell::new(None) };
}

/// Installs a deterministic RNG for the current thread's pipeline draws.
pub fn init_pipeline_rng(seed: u64) {
    PIPELINE_RNG.with(|rng| {
        *rng.borrow_mut() = Some(StdRng::seed_from_u64(seed));
    })
}

/// Draws a bool that is `true` with probability `p`.
pub fn draw_bool(p: f64) -> bool {
    PIPELINE_RNG.with(|rng| {
        let mut rng_ref = rng.borrow_mut();
        match rng_ref.as_mut() {
            Some(rng) => rng.random_bool(p),
            None => rand::rng().random_bool(p),
        }
    })
}

/// Draws a uniform value in `[lo, hi)`.
pub fn draw_uniform(lo: f64, hi: f64) -> f64 {
    PIPELINE_RNG.with(|rng| {
        let mut rng_ref = rng.borrow_mut();
        match rng_ref.as_mut() {
            Some(rng) => rng.random_range(lo..hi),
            None => rand::rng().random_range(lo..hi),
        }
    })
}

/// Draws a uniform index in `[0, n)`. `n` must be positive.
pub fn draw_index(n: usize) -> usize {
    PIPELINE_RNG.with(|rng| {
        let mut rng_ref = rng.borrow_mut();
        match rng_ref.as_mut() {
            Some(rng) => rng.random_range(0..n),
            None => rand::rng().random_range(0..n),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_draws_are_reproducible() {
        init_pipeline_rng(7);
        let first: Vec<usize> = (0..16).map(|_| draw_index(100)).collect();
        init_pipeline_rng(7);
        let second: Vec<usize> = (0..16).map(|_| draw_index(100)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_draw_bool_extremes() {
        init_pipeline_rng(0);
        assert!((0..100).all(|_| draw_bool(1.0)));
        assert!((0..100).all(|_| !draw_bool(0.0)));
    }
}
