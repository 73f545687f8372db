//! Injectable randomness seam
//!
//! The feedback gates and template picks are the only nondeterminism in the
//! engines. Both go through this trait so tests can script the draws.

use rand::Rng;

/// Source of the probability gates and uniform template picks
pub trait Randomness {
    /// Single draw against a probability in [0, 1]
    fn chance(&mut self, probability: f64) -> bool;

    /// Uniform index into a non-empty slice of length `len`
    fn pick_index(&mut self, len: usize) -> usize;
}

impl<R: Rng> Randomness for R {
    fn chance(&mut self, probability: f64) -> bool {
        self.gen_bool(probability.clamp(0.0, 1.0))
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_chance_extremes() {
        let mut rng = StdRng::seed_from_u64(42);
        assert!(rng.chance(1.0));
        assert!(!rng.chance(0.0));
    }

    #[test]
    fn test_pick_index_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            assert!(rng.pick_index(5) < 5);
        }
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(a.pick_index(1000), b.pick_index(1000));
        }
    }
}
