//! Seeded RNG stream (C2). Only rank 0 ever touches this; determinism
//! across ranks comes from broadcasting outcomes, not from synchronized
//! seeds (`spec.md` §4.2, §9 "Global mutable RNG").
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct RngStream {
    inner: StdRng,
}

impl RngStream {
    /// Seeds from OS entropy, once, at process start.
    pub fn from_entropy() -> RngStream {
        RngStream {
            inner: StdRng::from_entropy(),
        }
    }

    /// Deterministic constructor for tests and reproducibility scenarios
    /// (`spec.md` §8, scenario 5).
    pub fn from_seed(seed: u64) -> RngStream {
        RngStream {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    pub fn next_int(&mut self) -> i32 {
        self.inner.gen()
    }

    pub fn next_bool(&mut self) -> bool {
        self.inner.gen()
    }

    /// Uniform real in [0, 1).
    pub fn next_prob(&mut self) -> f64 {
        self.inner.gen_range(0.0..1.0)
    }

    /// Uniform integer in `[0, bound)`. Not part of the minimal C2
    /// surface in `spec.md`, but needed by C5's rejection-sampling loop;
    /// draws from the same underlying stream as the other methods.
    pub fn next_below(&mut self, bound: usize) -> usize {
        self.inner.gen_range(0..bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reproducible_with_fixed_seed() {
        let mut a = RngStream::from_seed(42);
        let mut b = RngStream::from_seed(42);
        for _ in 0..16 {
            assert_eq!(a.next_int(), b.next_int());
        }
    }

    #[test]
    fn next_below_stays_in_range() {
        let mut rng = RngStream::from_seed(7);
        for _ in 0..1000 {
            let x = rng.next_below(5);
            assert!(x < 5);
        }
    }
}
