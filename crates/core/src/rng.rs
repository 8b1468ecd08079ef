//! RNG module - seedable random source for population and refill
//!
//! Nothing in the core reaches for global randomness. Every operation that
//! needs random cookies takes a generator implementing [`rand::RngCore`], so a
//! test can replay an exact board from a seed.
//!
//! [`SimpleRng`] is the default source: a small LCG whose sequence is stable
//! across `rand` releases. Any other `rand` generator works as well.

use rand::{Rng, RngCore, SeedableRng};

use crate::types::CookieKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Current internal state (feeding it back to [`SimpleRng::new`] resumes the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }

    fn step(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RngCore for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = u64::from(self.step());
        let lo = u64::from(self.step());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for SimpleRng {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

/// Draw one of the first `kind_count` cookie kinds uniformly.
pub fn random_kind<R: RngCore + ?Sized>(rng: &mut R, kind_count: u8) -> CookieKind {
    let count = usize::from(kind_count).clamp(1, CookieKind::ALL.len());
    CookieKind::ALL[rng.random_range(0..count)]
}

/// Draw kinds until one is not rejected by `reject`.
///
/// Callers must leave at least one kind acceptable, or this never returns.
pub fn random_kind_where<R, F>(rng: &mut R, kind_count: u8, mut reject: F) -> CookieKind
where
    R: RngCore + ?Sized,
    F: FnMut(CookieKind) -> bool,
{
    loop {
        let kind = random_kind(rng, kind_count);
        if !reject(kind) {
            return kind;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_remapped() {
        let mut zero = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);
        assert_eq!(zero.next_u32(), one.next_u32());
    }

    #[test]
    fn test_from_seed_matches_new() {
        let mut a = SimpleRng::from_seed(7u32.to_le_bytes());
        let mut b = SimpleRng::new(7);
        assert_eq!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn test_fill_bytes_handles_partial_chunks() {
        let mut rng = SimpleRng::new(3);
        let mut buf = [0u8; 7];
        rng.fill_bytes(&mut buf);
        assert!(buf.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_random_kind_respects_kind_count() {
        let mut rng = SimpleRng::new(99);
        for _ in 0..500 {
            let kind = random_kind(&mut rng, 3);
            assert!(kind.index() < 3, "drew {:?}", kind);
        }
    }

    #[test]
    fn test_random_kind_covers_all_kinds() {
        let mut rng = SimpleRng::new(2024);
        let mut seen = [false; 6];
        for _ in 0..1000 {
            seen[random_kind(&mut rng, 6).index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_random_kind_where_skips_rejected() {
        let mut rng = SimpleRng::new(5);
        for _ in 0..200 {
            let kind = random_kind_where(&mut rng, 3, |k| k == CookieKind::Croissant);
            assert_ne!(kind, CookieKind::Croissant);
        }
    }
}
