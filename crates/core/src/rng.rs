//! RNG module - injectable deterministic random source
//!
//! The session owns one seeded RNG used for initial generation and refill,
//! so the same seed replays the same game. No global RNG anywhere.

use match3_types::TileKind;

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

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Draw a uniformly random tile kind in [1, kind_count]
    pub fn next_kind(&mut self, kind_count: u8) -> TileKind {
        (self.next_range(kind_count as u32) + 1) as TileKind
    }

    /// Current internal state (for restarting a game with the same sequence)
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
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

        let v1 = rng1.next_u32();
        let v2 = rng2.next_u32();
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_zero_seed_is_remapped() {
        let mut rng = SimpleRng::new(0);
        // Must not get stuck producing zeros
        assert_ne!(rng.next_u32(), 0u32.wrapping_mul(1664525));
    }

    #[test]
    fn test_next_kind_in_range() {
        let mut rng = SimpleRng::new(7);
        for kind_count in 3u8..=8 {
            for _ in 0..200 {
                let kind = rng.next_kind(kind_count);
                assert!(kind >= 1 && kind <= kind_count);
            }
        }
    }

    #[test]
    fn test_next_kind_covers_all_kinds() {
        let mut rng = SimpleRng::new(99);
        let mut seen = [false; 5];
        for _ in 0..500 {
            seen[rng.next_kind(4) as usize] = true;
        }
        assert!(seen[1] && seen[2] && seen[3] && seen[4]);
    }
}
