//! # Seeded Sequences
//!
//! Deterministic float streams for chunk content.
//!
//! ## Determinism Guarantee
//!
//! Given the same seed, a `SeededSequence` produces **bit-identical** values
//! on any platform, any time. The recurrence is integer-only; the float is
//! formed by a single division at the end.
//!
//! ## Chunk Seeds
//!
//! A chunk's base seed is `cx * 10000 + cy`. This combine is weak: once
//! `|cy|` reaches 10000, distinct coordinates can share a seed and therefore
//! share content. Worlds are far smaller than that, and the mapping is kept
//! as-is so generated content stays stable across releases.

use serde::{Deserialize, Serialize};

/// Base seed of one chunk.
///
/// Each content category draws from its own stream derived by a fixed
/// offset, so consuming more values for one category never shifts another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkSeed(i64);

impl ChunkSeed {
    /// Multiplier applied to the X coordinate when combining.
    pub const X_STRIDE: i64 = 10_000;

    /// Offset of the tree stream.
    pub const TREES: i64 = 0;
    /// Offset of the bush stream.
    pub const BUSHES: i64 = 1;
    /// Offset of the flower stream.
    pub const FLOWERS: i64 = 2;

    /// Creates a seed from a raw value.
    #[inline]
    #[must_use]
    pub const fn new(seed: i64) -> Self {
        Self(seed)
    }

    /// Combines a chunk coordinate into its seed.
    #[inline]
    #[must_use]
    pub const fn from_coord(cx: i32, cy: i32) -> Self {
        Self(cx as i64 * Self::X_STRIDE + cy as i64)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Opens the stream for one content category.
    #[inline]
    #[must_use]
    pub const fn stream(self, offset: i64) -> SeededSequence {
        SeededSequence::new(self.0.wrapping_add(offset))
    }
}

/// Linear-congruential float stream in `[0, 1)`.
///
/// `state <- (state * 9301 + 49297) mod 233280`, output `state / 233280`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeededSequence {
    seed: i64,
    state: i64,
}

impl SeededSequence {
    /// Recurrence multiplier.
    pub const MULTIPLIER: i64 = 9301;
    /// Recurrence increment.
    pub const INCREMENT: i64 = 49297;
    /// Recurrence modulus.
    pub const MODULUS: i64 = 233_280;

    /// Creates a sequence starting from `seed`.
    ///
    /// Negative seeds are reduced with a Euclidean remainder, so every
    /// output still lands in `[0, 1)`.
    #[inline]
    #[must_use]
    pub const fn new(seed: i64) -> Self {
        Self {
            seed,
            state: seed.rem_euclid(Self::MODULUS),
        }
    }

    /// Returns the seed this sequence was created from.
    #[inline]
    #[must_use]
    pub const fn seed(&self) -> i64 {
        self.seed
    }

    /// Rewinds to the first value.
    #[inline]
    pub fn restart(&mut self) {
        self.state = self.seed.rem_euclid(Self::MODULUS);
    }

    /// Next value in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        // state < MODULUS, so the product stays far below i64::MAX
        self.state = (self.state * Self::MULTIPLIER + Self::INCREMENT).rem_euclid(Self::MODULUS);
        self.state as f64 / Self::MODULUS as f64
    }

    /// Next value in `[min, max)`.
    #[inline]
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Next index in `[0, len)`. Returns 0 when `len` is 0.
    #[inline]
    pub fn next_index(&mut self, len: usize) -> usize {
        let index = (self.next_f64() * len as f64).floor() as usize;
        index.min(len.saturating_sub(1))
    }
}

impl Iterator for SeededSequence {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let a: Vec<f64> = SeededSequence::new(42).take(1000).collect();
        let b: Vec<f64> = SeededSequence::new(42).take(1000).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let a: Vec<f64> = SeededSequence::new(42).take(16).collect();
        let b: Vec<f64> = SeededSequence::new(43).take(16).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_known_first_value() {
        // (1 * 9301 + 49297) mod 233280 = 58598
        let mut seq = SeededSequence::new(1);
        let value = seq.next_f64();
        assert!((value - 58_598.0 / 233_280.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_values_in_unit_range() {
        for seed in [-1_000_000_i64, -7, 0, 1, 55_555, 90_009_999] {
            for value in SeededSequence::new(seed).take(5000) {
                assert!((0.0..1.0).contains(&value), "seed {seed} produced {value}");
            }
        }
    }

    #[test]
    fn test_restart() {
        let mut seq = SeededSequence::new(1234);
        let first: Vec<f64> = (&mut seq).take(10).collect();
        seq.restart();
        let again: Vec<f64> = seq.take(10).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn test_next_index_bounds() {
        let mut seq = SeededSequence::new(99);
        for _ in 0..1000 {
            assert!(seq.next_index(3) < 3);
        }
        assert_eq!(seq.next_index(0), 0);
    }

    #[test]
    fn test_chunk_seed_combine() {
        assert_eq!(ChunkSeed::from_coord(5, 5).value(), 50_005);
        assert_eq!(ChunkSeed::from_coord(0, 0).value(), 0);
        assert_eq!(ChunkSeed::from_coord(-1, 3).value(), -9_997);
    }

    #[test]
    fn test_chunk_seed_aliasing_is_preserved() {
        // cy at the stride aliases onto the next column
        assert_eq!(ChunkSeed::from_coord(0, 10_000), ChunkSeed::from_coord(1, 0));
    }

    #[test]
    fn test_category_streams_are_offset() {
        let seed = ChunkSeed::from_coord(3, 4);
        assert_eq!(seed.stream(ChunkSeed::BUSHES).seed(), seed.value() + 1);
        assert_eq!(seed.stream(ChunkSeed::FLOWERS).seed(), seed.value() + 2);
    }
}
