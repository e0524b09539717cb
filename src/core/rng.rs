//! Deterministic random number generation with per-purpose streams.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sessions
//! - **Context streams**: Independent sequences for word choice, tile layout
//!   and opponent pacing, so drawing more letters never changes which word comes next
//! - **Entropy seeding**: Unseeded play for normal sessions
//!
//! ```
//! use rice_tiles::core::GameRng;
//!
//! let rng = GameRng::new(42);
//! let mut words = rng.for_context("words");
//! let mut tiles = rng.for_context("tiles");
//!
//! // Streams are independent of each other...
//! let _ = tiles.gen_range_usize(0..26);
//!
//! // ...and reproducible from the same seed.
//! let mut again = GameRng::new(42).for_context("words");
//! assert_eq!(words.gen_range_usize(0..1000), again.gen_range_usize(0..1000));
//! ```

use std::hash::{Hash, Hasher};
use std::ops::{Range, RangeInclusive};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG for session randomness.
///
/// Uses ChaCha8 for speed while keeping high quality output.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random::<u64>())
    }

    /// The seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Generate a random float in the given inclusive range.
    ///
    /// A degenerate range (`a..=a`) returns `a`, as does a range whose
    /// width is not finite.
    pub fn gen_range_f32(&mut self, range: RangeInclusive<f32>) -> f32 {
        let (low, high) = range.into_inner();
        if high <= low || !(high - low).is_finite() {
            return low;
        }
        self.inner.gen_range(low..=high)
    }

    /// Uniform uppercase ASCII letter.
    pub fn gen_letter(&mut self) -> char {
        char::from(b'A' + self.inner.gen_range(0..26u8))
    }

    /// Shuffle a slice in place (Fisher-Yates).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters(rng: &mut GameRng, n: usize) -> String {
        (0..n).map(|_| rng.gen_letter()).collect()
    }

    #[test]
    fn test_same_seed_same_letters() {
        let mut a = GameRng::new(42);
        let mut b = GameRng::new(42);
        assert_eq!(letters(&mut a, 64), letters(&mut b, 64));
        assert_eq!(a.seed(), 42);
    }

    #[test]
    fn test_seeds_diverge() {
        let mut a = GameRng::new(1);
        let mut b = GameRng::new(2);
        assert_ne!(letters(&mut a, 16), letters(&mut b, 16));
    }

    #[test]
    fn test_context_streams_independent() {
        let rng = GameRng::new(42);
        let mut words = rng.for_context("words");
        let mut tiles = rng.for_context("tiles");
        assert_ne!(letters(&mut words, 16), letters(&mut tiles, 16));

        // Drawing from one stream leaves the other untouched
        let mut fresh_words = GameRng::new(42).for_context("words");
        let _ = letters(&mut tiles, 100);
        assert_eq!(letters(&mut words, 8), {
            let _ = letters(&mut fresh_words, 16);
            letters(&mut fresh_words, 8)
        });
    }

    #[test]
    fn test_gen_range_f32_bounds() {
        let mut rng = GameRng::new(7);
        for _ in 0..1000 {
            let v = rng.gen_range_f32(3.0..=4.5);
            assert!((3.0..=4.5).contains(&v), "{v} out of range");
        }
        assert_eq!(rng.gen_range_f32(2.0..=2.0), 2.0);
        assert_eq!(rng.gen_range_f32(5.0..=1.0), 5.0);
    }

    #[test]
    fn test_gen_range_f32_unbounded_width() {
        let mut rng = GameRng::new(8);
        assert_eq!(rng.gen_range_f32(-3e38..=3e38), -3e38);
        assert_eq!(rng.gen_range_f32(0.0..=f32::INFINITY), 0.0);
        assert!(rng.gen_range_f32(f32::NAN..=1.0).is_nan());
    }

    #[test]
    fn test_gen_letter_covers_alphabet() {
        let mut rng = GameRng::new(9);
        let seen: std::collections::BTreeSet<char> = (0..2000).map(|_| rng.gen_letter()).collect();
        assert_eq!(seen.len(), 26);
        assert!(seen.iter().all(char::is_ascii_uppercase));
    }

    #[test]
    fn test_shuffle_keeps_letters() {
        let mut rng = GameRng::new(3);
        let mut tiles: Vec<char> = "RICEABCDWXYZ".chars().collect();
        rng.shuffle(&mut tiles);

        let mut sorted = tiles.clone();
        sorted.sort_unstable();
        let mut expected: Vec<char> = "RICEABCDWXYZ".chars().collect();
        expected.sort_unstable();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn test_choose_name() {
        let mut rng = GameRng::new(5);
        let names = ["Amir", "Siti", "Hana"];
        assert!(names.contains(rng.choose(&names).unwrap()));

        let none: [&str; 0] = [];
        assert!(rng.choose(&none).is_none());
    }
}
