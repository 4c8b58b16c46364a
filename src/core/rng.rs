//! Random number generation.
//!
//! Two generators with different jobs:
//!
//! - **`SeededRng`**: string-seeded 32-bit generator used for everything that
//!   affects fairness (deck order, seeded die rolls). A seed string is hashed
//!   to 32 bits and drives a small-state generator, so the same seed always
//!   yields the same deck on every platform.
//! - **`GameRng`**: ChaCha8 stream for host-side cosmetic choices (who gives
//!   the first clue, party card previews, fresh deck seeds). The rules never
//!   consume it.
//!
//! ```
//! use voice_charades::core::shuffle;
//!
//! let items = vec!["a", "b", "c", "d"];
//! let once = shuffle(&items, "seed-1");
//! let twice = shuffle(&items, "seed-1");
//! assert_eq!(once, twice);
//! ```

use rand::{Error, Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::cards::DieFace;

/// Hash a seed string to a 32-bit generator state.
///
/// Mixes UTF-16 code units, so a seed hashes the same in any host that
/// stores strings as UTF-16 and shares saved games with this engine.
#[must_use]
pub fn seed_hash(seed: &str) -> u32 {
    let len = seed.encode_utf16().count() as u32;
    let mut h: u32 = 1_779_033_703 ^ len;
    for unit in seed.encode_utf16() {
        h = (h ^ u32::from(unit)).wrapping_mul(3_432_918_353);
        h = h.rotate_left(13);
    }

    h = (h ^ (h >> 16)).wrapping_mul(2_246_822_507);
    h = (h ^ (h >> 13)).wrapping_mul(3_266_489_909);
    h ^ (h >> 16)
}

/// Deterministic 32-bit generator seeded from a string.
///
/// Period is 2^32. Implements `RngCore`, so the `rand::Rng` extension
/// methods are available on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    /// Create a generator from a raw 32-bit state.
    #[must_use]
    pub const fn from_state(state: u32) -> Self {
        Self { state }
    }

    /// Create a generator from a seed string.
    #[must_use]
    pub fn from_seed_str(seed: &str) -> Self {
        Self::from_state(seed_hash(seed))
    }

    /// Uniform value in `[0, 1)` with 32 bits of resolution.
    pub fn next_unit(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Uniform index in `[0, bound)`. `bound` must be non-zero.
    pub fn next_index(&mut self, bound: usize) -> usize {
        (self.next_unit() * bound as f64).floor() as usize
    }
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    fn next_u64(&mut self) -> u64 {
        let lo = u64::from(self.next_u32());
        let hi = u64::from(self.next_u32());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Shuffle a copy of `items` with a Fisher-Yates pass driven by `seed`.
///
/// Pure: the same seed and input order always produce the same output.
#[must_use]
pub fn shuffle<T: Clone>(items: &[T], seed: &str) -> Vec<T> {
    let mut rng = SeededRng::from_seed_str(seed);
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.next_index(i + 1);
        out.swap(i, j);
    }
    out
}

/// Roll the six-sided category die from a seed.
#[must_use]
pub fn roll_die(seed: &str) -> DieFace {
    let mut rng = SeededRng::from_seed_str(seed);
    DieFace::ALL[rng.next_index(DieFace::ALL.len())]
}

/// ChaCha8 stream for host-side, non-gameplay randomness.
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

    /// Seed from the operating system's entropy source.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        Self::new(self.seed ^ u64::from(seed_hash(context)).rotate_left(17))
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Roll the die without a seed string.
    pub fn roll_die(&mut self) -> DieFace {
        DieFace::ALL[self.gen_range_usize(0..DieFace::ALL.len())]
    }

    /// Fresh deck seed string, unique enough for casual play.
    pub fn deck_seed(&mut self, millis: u64) -> String {
        let suffix: u32 = self.inner.gen_range(0..0x0100_0000);
        format!("{millis}-{suffix:06x}")
    }
}
