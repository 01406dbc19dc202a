use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceKind;

/// Single-piece lookahead and hold slot.
///
/// # Next
///
/// Exactly one upcoming piece is always queued. Drawing it with
/// [`Self::pop_next`] immediately draws a replacement, chosen uniformly at
/// random over the catalog.
///
/// # Hold
///
/// The hold slot is empty until the first hold. [`Self::swap_hold`] parks a
/// piece and returns whatever was held before. Limiting holds to one per
/// spawned piece is the session's job.
///
/// # Example
///
/// ```
/// use elemtris_engine::PieceQueue;
///
/// let mut queue = PieceQueue::new();
///
/// let upcoming = queue.peek_next();
/// assert_eq!(queue.pop_next(), upcoming);
/// assert!(queue.held_piece().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct PieceQueue {
    rng: Pcg32,
    next: PieceKind,
    held: Option<PieceKind>,
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Seed for deterministic piece generation.
///
/// A 128-bit seed for the piece generator. The same seed always produces the
/// same sequence of pieces. It is written as a 32-character hex string, both by
/// serde and by [`Display`](fmt::Display) / [`FromStr`].
///
/// # Example
///
/// ```
/// use elemtris_engine::{PieceQueue, PieceSeed};
///
/// let seed: PieceSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
///
/// let mut a = PieceQueue::with_seed(seed);
/// let mut b = PieceQueue::with_seed(seed);
/// for _ in 0..10 {
///     assert_eq!(a.pop_next(), b.pop_next());
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed '{input}': {reason}")]
pub struct ParseSeedError {
    input: String,
    reason: String,
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason: String| ParseSeedError {
            input: s.to_owned(),
            reason,
        };
        if s.len() != 32 {
            return Err(err(format!("expected 32 characters, got {}", s.len())));
        }
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err("contains non-hex characters".to_owned()));
        }
        let num = u128::from_str_radix(s, 16).map_err(|e| err(e.to_string()))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

impl PieceQueue {
    /// Creates a new queue with a random seed.
    ///
    /// For deterministic piece generation, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        let mut rng = Pcg32::from_seed(seed.0);
        let next = rng.random();
        Self {
            rng,
            next,
            held: None,
        }
    }

    /// Returns the piece that the next spawn will use.
    #[must_use]
    pub fn peek_next(&self) -> PieceKind {
        self.next
    }

    /// Takes the queued piece and draws its replacement.
    pub fn pop_next(&mut self) -> PieceKind {
        let replacement = self.rng.random();
        std::mem::replace(&mut self.next, replacement)
    }

    /// Parks `current` in the hold slot and returns the previously held piece, if any.
    pub fn swap_hold(&mut self, current: PieceKind) -> Option<PieceKind> {
        self.held.replace(current)
    }

    /// Returns the currently held piece, if any.
    #[must_use]
    pub fn held_piece(&self) -> Option<PieceKind> {
        self.held
    }

    /// Empties the hold slot and draws a fresh next piece.
    ///
    /// The random stream continues from where it was, so a reset game does
    /// not replay the previous sequence.
    pub fn reset(&mut self) {
        self.held = None;
        self.next = self.rng.random();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_from_bytes(bytes: [u8; 16]) -> PieceSeed {
        PieceSeed(bytes)
    }

    #[test]
    fn test_pop_next_returns_peeked_piece() {
        let mut queue = PieceQueue::with_seed(seed_from_bytes([3; 16]));
        for _ in 0..50 {
            let peeked = queue.peek_next();
            assert_eq!(queue.pop_next(), peeked);
        }
    }

    #[test]
    fn test_swap_hold() {
        let mut queue = PieceQueue::new();
        assert_eq!(queue.swap_hold(PieceKind::T), None);
        assert_eq!(queue.held_piece(), Some(PieceKind::T));
        assert_eq!(queue.swap_hold(PieceKind::I), Some(PieceKind::T));
        assert_eq!(queue.held_piece(), Some(PieceKind::I));
    }

    #[test]
    fn test_reset_clears_hold() {
        let mut queue = PieceQueue::new();
        queue.swap_hold(PieceKind::O);
        queue.reset();
        assert_eq!(queue.held_piece(), None);
    }

    #[test]
    fn test_deterministic_piece_generation() {
        let seed = seed_from_bytes([
            0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66,
            0x77, 0x88,
        ]);

        let mut queue1 = PieceQueue::with_seed(seed);
        let mut queue2 = PieceQueue::with_seed(seed);

        for _ in 0..20 {
            assert_eq!(queue1.pop_next(), queue2.pop_next());
        }
    }

    #[test]
    fn test_all_kinds_eventually_appear() {
        let mut queue = PieceQueue::with_seed(seed_from_bytes([0xAB; 16]));
        let mut seen = [false; PieceKind::LEN];
        for _ in 0..200 {
            seen[queue.pop_next() as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "missing kinds: {seen:?}");
    }

    mod piece_seed_format {
        use super::*;

        #[test]
        fn test_known_value_sequential_bytes() {
            let seed = seed_from_bytes([
                0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
                0x32, 0x10,
            ]);
            let serialized = serde_json::to_string(&seed).unwrap();
            assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");
            assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
        }

        #[test]
        fn test_parse_accepts_uppercase() {
            let seed: PieceSeed = "0123456789ABCDEFFEDCBA9876543210".parse().unwrap();
            assert_eq!(seed.to_bytes()[..2], [0x01, 0x23]);
        }

        #[test]
        fn test_zero_seed_keeps_leading_zeros() {
            let seed = seed_from_bytes([0; 16]);
            assert_eq!(seed.to_string(), "0".repeat(32));
        }

        #[test]
        fn test_error_wrong_length() {
            let err = "0123".parse::<PieceSeed>().unwrap_err();
            assert!(err.to_string().contains("expected 32 characters"));

            let result: Result<PieceSeed, _> = serde_json::from_str("\"\"");
            assert!(result.unwrap_err().to_string().contains("invalid hex"));
        }

        #[test]
        fn test_error_invalid_hex_characters() {
            let json = "\"ghijklmnopqrstuvwxyzghijklmnopqr\"";
            let result: Result<PieceSeed, _> = serde_json::from_str(json);
            assert!(result.unwrap_err().to_string().contains("invalid hex"));
        }

        #[test]
        fn test_serialize_deserialize_preserves_piece_generation() {
            let original: PieceSeed = rand::rng().random();
            let json = serde_json::to_string(&original).unwrap();
            let restored: PieceSeed = serde_json::from_str(&json).unwrap();

            let mut queue1 = PieceQueue::with_seed(original);
            let mut queue2 = PieceQueue::with_seed(restored);
            for _ in 0..20 {
                assert_eq!(queue1.pop_next(), queue2.pop_next());
            }
        }
    }
}
