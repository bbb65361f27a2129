//! Die faces, recorded rolls, and the random roller.
//!
//! ## DiceValue
//!
//! A die face in `1..=6`, enforced at construction and on deserialization.
//!
//! ## DiceRng
//!
//! Deterministic roller in the spirit of a seeded game RNG:
//! - Same seed produces an identical roll sequence
//! - O(1) state capture and restore for session snapshots
//!
//! Uniformity over the six faces is all the game needs; the roller is not
//! required to be cryptographically secure.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::player::PlayerId;

/// A die face.
///
/// The inner value is always in `1..=6`; both `new` and serde deserialization
/// reject anything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DiceValue(u8);

impl DiceValue {
    /// The lowest face.
    pub const MIN: DiceValue = DiceValue(1);

    /// The highest face.
    pub const MAX: DiceValue = DiceValue(6);

    /// Create a die face, rejecting values outside `1..=6`.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= 6 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Get the raw face value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Iterate over all six faces in order.
    pub fn all() -> impl Iterator<Item = DiceValue> {
        (1..=6).map(DiceValue)
    }
}

impl TryFrom<u8> for DiceValue {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("die face out of range: {value}"))
    }
}

impl From<DiceValue> for u8 {
    fn from(value: DiceValue) -> Self {
        value.0
    }
}

impl std::fmt::Display for DiceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A committed die roll. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    /// Who rolled.
    pub player: PlayerId,

    /// The face that came up.
    pub value: DiceValue,

    /// When the roll was committed.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl DiceRoll {
    /// Record a roll committed now.
    #[must_use]
    pub fn new(player: PlayerId, value: DiceValue) -> Self {
        Self::at(player, value, OffsetDateTime::now_utc())
    }

    /// Record a roll with an explicit timestamp.
    #[must_use]
    pub fn at(player: PlayerId, value: DiceValue, timestamp: OffsetDateTime) -> Self {
        Self {
            player,
            value,
            timestamp,
        }
    }
}

/// Deterministic die roller.
///
/// Uses ChaCha8 for speed with high-quality randomness. Seedable for
/// reproducible games and tests, entropy-seeded for interactive play.
#[derive(Clone, Debug)]
pub struct DiceRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl DiceRng {
    /// Create a roller with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a roller seeded from the OS entropy source.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Roll the die: uniform over the six faces, independent across calls.
    pub fn roll(&mut self) -> DiceValue {
        DiceValue(self.inner.gen_range(1..=6))
    }

    /// Capture the roller state for a session snapshot.
    #[must_use]
    pub fn state(&self) -> DiceRngState {
        DiceRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore a roller from a captured state.
    #[must_use]
    pub fn from_state(state: &DiceRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable roller state.
///
/// Uses the ChaCha8 word position for O(1) capture regardless of how many
/// rolls have been made.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRngState {
    /// Original seed.
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter).
    pub word_pos: u128,
}
