//! Round resolution: compare the two recorded rolls.
//!
//! A pure function with no randomness and no tie-break: the strictly
//! higher face wins, equal faces are a draw (no reroll).

use serde::{Deserialize, Serialize};

use crate::core::{DiceValue, PlayerId};

/// Outcome of one resolved round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// One player rolled strictly higher.
    Winner(PlayerId),
    /// Equal faces.
    Draw,
}

impl RoundOutcome {
    /// The winning player, or `None` on a draw.
    #[must_use]
    pub fn winner(self) -> Option<PlayerId> {
        match self {
            RoundOutcome::Winner(player) => Some(player),
            RoundOutcome::Draw => None,
        }
    }

    /// Whether the round was drawn.
    #[must_use]
    pub fn is_draw(self) -> bool {
        matches!(self, RoundOutcome::Draw)
    }
}

/// Decide a round from both faces in fixed index order.
///
/// Deterministic and antisymmetric: swapping the arguments names the
/// opposite winner unless the faces are equal.
#[must_use]
pub fn decide(first: DiceValue, second: DiceValue) -> RoundOutcome {
    match first.cmp(&second) {
        std::cmp::Ordering::Greater => RoundOutcome::Winner(PlayerId::FIRST),
        std::cmp::Ordering::Less => RoundOutcome::Winner(PlayerId::SECOND),
        std::cmp::Ordering::Equal => RoundOutcome::Draw,
    }
}
