//! Final game results and the bounded recent-games history.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use time::OffsetDateTime;

use super::config::DEFAULT_HISTORY_CAPACITY;
use super::player::Player;

/// The outcome of one completed game. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// Snapshot of the winning player, or `None` on a draw.
    pub winner: Option<Player>,

    /// Rounds actually completed (not the configured maximum).
    pub total_rounds: u32,

    /// Cumulative scores in fixed index order.
    pub final_scores: (u32, u32),

    /// When the game ended.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,

    /// True iff `winner` is absent: both players finished with equal
    /// round wins.
    pub is_draw: bool,
}

/// Bounded list of recent game results, most recent first.
///
/// The capacity is configuration, not a constant baked into the logic;
/// tests use small caps.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameHistory {
    capacity: usize,
    entries: VecDeque<GameResult>,
}

impl Default for GameHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl GameHistory {
    /// Create an empty history with the given capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Record a result at the front, dropping the oldest beyond capacity.
    pub fn record(&mut self, result: GameResult) {
        self.entries.push_front(result);
        self.entries.truncate(self.capacity);
    }

    /// Number of retained results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether any results are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The configured capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The most recent result, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&GameResult> {
        self.entries.front()
    }

    /// Iterate most-recent-first.
    pub fn iter(&self) -> impl Iterator<Item = &GameResult> {
        self.entries.iter()
    }
}
