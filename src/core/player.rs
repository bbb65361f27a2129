//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe player identifier for the fixed two-player duel.
//! Index identity (0 or 1) never changes for the lifetime of a game.
//!
//! ## PlayerPair
//!
//! Two-slot per-player storage indexed by `PlayerId`. This is the only
//! per-player container in the crate; there are no hidden `Vec`s that
//! could grow a third player.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// A duel always has exactly two players.
pub const PLAYER_COUNT: usize = 2;

/// Player identifier for a two-player duel.
///
/// Player indices are 0-based: the first player is `PlayerId::FIRST`.
/// The index is always 0 or 1; both `new` and serde deserialization
/// reject anything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerId(u8);

impl PlayerId {
    /// The player in slot 0.
    pub const FIRST: PlayerId = PlayerId(0);

    /// The player in slot 1 (the computer in player-vs-computer games).
    pub const SECOND: PlayerId = PlayerId(1);

    /// Create a player ID from a raw index.
    ///
    /// Returns `None` for any index outside the duel's two slots.
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if index < PLAYER_COUNT as u8 {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Iterate over both player IDs in index order.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        [Self::FIRST, Self::SECOND].into_iter()
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = String;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::new(index).ok_or_else(|| format!("player index out of range: {index}"))
    }
}

impl From<PlayerId> for u8 {
    fn from(player: PlayerId) -> Self {
        player.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// One participant in a duel.
///
/// `score` accumulates every committed roll value across the whole game;
/// `round_wins` increments by one per round won (ties increment neither).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Stable identifier ("player1"/"player2" by convention).
    pub id: String,

    /// Display name. The second slot becomes "Computer" in PvC games.
    pub name: String,

    /// Whether this slot is computer-controlled.
    pub is_computer: bool,

    /// Cumulative sum of all committed roll values this game.
    pub score: u32,

    /// Rounds won this game.
    pub round_wins: u32,
}

impl Player {
    /// Create a player with zeroed game stats.
    pub fn new(id: impl Into<String>, name: impl Into<String>, is_computer: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_computer,
            score: 0,
            round_wins: 0,
        }
    }

    /// Zero the per-game counters, keeping identity.
    pub fn reset_game_stats(&mut self) {
        self.score = 0;
        self.round_wins = 0;
    }
}

/// Per-player data storage for the fixed two-player case.
///
/// ## Example
///
/// ```
/// use dice_duel::core::{PlayerId, PlayerPair};
///
/// let mut wins: PlayerPair<u32> = PlayerPair::with_value(0);
/// wins[PlayerId::FIRST] += 1;
///
/// assert_eq!(wins[PlayerId::FIRST], 1);
/// assert_eq!(wins[PlayerId::SECOND], 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPair<T> {
    data: [T; PLAYER_COUNT],
}

impl<T> PlayerPair<T> {
    /// Create a pair from both slots in index order.
    #[must_use]
    pub fn new(first: T, second: T) -> Self {
        Self {
            data: [first, second],
        }
    }

    /// Create a pair with values from a factory function.
    pub fn from_fn(factory: impl Fn(PlayerId) -> T) -> Self {
        Self::new(factory(PlayerId::FIRST), factory(PlayerId::SECOND))
    }

    /// Create a pair with both slots set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::from_fn(|_| value.clone())
    }

    /// Create a pair with default values.
    #[must_use]
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(T::default(), T::default())
    }

    /// Get a reference to a player's slot.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's slot.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Both slots in index order.
    #[must_use]
    pub fn as_tuple(&self) -> (&T, &T) {
        (&self.data[0], &self.data[1])
    }

    /// Iterate over `(PlayerId, &T)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::all().zip(self.data.iter())
    }

    /// Iterate over `(PlayerId, &mut T)` pairs in index order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        PlayerId::all().zip(self.data.iter_mut())
    }

    /// Map both slots to a new pair.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> PlayerPair<U> {
        PlayerPair::new(f(&self.data[0]), f(&self.data[1]))
    }
}

impl<T> Index<PlayerId> for PlayerPair<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerPair<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
