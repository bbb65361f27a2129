//! Game mode and engine configuration.
//!
//! The engine hardcodes nothing tunable: the history cap, default round
//! count, player naming, and roll reveal delays all live here. Defaults
//! match the shipped product; tests shrink them freely.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default number of rounds per game.
pub const DEFAULT_MAX_ROUNDS: u32 = 5;

/// Default capacity of the recent-games history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 5;

/// Reveal delay for a locally computed roll (animation window).
pub const LOCAL_ROLL_DELAY: Duration = Duration::from_millis(1500);

/// Reveal delay when the roll value comes from the remote authority.
pub const REMOTE_ROLL_DELAY: Duration = Duration::from_millis(500);

/// Who is playing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Two humans.
    Pvp,
    /// Human versus computer-controlled second slot.
    Pvc,
}

impl GameMode {
    /// Whether the second slot is computer-controlled.
    #[must_use]
    pub const fn is_versus_computer(self) -> bool {
        matches!(self, GameMode::Pvc)
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameMode::Pvp => write!(f, "pvp"),
            GameMode::Pvc => write!(f, "pvc"),
        }
    }
}

impl std::str::FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pvp" => Ok(GameMode::Pvp),
            "pvc" => Ok(GameMode::Pvc),
            other => Err(format!("unknown game mode: {other}")),
        }
    }
}

/// Engine configuration.
///
/// ## Example
///
/// ```
/// use dice_duel::core::GameConfig;
///
/// let config = GameConfig::new().with_history_capacity(2);
/// assert_eq!(config.history_capacity, 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// How many finished games the recent-history list retains.
    pub history_capacity: usize,

    /// Sleep inserted before committing a locally rolled value.
    /// `None` (the default) commits immediately; presentation layers that
    /// want the original reveal animation set [`LOCAL_ROLL_DELAY`].
    pub roll_delay: Option<Duration>,

    /// Sleep inserted before applying a remotely rolled value.
    pub remote_roll_delay: Option<Duration>,

    /// Display name for the first slot.
    pub first_player_name: String,

    /// Display name for the second slot in PvP games.
    pub second_player_name: String,

    /// Display name for the second slot in PvC games.
    pub computer_name: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            roll_delay: None,
            remote_roll_delay: None,
            first_player_name: "Player 1".to_string(),
            second_player_name: "Player 2".to_string(),
            computer_name: "Computer".to_string(),
        }
    }
}

impl GameConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the recent-history capacity.
    #[must_use]
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Set the local roll reveal delay.
    #[must_use]
    pub fn with_roll_delay(mut self, delay: Duration) -> Self {
        self.roll_delay = Some(delay);
        self
    }

    /// Set the remote roll reveal delay.
    #[must_use]
    pub fn with_remote_roll_delay(mut self, delay: Duration) -> Self {
        self.remote_roll_delay = Some(delay);
        self
    }

    /// Enable the original product's reveal delays (1.5s local, 0.5s remote).
    #[must_use]
    pub fn with_animated_reveals(self) -> Self {
        self.with_roll_delay(LOCAL_ROLL_DELAY)
            .with_remote_roll_delay(REMOTE_ROLL_DELAY)
    }

    /// Set custom player names.
    #[must_use]
    pub fn with_player_names(
        mut self,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        self.first_player_name = first.into();
        self.second_player_name = second.into();
        self
    }

    /// Display name for the second slot under the given mode.
    #[must_use]
    pub fn second_slot_name(&self, mode: GameMode) -> &str {
        if mode.is_versus_computer() {
            &self.computer_name
        } else {
            &self.second_player_name
        }
    }
}
