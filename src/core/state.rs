//! Authoritative game state.
//!
//! ## GameState
//!
//! One snapshot holds everything a session needs:
//! - Mode, round counters, phase
//! - Both players (scores, round wins)
//! - The current round's roll slots and the rolling flag
//! - The bounded recent-games history
//!
//! The RNG lives outside the state (in the machine), so snapshots are
//! plain serializable data. Transitions never mutate a snapshot in place;
//! the reducer produces a new one.

use serde::{Deserialize, Serialize};

use super::config::{GameConfig, GameMode, DEFAULT_MAX_ROUNDS};
use super::dice::DiceRoll;
use super::player::{Player, PlayerId, PlayerPair};
use super::result::GameHistory;

/// Lifecycle phase of a game.
///
/// `NotStarted → InRound → RoundComplete → (InRound | GameComplete)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// No game in progress; default player names, zero scores.
    NotStarted,
    /// A round is open: at most one player has rolled.
    InRound,
    /// Both players have rolled; the round is resolved.
    RoundComplete,
    /// A final result has been recorded.
    GameComplete,
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GamePhase::NotStarted => "not_started",
            GamePhase::InRound => "in_round",
            GamePhase::RoundComplete => "round_complete",
            GamePhase::GameComplete => "game_complete",
        };
        write!(f, "{name}")
    }
}

/// Complete state of one duel session.
///
/// Invariants maintained by the reducer:
/// - `current_round` never exceeds `max_rounds + 1` (the `+1` value means
///   "game just completed")
/// - `last_rolls` holds at most one roll per player per round; both slots
///   clear exactly when a new round begins
/// - `round_wins` across both players increases by at most one per round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Who is playing.
    pub mode: GameMode,

    /// Configured number of rounds for this game.
    pub max_rounds: u32,

    /// Current round, starting at 1.
    pub current_round: u32,

    /// Lifecycle phase.
    pub phase: GamePhase,

    /// Both players in fixed index order.
    pub players: PlayerPair<Player>,

    /// True only inside the roll-request-to-commit window.
    pub is_rolling: bool,

    /// This round's rolls, one optional slot per player.
    pub last_rolls: PlayerPair<Option<DiceRoll>>,

    /// Recent finished games, most recent first.
    pub history: GameHistory,
}

impl GameState {
    /// Fresh `NotStarted` state with default names and zero scores.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            mode: GameMode::Pvp,
            max_rounds: DEFAULT_MAX_ROUNDS,
            current_round: 1,
            phase: GamePhase::NotStarted,
            players: PlayerPair::new(
                Player::new("player1", config.first_player_name.clone(), false),
                Player::new("player2", config.second_player_name.clone(), false),
            ),
            is_rolling: false,
            last_rolls: PlayerPair::with_default(),
            history: GameHistory::with_capacity(config.history_capacity),
        }
    }

    /// Get a player by ID.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    /// Whether the given player has already rolled this round.
    #[must_use]
    pub fn has_rolled(&self, player: PlayerId) -> bool {
        self.last_rolls[player].is_some()
    }

    /// Whether both players have rolled this round.
    #[must_use]
    pub fn round_complete(&self) -> bool {
        self.last_rolls.iter().all(|(_, roll)| roll.is_some())
    }

    /// Look up a player slot by display name (the wire protocol addresses
    /// players by name).
    #[must_use]
    pub fn player_by_name(&self, name: &str) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|(_, p)| p.name == name)
            .map(|(id, _)| id)
    }

    /// Rounds fully resolved so far.
    ///
    /// In `RoundComplete` the counter has not advanced past the resolved
    /// round yet, so the round being displayed counts as completed.
    #[must_use]
    pub fn completed_rounds(&self) -> u32 {
        match self.phase {
            GamePhase::RoundComplete => self.current_round,
            _ => self.current_round.saturating_sub(1),
        }
    }
}
