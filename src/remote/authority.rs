//! The scoring authority seam.
//!
//! The state machine talks to its remote collaborator through this trait,
//! never through a concrete client. Tests substitute mocks; production
//! uses [`crate::remote::HttpAuthority`]. Every method failure is a
//! [`crate::error::GameError::CollaboratorUnavailable`], which the machine
//! treats as "compute locally instead" rather than a fatal error.

use crate::core::{DiceValue, GameMode, GameResult, GameState};
use crate::error::GameError;

use super::wire::PlayerStats;

/// A live remote game: the server-assigned ID plus its view of the state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteSession {
    /// Server-assigned game identifier.
    pub game_id: String,
    /// The authority's state snapshot.
    pub state: GameState,
}

/// A roll the remote authority committed on our behalf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteRoll {
    /// The face the authority rolled.
    pub value: DiceValue,
    /// The authority's state snapshot after committing the roll.
    pub state: GameState,
}

/// Remote scoring collaborator.
///
/// Responses are authoritative when they arrive; any failure is the
/// recoverable kind and triggers the machine's local fallback.
pub trait ScoreAuthority {
    /// Create a remote game.
    fn start_game(&mut self, mode: GameMode, rounds: u32) -> Result<RemoteSession, GameError>;

    /// Roll for the named player in the identified game.
    fn roll_dice(&mut self, game_id: &str, player_name: &str) -> Result<RemoteRoll, GameError>;

    /// Advance the identified game to its next round.
    fn next_round(&mut self, game_id: &str) -> Result<GameState, GameError>;

    /// Fetch the authority's current view of the identified game.
    fn game_state(&mut self, game_id: &str) -> Result<GameState, GameError>;

    /// End the identified game and fetch its final result.
    fn end_game(&mut self, game_id: &str) -> Result<GameResult, GameError>;

    /// Fetch cross-game player statistics.
    fn leaderboard(&mut self) -> Result<Vec<PlayerStats>, GameError>;

    /// Delete the identified game server-side.
    fn delete_game(&mut self, game_id: &str) -> Result<(), GameError>;
}
