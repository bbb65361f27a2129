//! Reducer actions: every state transition is an explicit action.
//!
//! The machine validates preconditions and then dispatches one of these;
//! the reducer itself is total and treats illegal combinations as no-ops.

use serde::{Deserialize, Serialize};

use crate::core::{DiceRoll, GameMode, GameResult, GameState};

/// A state transition request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameAction {
    /// Begin a fresh game: reset scores and round wins, name the second
    /// slot for the mode, round counter to 1.
    StartGame {
        /// Who is playing.
        mode: GameMode,
        /// Number of rounds; must be positive (validated by the machine).
        rounds: u32,
    },

    /// Open or close the roll-request-to-commit window.
    SetRolling(bool),

    /// Commit a generated roll: record it, add to the roller's score, and
    /// resolve the round if this was the second roll.
    CommitRoll {
        /// The roll to commit (carries the roller's ID).
        roll: DiceRoll,
    },

    /// Advance to the next round, clearing both roll slots. No-op at the
    /// final round.
    NextRound,

    /// Record a final result into history and complete the game.
    RecordResult(GameResult),

    /// Replace the live fields with an authoritative snapshot from the
    /// remote collaborator. Local history is preserved.
    SyncFromAuthority(Box<GameState>),

    /// Return to `NotStarted` defaults. History is preserved.
    Reset,
}
