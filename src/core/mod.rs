//! Core types: players, dice, configuration, state, results.
//!
//! Everything here is plain data with local invariants. Transitions live
//! in [`crate::engine`]; the remote collaborator in [`crate::remote`].

pub mod config;
pub mod dice;
pub mod player;
pub mod result;
pub mod state;

pub use config::{
    GameConfig, GameMode, DEFAULT_HISTORY_CAPACITY, DEFAULT_MAX_ROUNDS, LOCAL_ROLL_DELAY,
    REMOTE_ROLL_DELAY,
};
pub use dice::{DiceRng, DiceRngState, DiceRoll, DiceValue};
pub use player::{Player, PlayerId, PlayerPair, PLAYER_COUNT};
pub use result::{GameHistory, GameResult};
pub use state::{GamePhase, GameState};
