//! # dice-duel
//!
//! Core engine for a two-player dice duel: a fixed number of rounds, one
//! roll per player per round, higher face takes the round, most round
//! wins takes the game.
//!
//! ## Design Principles
//!
//! 1. **Reducer-style state**: all transitions flow through a pure, total
//!    `(State, Action) -> State` function. Snapshots are plain data;
//!    illegal combinations degrade to no-ops rather than corrupting state.
//!
//! 2. **Optional remote authority**: a scoring backend can own the game;
//!    its responses are authoritative, its failures trigger a transparent
//!    local fallback in the same call. The user never sees a failed game
//!    because the backend was down.
//!
//! 3. **Deterministic where it matters**: the roller is seedable and its
//!    position is part of the session snapshot, so a serialized session
//!    resumes with identical behavior.
//!
//! ## Modules
//!
//! - `core`: players, dice, configuration, state, results
//! - `engine`: actions, reducer, round resolution, aggregation, and the
//!   `GameStateMachine` facade
//! - `remote`: the `ScoreAuthority` seam, JSON wire shapes, HTTP client
//! - `error`: the `InvalidState` / `CollaboratorUnavailable` taxonomy

pub mod core;
pub mod engine;
pub mod error;
pub mod remote;

// Re-export commonly used types
pub use crate::core::{
    DiceRng, DiceRngState, DiceRoll, DiceValue, GameConfig, GameHistory, GameMode, GamePhase,
    GameResult, GameState, Player, PlayerId, PlayerPair,
};

pub use crate::engine::{
    aggregate, decide, reduce, GameAction, GameStateMachine, RoundOutcome, SessionSnapshot,
};

pub use crate::error::GameError;

pub use crate::remote::{
    HttpAuthority, PlayerStats, RemoteRoll, RemoteSession, ScoreAuthority,
};
