//! The optional remote scoring collaborator.
//!
//! The machine treats the backend as an opaque authority: when reachable
//! its responses win, when not the engine computes locally. This module
//! holds the trait seam, the JSON wire shapes, and the HTTP client.

pub mod authority;
pub mod http;
pub mod wire;

pub use authority::{RemoteRoll, RemoteSession, ScoreAuthority};
pub use http::HttpAuthority;
pub use wire::{
    DiceRollResponse, GameResultResponse, GameStateResponse, PlayerStats, RollDiceRequest,
    StartGameRequest, WirePlayer, WireRoll, WireWinner,
};
