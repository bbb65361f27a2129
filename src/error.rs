//! Error taxonomy.
//!
//! Two kinds of failure exist, with opposite contracts:
//!
//! - [`GameError::InvalidState`]: the caller asked for an action outside
//!   its legal phase (rolling twice in one round, rolling before `start`).
//!   This is a caller bug and is surfaced loudly.
//! - [`GameError::CollaboratorUnavailable`]: the remote scoring authority
//!   could not be reached or returned garbage. Always recoverable: the
//!   machine catches it at the boundary, logs, and computes locally. It
//!   never reaches the machine's caller as a fatal error.

use thiserror::Error;

use crate::core::GamePhase;

/// Errors produced by the duel engine and its collaborators.
#[derive(Debug, Error)]
pub enum GameError {
    /// An action was requested outside its legal phase.
    #[error("{action} not allowed in phase {phase}: {reason}")]
    InvalidState {
        /// The operation that was attempted.
        action: &'static str,
        /// The phase the game was in.
        phase: GamePhase,
        /// What specifically was illegal.
        reason: String,
    },

    /// The remote scoring authority failed (transport error, non-2xx
    /// status, or malformed body).
    #[error("score authority unavailable: {reason}")]
    CollaboratorUnavailable {
        /// Human-readable failure description.
        reason: String,
    },
}

impl GameError {
    /// Build an [`GameError::InvalidState`].
    pub fn invalid_state(
        action: &'static str,
        phase: GamePhase,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidState {
            action,
            phase,
            reason: reason.into(),
        }
    }

    /// Build a [`GameError::CollaboratorUnavailable`].
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::CollaboratorUnavailable {
            reason: reason.into(),
        }
    }

    /// Whether the engine may transparently recover by computing locally.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GameError::CollaboratorUnavailable { .. })
    }
}
