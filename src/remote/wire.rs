//! JSON wire format shared with the scoring backend.
//!
//! Shapes mirror the backend's DTOs exactly (camelCase keys, players
//! addressed by display name, status as a lowercase string). Conversions
//! into core types validate everything that could corrupt local state:
//! player count, die faces, round counters, and status strings. Violations
//! are reported as `CollaboratorUnavailable` so the machine falls back
//! instead of ingesting garbage.
//!
//! Timestamps are display metadata only, so parsing is lenient: rfc3339
//! is accepted, anything else falls back to the local clock.

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::core::{
    DiceRoll, DiceValue, GameHistory, GameMode, GamePhase, GameResult, GameState, Player,
    PlayerId, PlayerPair,
};
use crate::error::GameError;

use super::authority::{RemoteRoll, RemoteSession};

/// `POST /api/game/start` request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartGameRequest {
    /// Game mode ("pvp" or "pvc").
    pub mode: GameMode,
    /// Number of rounds to play.
    pub rounds: u32,
}

/// `POST /api/game/{id}/roll` request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollDiceRequest {
    /// Display name of the rolling player.
    pub player_name: String,
}

/// One player as the backend reports it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePlayer {
    /// Backend-assigned numeric ID.
    pub id: u64,
    pub name: String,
    pub is_computer: bool,
    pub score: u32,
    pub round_wins: u32,
}

/// One committed roll as the backend reports it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRoll {
    /// Display name of the roller.
    pub player_name: String,
    /// Raw die face; validated on conversion.
    pub value: u8,
    pub timestamp: String,
}

/// The backend's view of a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateResponse {
    pub game_id: String,
    pub mode: GameMode,
    pub max_rounds: u32,
    pub current_round: u32,
    /// Lifecycle phase as a lowercase string
    /// ("waiting"/"in_progress"/"round_complete"/"game_complete").
    pub status: String,
    pub players: Vec<WirePlayer>,
    pub current_round_rolls: Vec<WireRoll>,
    pub game_complete: bool,
    pub round_complete: bool,
}

/// `POST /api/game/{id}/roll` response body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceRollResponse {
    pub player_name: String,
    pub value: u8,
    pub timestamp: String,
    pub game_state: GameStateResponse,
}

/// The winner entry of a final result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireWinner {
    pub name: String,
    pub is_computer: bool,
}

/// `POST /api/game/{id}/end` response body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResultResponse {
    pub game_id: String,
    pub winner: Option<WireWinner>,
    pub total_rounds: u32,
    pub final_scores: Vec<u32>,
    pub timestamp: String,
    pub is_draw: bool,
}

/// One leaderboard entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub id: u64,
    pub name: String,
    pub total_games: u32,
    pub total_wins: u32,
    pub win_rate: f64,
    pub last_played: Option<String>,
}

fn parse_status(status: &str) -> Result<GamePhase, GameError> {
    match status {
        "waiting" => Ok(GamePhase::NotStarted),
        "in_progress" => Ok(GamePhase::InRound),
        "round_complete" => Ok(GamePhase::RoundComplete),
        "game_complete" => Ok(GamePhase::GameComplete),
        other => Err(GameError::unavailable(format!(
            "unknown game status on wire: {other}"
        ))),
    }
}

fn phase_to_status(phase: GamePhase) -> String {
    let status = match phase {
        GamePhase::NotStarted => "waiting",
        GamePhase::InRound => "in_progress",
        GamePhase::RoundComplete => "round_complete",
        GamePhase::GameComplete => "game_complete",
    };
    status.to_string()
}

fn parse_timestamp(raw: &str) -> OffsetDateTime {
    OffsetDateTime::parse(raw, &Rfc3339).unwrap_or_else(|_| OffsetDateTime::now_utc())
}

fn format_timestamp(timestamp: OffsetDateTime) -> String {
    timestamp.format(&Rfc3339).unwrap_or_default()
}

impl GameStateResponse {
    /// Validate and convert into a core [`GameState`].
    ///
    /// The converted state carries an empty history; the reducer preserves
    /// the local history on sync.
    pub fn into_game_state(self) -> Result<GameState, GameError> {
        if self.players.len() != 2 {
            return Err(GameError::unavailable(format!(
                "expected 2 players on wire, got {}",
                self.players.len()
            )));
        }
        if self.max_rounds == 0
            || self.current_round == 0
            || self.current_round > self.max_rounds + 1
        {
            return Err(GameError::unavailable(format!(
                "round counters out of range on wire: {}/{}",
                self.current_round, self.max_rounds
            )));
        }

        let phase = parse_status(&self.status)?;

        let players = PlayerPair::from_fn(|id| {
            let wire = &self.players[id.index()];
            Player {
                id: format!("player{}", id.index() + 1),
                name: wire.name.clone(),
                is_computer: wire.is_computer,
                score: wire.score,
                round_wins: wire.round_wins,
            }
        });

        let mut last_rolls: PlayerPair<Option<DiceRoll>> = PlayerPair::with_default();
        for roll in &self.current_round_rolls {
            let player = players
                .iter()
                .find(|(_, p)| p.name == roll.player_name)
                .map(|(id, _)| id)
                .ok_or_else(|| {
                    GameError::unavailable(format!(
                        "roll for unknown player on wire: {}",
                        roll.player_name
                    ))
                })?;
            let value = DiceValue::new(roll.value).ok_or_else(|| {
                GameError::unavailable(format!("die face out of range on wire: {}", roll.value))
            })?;
            last_rolls[player] = Some(DiceRoll::at(player, value, parse_timestamp(&roll.timestamp)));
        }

        Ok(GameState {
            mode: self.mode,
            max_rounds: self.max_rounds,
            current_round: self.current_round,
            phase,
            players,
            is_rolling: false,
            last_rolls,
            history: GameHistory::default(),
        })
    }

    /// Convert into a [`RemoteSession`] (game ID plus state).
    pub fn into_session(self) -> Result<RemoteSession, GameError> {
        let game_id = self.game_id.clone();
        Ok(RemoteSession {
            game_id,
            state: self.into_game_state()?,
        })
    }

    /// Build the wire view of a local state (used by tests and mocks).
    #[must_use]
    pub fn from_game_state(state: &GameState, game_id: &str) -> Self {
        let players = state
            .players
            .iter()
            .map(|(id, p)| WirePlayer {
                id: id.index() as u64 + 1,
                name: p.name.clone(),
                is_computer: p.is_computer,
                score: p.score,
                round_wins: p.round_wins,
            })
            .collect();

        let current_round_rolls = state
            .last_rolls
            .iter()
            .filter_map(|(id, roll)| {
                roll.as_ref().map(|r| WireRoll {
                    player_name: state.players[id].name.clone(),
                    value: r.value.get(),
                    timestamp: format_timestamp(r.timestamp),
                })
            })
            .collect();

        Self {
            game_id: game_id.to_string(),
            mode: state.mode,
            max_rounds: state.max_rounds,
            current_round: state.current_round,
            status: phase_to_status(state.phase),
            players,
            current_round_rolls,
            game_complete: state.phase == GamePhase::GameComplete,
            round_complete: state.phase == GamePhase::RoundComplete,
        }
    }
}

impl DiceRollResponse {
    /// Validate and convert into a [`RemoteRoll`].
    pub fn into_remote_roll(self) -> Result<RemoteRoll, GameError> {
        let value = DiceValue::new(self.value).ok_or_else(|| {
            GameError::unavailable(format!("die face out of range on wire: {}", self.value))
        })?;
        Ok(RemoteRoll {
            value,
            state: self.game_state.into_game_state()?,
        })
    }
}

impl GameResultResponse {
    /// Validate and convert into a core [`GameResult`].
    ///
    /// The wire winner carries only name and computer flag; the machine
    /// re-anchors it to the full local player record when possible.
    pub fn into_game_result(self) -> Result<GameResult, GameError> {
        if self.final_scores.len() != 2 {
            return Err(GameError::unavailable(format!(
                "expected 2 final scores on wire, got {}",
                self.final_scores.len()
            )));
        }

        let winner = self
            .winner
            .map(|w| Player::new("remote", w.name, w.is_computer));
        let is_draw = self.is_draw;

        Ok(GameResult {
            winner,
            total_rounds: self.total_rounds,
            final_scores: (self.final_scores[0], self.final_scores[1]),
            timestamp: parse_timestamp(&self.timestamp),
            is_draw,
        })
    }
}
