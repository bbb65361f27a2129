//! The game state machine facade.
//!
//! `GameStateMachine` owns the authoritative [`GameState`], the die
//! roller, and (optionally) a remote [`ScoreAuthority`]. Every operation
//! follows the same shape: validate preconditions, consult the remote
//! authority when one is configured, and on any remote failure fall back
//! to the identical local computation in the same call. The caller never
//! sees a failed game because the collaborator was unreachable.
//!
//! Turn alternation within a round is deliberately NOT enforced here; the
//! machine only rejects a second roll by the same player in the same
//! round. The presentation layer owns whose turn it is.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::core::{
    DiceRng, DiceRngState, DiceRoll, DiceValue, GameConfig, GameMode, GamePhase, GameResult,
    GameState, PlayerId,
};
use crate::error::GameError;
use crate::remote::{PlayerStats, RemoteRoll, ScoreAuthority};

use super::action::GameAction;
use super::aggregate::aggregate;
use super::reducer::reduce;

/// Serializable capture of a session: state plus roller position.
///
/// Restoring a snapshot and replaying the same actions produces behavior
/// identical to the uninterrupted session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// The full game state.
    pub state: GameState,
    /// The die roller position.
    pub rng: DiceRngState,
}

/// Owner of one duel session.
pub struct GameStateMachine {
    config: GameConfig,
    state: GameState,
    rng: DiceRng,
    authority: Option<Box<dyn ScoreAuthority>>,
    game_id: Option<String>,
}

impl Default for GameStateMachine {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl GameStateMachine {
    /// Create a machine with an entropy-seeded roller and no remote
    /// authority.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let state = GameState::new(&config);
        Self {
            config,
            state,
            rng: DiceRng::from_entropy(),
            authority: None,
            game_id: None,
        }
    }

    /// Create a machine with a deterministic roller.
    #[must_use]
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        let state = GameState::new(&config);
        Self {
            config,
            state,
            rng: DiceRng::new(seed),
            authority: None,
            game_id: None,
        }
    }

    /// Attach a remote scoring authority. Its responses become
    /// authoritative; its failures fall back to local computation.
    #[must_use]
    pub fn with_authority(mut self, authority: Box<dyn ScoreAuthority>) -> Self {
        self.authority = Some(authority);
        self
    }

    /// The current state snapshot.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The engine configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The remote game ID, when a remote game is live.
    #[must_use]
    pub fn game_id(&self) -> Option<&str> {
        self.game_id.as_deref()
    }

    fn dispatch(&mut self, action: GameAction) {
        self.state = reduce(&self.state, &action, &self.config);
    }

    /// Start a fresh game.
    ///
    /// Fails with [`GameError::InvalidState`] when `rounds` is zero.
    pub fn start(&mut self, mode: GameMode, rounds: u32) -> Result<&GameState, GameError> {
        if rounds == 0 {
            let err =
                GameError::invalid_state("start", self.state.phase, "rounds must be positive");
            error!(%err, "rejected start request");
            return Err(err);
        }

        let remote = self
            .authority
            .as_mut()
            .map(|authority| authority.start_game(mode, rounds));

        match remote {
            Some(Ok(session)) => {
                debug!(game_id = %session.game_id, %mode, rounds, "remote game started");
                self.game_id = Some(session.game_id);
                self.dispatch(GameAction::SyncFromAuthority(Box::new(session.state)));
            }
            Some(Err(err)) => {
                warn!(%err, "score authority unavailable, starting locally");
                self.game_id = None;
                self.dispatch(GameAction::StartGame { mode, rounds });
            }
            None => {
                debug!(%mode, rounds, "local game started");
                self.dispatch(GameAction::StartGame { mode, rounds });
            }
        }
        Ok(&self.state)
    }

    /// Roll the die for `player` and return the committed value.
    ///
    /// Fails with [`GameError::InvalidState`] outside `InRound` or when
    /// the player has already rolled this round. Whose turn it is remains
    /// the caller's responsibility.
    pub fn roll_dice(&mut self, player: PlayerId) -> Result<DiceValue, GameError> {
        if self.state.phase != GamePhase::InRound {
            let err = GameError::invalid_state(
                "roll_dice",
                self.state.phase,
                format!("{player} cannot roll outside a round"),
            );
            error!(%err, "rejected roll request");
            return Err(err);
        }
        if self.state.has_rolled(player) {
            let err = GameError::invalid_state(
                "roll_dice",
                self.state.phase,
                format!("{player} already rolled this round"),
            );
            error!(%err, "rejected roll request");
            return Err(err);
        }

        self.dispatch(GameAction::SetRolling(true));

        let remote = match (self.authority.as_mut(), self.game_id.as_deref()) {
            (Some(authority), Some(game_id)) => {
                let name = self.state.players[player].name.clone();
                Some(authority.roll_dice(game_id, &name))
            }
            _ => None,
        };

        match remote {
            Some(Ok(RemoteRoll { value, state })) => {
                if let Some(delay) = self.config.remote_roll_delay {
                    std::thread::sleep(delay);
                }
                self.dispatch(GameAction::SyncFromAuthority(Box::new(state)));
                self.dispatch(GameAction::SetRolling(false));
                debug!(%player, %value, "roll committed by remote authority");
                return Ok(value);
            }
            Some(Err(err)) => {
                warn!(%err, "score authority unavailable, rolling locally");
            }
            None => {}
        }

        if let Some(delay) = self.config.roll_delay {
            std::thread::sleep(delay);
        }
        let value = self.rng.roll();
        self.dispatch(GameAction::CommitRoll {
            roll: DiceRoll::new(player, value),
        });
        self.dispatch(GameAction::SetRolling(false));
        debug!(%player, %value, "roll committed locally");
        Ok(value)
    }

    /// Advance to the next round.
    ///
    /// Total: a no-op when the current round is not resolved or the game
    /// is already at its final round.
    pub fn next_round(&mut self) -> Result<&GameState, GameError> {
        let remote = match (self.authority.as_mut(), self.game_id.as_deref()) {
            (Some(authority), Some(game_id)) => Some(authority.next_round(game_id)),
            _ => None,
        };

        match remote {
            Some(Ok(state)) => {
                self.dispatch(GameAction::SyncFromAuthority(Box::new(state)));
            }
            Some(Err(err)) => {
                warn!(%err, "score authority unavailable, advancing round locally");
                self.dispatch(GameAction::NextRound);
            }
            None => self.dispatch(GameAction::NextRound),
        }
        debug!(round = self.state.current_round, "round advanced");
        Ok(&self.state)
    }

    /// End the game: compute the final result, record it into history,
    /// and move to `GameComplete`. Total from any phase, which permits
    /// early termination; calling it again on a completed game returns
    /// the recorded result without recording a duplicate.
    pub fn end_game(&mut self) -> Result<GameResult, GameError> {
        if self.state.phase == GamePhase::GameComplete {
            if let Some(result) = self.state.history.latest() {
                debug!("game already completed, returning recorded result");
                return Ok(result.clone());
            }
        }

        let remote = match (self.authority.as_mut(), self.game_id.as_deref()) {
            (Some(authority), Some(game_id)) => Some(authority.end_game(game_id)),
            _ => None,
        };

        let result = match remote {
            Some(Ok(mut result)) => {
                // The wire result names the winner; re-anchor it to the
                // local player record so history carries full stats.
                if let Some(winner) = result.winner.as_mut() {
                    if let Some(id) = self.state.player_by_name(&winner.name) {
                        *winner = self.state.player(id).clone();
                    }
                }
                // The server drops the game on end.
                self.game_id = None;
                result
            }
            Some(Err(err)) => {
                warn!(%err, "score authority unavailable, aggregating locally");
                aggregate(&self.state)
            }
            None => aggregate(&self.state),
        };

        self.dispatch(GameAction::RecordResult(result.clone()));
        debug!(
            is_draw = result.is_draw,
            total_rounds = result.total_rounds,
            "game completed"
        );
        Ok(result)
    }

    /// Re-pull the authoritative state from the remote collaborator.
    ///
    /// A no-op for purely local sessions; a remote failure keeps the
    /// local state untouched.
    pub fn refresh(&mut self) -> Result<&GameState, GameError> {
        let remote = match (self.authority.as_mut(), self.game_id.as_deref()) {
            (Some(authority), Some(game_id)) => Some(authority.game_state(game_id)),
            _ => None,
        };

        match remote {
            Some(Ok(state)) => {
                self.dispatch(GameAction::SyncFromAuthority(Box::new(state)));
            }
            Some(Err(err)) => {
                warn!(%err, "refresh failed, keeping local state");
            }
            None => {}
        }
        Ok(&self.state)
    }

    /// Discard the session and return to `NotStarted` defaults.
    ///
    /// The recent-games history survives; it is process-lifetime.
    pub fn reset(&mut self) -> &GameState {
        if let (Some(authority), Some(game_id)) = (self.authority.as_mut(), self.game_id.take()) {
            if let Err(err) = authority.delete_game(&game_id) {
                warn!(%err, %game_id, "failed to delete remote game");
            }
        }
        self.dispatch(GameAction::Reset);
        debug!("session reset");
        &self.state
    }

    /// Fetch the backend leaderboard.
    ///
    /// Player statistics live only on the scoring backend, so this fails
    /// (recoverably) when no authority is configured.
    pub fn leaderboard(&mut self) -> Result<Vec<PlayerStats>, GameError> {
        match self.authority.as_mut() {
            Some(authority) => authority.leaderboard(),
            None => Err(GameError::unavailable("no score authority configured")),
        }
    }

    /// Capture the session for serialization.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state.clone(),
            rng: self.rng.state(),
        }
    }

    /// Restore a session from a snapshot. The restored machine behaves
    /// identically to the original given the same subsequent calls.
    #[must_use]
    pub fn restore(config: GameConfig, snapshot: SessionSnapshot) -> Self {
        Self {
            config,
            state: snapshot.state,
            rng: DiceRng::from_state(&snapshot.rng),
            authority: None,
            game_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> GameStateMachine {
        GameStateMachine::with_seed(GameConfig::default(), 42)
    }

    fn play_round(machine: &mut GameStateMachine) -> (DiceValue, DiceValue) {
        let first = machine.roll_dice(PlayerId::FIRST).unwrap();
        let second = machine.roll_dice(PlayerId::SECOND).unwrap();
        (first, second)
    }

    #[test]
    fn test_start_rejects_zero_rounds() {
        let mut machine = machine();
        let err = machine.start(GameMode::Pvp, 0).unwrap_err();
        assert!(matches!(err, GameError::InvalidState { .. }));
        assert_eq!(machine.state().phase, GamePhase::NotStarted);
    }

    #[test]
    fn test_start_enters_round_one() {
        let mut machine = machine();
        machine.start(GameMode::Pvc, 3).unwrap();

        let state = machine.state();
        assert_eq!(state.phase, GamePhase::InRound);
        assert_eq!(state.current_round, 1);
        assert_eq!(state.max_rounds, 3);
        assert_eq!(state.players[PlayerId::SECOND].name, "Computer");
    }

    #[test]
    fn test_roll_before_start_fails() {
        let mut machine = machine();
        let err = machine.roll_dice(PlayerId::FIRST).unwrap_err();
        assert!(matches!(err, GameError::InvalidState { .. }));
    }

    #[test]
    fn test_double_roll_fails() {
        let mut machine = machine();
        machine.start(GameMode::Pvp, 5).unwrap();

        machine.roll_dice(PlayerId::FIRST).unwrap();
        let err = machine.roll_dice(PlayerId::FIRST).unwrap_err();
        assert!(matches!(err, GameError::InvalidState { .. }));
        // The failed attempt left no trace.
        assert!(!machine.state().is_rolling);
        assert!(!machine.state().has_rolled(PlayerId::SECOND));
    }

    #[test]
    fn test_roll_after_round_complete_fails() {
        let mut machine = machine();
        machine.start(GameMode::Pvp, 5).unwrap();
        play_round(&mut machine);

        let err = machine.roll_dice(PlayerId::FIRST).unwrap_err();
        assert!(matches!(err, GameError::InvalidState { .. }));
    }

    #[test]
    fn test_scores_accumulate_across_rounds() {
        let mut machine = machine();
        machine.start(GameMode::Pvp, 5).unwrap();

        let mut totals = (0u32, 0u32);
        for _ in 0..3 {
            let (a, b) = play_round(&mut machine);
            totals.0 += u32::from(a.get());
            totals.1 += u32::from(b.get());
            machine.next_round().unwrap();
        }

        let state = machine.state();
        assert_eq!(state.players[PlayerId::FIRST].score, totals.0);
        assert_eq!(state.players[PlayerId::SECOND].score, totals.1);
    }

    #[test]
    fn test_immediate_end_game_is_zero_round_draw() {
        let mut machine = machine();
        machine.start(GameMode::Pvp, 5).unwrap();
        let result = machine.end_game().unwrap();

        assert!(result.is_draw);
        assert_eq!(result.total_rounds, 0);
        assert_eq!(result.final_scores, (0, 0));
        assert_eq!(machine.state().phase, GamePhase::GameComplete);
        assert_eq!(machine.state().history.len(), 1);
    }

    #[test]
    fn test_full_game_reports_all_rounds() {
        let mut machine = machine();
        machine.start(GameMode::Pvp, 3).unwrap();

        for round in 1..=3 {
            play_round(&mut machine);
            assert_eq!(machine.state().current_round, round);
            if round < 3 {
                machine.next_round().unwrap();
            }
        }

        let result = machine.end_game().unwrap();
        assert_eq!(result.total_rounds, 3);
        assert_eq!(machine.state().current_round, 4);
    }

    #[test]
    fn test_end_game_twice_records_once() {
        let mut machine = machine();
        machine.start(GameMode::Pvp, 1).unwrap();
        play_round(&mut machine);

        let first = machine.end_game().unwrap();
        let second = machine.end_game().unwrap();

        assert_eq!(second, first);
        assert_eq!(machine.state().history.len(), 1);
        assert_eq!(machine.state().phase, GamePhase::GameComplete);
    }

    #[test]
    fn test_next_round_noop_at_final_round() {
        let mut machine = machine();
        machine.start(GameMode::Pvp, 1).unwrap();
        play_round(&mut machine);

        let before = machine.state().clone();
        machine.next_round().unwrap();
        assert_eq!(machine.state(), &before);
    }

    #[test]
    fn test_reset_returns_to_defaults_but_keeps_history() {
        let mut machine = machine();
        machine.start(GameMode::Pvc, 2).unwrap();
        play_round(&mut machine);
        machine.end_game().unwrap();

        machine.reset();
        let state = machine.state();

        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.players[PlayerId::SECOND].name, "Player 2");
        assert_eq!(state.players[PlayerId::FIRST].score, 0);
        assert_eq!(state.history.len(), 1);
    }

    #[test]
    fn test_leaderboard_without_authority_is_recoverable_error() {
        let mut machine = machine();
        let err = machine.leaderboard().unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_refresh_is_local_noop() {
        let mut machine = machine();
        machine.start(GameMode::Pvp, 5).unwrap();
        let before = machine.state().clone();
        machine.refresh().unwrap();
        assert_eq!(machine.state(), &before);
    }

    #[test]
    fn test_snapshot_restore_resumes_identically() {
        let mut original = machine();
        original.start(GameMode::Pvp, 5).unwrap();
        play_round(&mut original);
        original.next_round().unwrap();

        let snapshot = original.snapshot();
        let mut restored = GameStateMachine::restore(GameConfig::default(), snapshot.clone());
        assert_eq!(restored.state(), original.state());

        // Same subsequent rolls on both machines. Roll timestamps are
        // wall-clock, so compare the fields that carry game meaning.
        let (a1, b1) = play_round(&mut original);
        let (a2, b2) = play_round(&mut restored);
        assert_eq!((a1, b1), (a2, b2));
        assert_eq!(restored.state().players, original.state().players);
        assert_eq!(restored.state().phase, original.state().phase);
        assert_eq!(restored.state().current_round, original.state().current_round);
    }

    #[test]
    fn test_snapshot_serde_round_trip() {
        let mut machine = machine();
        machine.start(GameMode::Pvp, 5).unwrap();

        let snapshot = machine.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: SessionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, back);
    }
}
