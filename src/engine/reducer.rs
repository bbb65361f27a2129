//! Pure state transition function.
//!
//! `reduce` is total: every reachable state/action pair is defined, and
//! combinations the machine never dispatches (a `CommitRoll` outside a
//! round, a second `CommitRoll` for the same player) degrade to no-ops
//! instead of corrupting state. Each call yields a new snapshot; the input
//! is never mutated.

use crate::core::{GameConfig, GamePhase, GameState, PlayerId, PlayerPair};

use super::action::GameAction;
use super::round::{decide, RoundOutcome};

/// Apply one action to a state snapshot, producing the next snapshot.
#[must_use]
pub fn reduce(state: &GameState, action: &GameAction, config: &GameConfig) -> GameState {
    let mut next = state.clone();

    match action {
        GameAction::StartGame { mode, rounds } => {
            next.mode = *mode;
            next.max_rounds = *rounds;
            next.current_round = 1;
            next.phase = GamePhase::InRound;
            next.is_rolling = false;
            next.last_rolls = PlayerPair::with_default();

            let first = &mut next.players[PlayerId::FIRST];
            first.name = config.first_player_name.clone();
            first.is_computer = false;
            first.reset_game_stats();

            let second = &mut next.players[PlayerId::SECOND];
            second.name = config.second_slot_name(*mode).to_string();
            second.is_computer = mode.is_versus_computer();
            second.reset_game_stats();
        }

        GameAction::SetRolling(rolling) => {
            next.is_rolling = *rolling;
        }

        GameAction::CommitRoll { roll } => {
            let player = roll.player;
            if next.phase != GamePhase::InRound || next.has_rolled(player) {
                return next;
            }

            next.players[player].score += u32::from(roll.value.get());
            next.last_rolls[player] = Some(roll.clone());

            let faces = match (
                &next.last_rolls[PlayerId::FIRST],
                &next.last_rolls[PlayerId::SECOND],
            ) {
                (Some(a), Some(b)) => Some((a.value, b.value)),
                _ => None,
            };
            if let Some((first, second)) = faces {
                if let RoundOutcome::Winner(winner) = decide(first, second) {
                    next.players[winner].round_wins += 1;
                }
                next.phase = GamePhase::RoundComplete;
            }
        }

        GameAction::NextRound => {
            // Idempotent at the boundary: the final round never advances.
            if next.phase == GamePhase::RoundComplete && next.current_round < next.max_rounds {
                next.current_round += 1;
                next.last_rolls = PlayerPair::with_default();
                next.phase = GamePhase::InRound;
            }
        }

        GameAction::RecordResult(result) => {
            // A fully resolved round counts as completed; the counter moves
            // to the "just completed" position so it always equals
            // completed rounds + 1.
            if next.phase == GamePhase::RoundComplete {
                next.current_round += 1;
            }
            next.phase = GamePhase::GameComplete;
            next.is_rolling = false;
            next.history.record(result.clone());
        }

        GameAction::SyncFromAuthority(snapshot) => {
            let history = next.history;
            next = (**snapshot).clone();
            next.history = history;
        }

        GameAction::Reset => {
            let history = next.history;
            next = GameState::new(config);
            next.history = history;
        }
    }

    next
}
