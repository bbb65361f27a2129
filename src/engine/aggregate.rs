//! Result aggregation at game end.
//!
//! The authoritative winner computation: strictly more round wins takes
//! the game, equal round wins is a draw. Works from any phase, so early
//! termination (ending before the configured rounds are played) is valid.

use time::OffsetDateTime;

use crate::core::{GameResult, GameState, PlayerId};

/// Compute the final result for the game in `state`.
///
/// `total_rounds` counts rounds actually completed, not `max_rounds`;
/// a game ended before any roll reports zero.
#[must_use]
pub fn aggregate(state: &GameState) -> GameResult {
    let (first, second) = state.players.as_tuple();

    let winner = match first.round_wins.cmp(&second.round_wins) {
        std::cmp::Ordering::Greater => Some(state.player(PlayerId::FIRST).clone()),
        std::cmp::Ordering::Less => Some(state.player(PlayerId::SECOND).clone()),
        std::cmp::Ordering::Equal => None,
    };
    let is_draw = winner.is_none();

    GameResult {
        winner,
        total_rounds: state.completed_rounds(),
        final_scores: (first.score, second.score),
        timestamp: OffsetDateTime::now_utc(),
        is_draw,
    }
}
