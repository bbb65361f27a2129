//! End-to-end duel flows through the public API.
//!
//! Scripted games drive the reducer directly with known faces; randomized
//! games go through `GameStateMachine` with a fixed seed.

use dice_duel::{
    aggregate, reduce, DiceRoll, DiceValue, GameAction, GameConfig, GameError, GameMode, GamePhase,
    GameState, GameStateMachine, PlayerId,
};

fn config() -> GameConfig {
    GameConfig::default()
}

fn start(mode: GameMode, rounds: u32) -> GameState {
    reduce(
        &GameState::new(&config()),
        &GameAction::StartGame { mode, rounds },
        &config(),
    )
}

fn commit(state: &GameState, player: PlayerId, value: u8) -> GameState {
    reduce(
        state,
        &GameAction::CommitRoll {
            roll: DiceRoll::new(player, DiceValue::new(value).unwrap()),
        },
        &config(),
    )
}

fn finish(state: &GameState) -> GameState {
    reduce(
        state,
        &GameAction::RecordResult(aggregate(state)),
        &config(),
    )
}

#[test]
fn test_single_round_higher_face_wins() {
    let state = start(GameMode::Pvp, 5);
    let state = commit(&state, PlayerId::FIRST, 4);
    let state = commit(&state, PlayerId::SECOND, 2);

    assert_eq!(state.phase, GamePhase::RoundComplete);
    assert_eq!(state.players[PlayerId::FIRST].round_wins, 1);
    assert_eq!(state.players[PlayerId::SECOND].round_wins, 0);
    assert_eq!(state.players[PlayerId::FIRST].score, 4);
    assert_eq!(state.players[PlayerId::SECOND].score, 2);
}

#[test]
fn test_roll_order_does_not_matter() {
    let state = start(GameMode::Pvp, 5);
    let state = commit(&state, PlayerId::SECOND, 2);
    assert_eq!(state.phase, GamePhase::InRound);

    let state = commit(&state, PlayerId::FIRST, 4);
    assert_eq!(state.phase, GamePhase::RoundComplete);
    assert_eq!(state.players[PlayerId::FIRST].round_wins, 1);
}

#[test]
fn test_three_round_sweep() {
    let mut state = start(GameMode::Pvp, 3);
    for round in 1..=3u32 {
        state = commit(&state, PlayerId::FIRST, 6);
        state = commit(&state, PlayerId::SECOND, 1);
        assert_eq!(state.current_round, round);
        if round < 3 {
            state = reduce(&state, &GameAction::NextRound, &config());
        }
    }

    let result = aggregate(&state);
    assert_eq!(result.winner.as_ref().unwrap().name, "Player 1");
    assert_eq!(result.winner.as_ref().unwrap().round_wins, 3);
    assert_eq!(result.total_rounds, 3);
    assert_eq!(result.final_scores, (18, 3));
    assert!(!result.is_draw);

    let state = finish(&state);
    assert_eq!(state.phase, GamePhase::GameComplete);
    assert_eq!(state.current_round, 4);
    assert_eq!(state.history.latest().unwrap(), &result);
}

#[test]
fn test_all_tied_rounds_is_draw() {
    let mut state = start(GameMode::Pvp, 2);
    for round in 1..=2u32 {
        state = commit(&state, PlayerId::FIRST, 3);
        state = commit(&state, PlayerId::SECOND, 3);
        if round < 2 {
            state = reduce(&state, &GameAction::NextRound, &config());
        }
    }

    let result = aggregate(&state);
    assert!(result.is_draw);
    assert!(result.winner.is_none());
    // Draw on round wins even though cumulative scores are equal too.
    assert_eq!(result.final_scores, (6, 6));
    assert_eq!(result.total_rounds, 2);
}

#[test]
fn test_score_lead_does_not_decide_game() {
    // Player 2 piles up score in one round but loses the other two.
    let mut state = start(GameMode::Pvp, 3);
    state = commit(&state, PlayerId::FIRST, 2);
    state = commit(&state, PlayerId::SECOND, 6);
    state = reduce(&state, &GameAction::NextRound, &config());
    state = commit(&state, PlayerId::FIRST, 2);
    state = commit(&state, PlayerId::SECOND, 1);
    state = reduce(&state, &GameAction::NextRound, &config());
    state = commit(&state, PlayerId::FIRST, 2);
    state = commit(&state, PlayerId::SECOND, 1);

    let result = aggregate(&state);
    assert_eq!(result.final_scores, (6, 8));
    assert_eq!(result.winner.as_ref().unwrap().name, "Player 1");
}

#[test]
fn test_early_termination_counts_played_rounds_only() {
    let mut state = start(GameMode::Pvp, 5);
    state = commit(&state, PlayerId::FIRST, 5);
    state = commit(&state, PlayerId::SECOND, 3);
    let state = finish(&state);

    let result = state.history.latest().unwrap();
    assert_eq!(result.total_rounds, 1);
    assert_eq!(result.winner.as_ref().unwrap().name, "Player 1");
}

#[test]
fn test_machine_double_roll_rejected() {
    let mut machine = GameStateMachine::with_seed(GameConfig::default(), 7);
    machine.start(GameMode::Pvp, 5).unwrap();
    machine.roll_dice(PlayerId::FIRST).unwrap();

    let err = machine.roll_dice(PlayerId::FIRST).unwrap_err();
    assert!(matches!(err, GameError::InvalidState { .. }));
    assert!(!err.is_recoverable());
    // The rejected roll changed nothing.
    assert_eq!(machine.state().phase, GamePhase::InRound);
    assert!(!machine.state().has_rolled(PlayerId::SECOND));
}

#[test]
fn test_machine_next_round_idempotent_everywhere() {
    let mut machine = GameStateMachine::with_seed(GameConfig::default(), 7);

    // Before any game.
    let before = machine.state().clone();
    machine.next_round().unwrap();
    assert_eq!(machine.state(), &before);

    // Mid-round, with one roll pending.
    machine.start(GameMode::Pvp, 1).unwrap();
    machine.roll_dice(PlayerId::FIRST).unwrap();
    let before = machine.state().clone();
    machine.next_round().unwrap();
    assert_eq!(machine.state(), &before);

    // At the final resolved round.
    machine.roll_dice(PlayerId::SECOND).unwrap();
    let before = machine.state().clone();
    machine.next_round().unwrap();
    machine.next_round().unwrap();
    assert_eq!(machine.state(), &before);
}

#[test]
fn test_machine_pvc_names_computer_opponent() {
    let mut machine = GameStateMachine::with_seed(GameConfig::default(), 7);
    machine.start(GameMode::Pvc, 5).unwrap();

    let second = machine.state().player(PlayerId::SECOND);
    assert_eq!(second.name, "Computer");
    assert!(second.is_computer);

    // A PvP restart takes the slot back.
    machine.start(GameMode::Pvp, 5).unwrap();
    let second = machine.state().player(PlayerId::SECOND);
    assert_eq!(second.name, "Player 2");
    assert!(!second.is_computer);
}

#[test]
fn test_history_keeps_five_most_recent_of_six_games() {
    let mut machine = GameStateMachine::with_seed(GameConfig::default(), 7);

    // Six games of increasing length; total_rounds marks each game.
    for game in 1..=6u32 {
        machine.start(GameMode::Pvp, 6).unwrap();
        for round in 1..=game {
            machine.roll_dice(PlayerId::FIRST).unwrap();
            machine.roll_dice(PlayerId::SECOND).unwrap();
            if round < game {
                machine.next_round().unwrap();
            }
        }
        machine.end_game().unwrap();
    }

    let history = &machine.state().history;
    assert_eq!(history.len(), 5);
    let rounds: Vec<_> = history.iter().map(|r| r.total_rounds).collect();
    assert_eq!(rounds, vec![6, 5, 4, 3, 2]);
}

#[test]
fn test_history_survives_reset_and_restart() {
    let mut machine = GameStateMachine::with_seed(GameConfig::default(), 7);
    machine.start(GameMode::Pvp, 1).unwrap();
    machine.roll_dice(PlayerId::FIRST).unwrap();
    machine.roll_dice(PlayerId::SECOND).unwrap();
    machine.end_game().unwrap();

    machine.reset();
    assert_eq!(machine.state().history.len(), 1);

    machine.start(GameMode::Pvc, 3).unwrap();
    assert_eq!(machine.state().history.len(), 1);
}

#[test]
fn test_configured_history_capacity_applies() {
    let config = GameConfig::new().with_history_capacity(2);
    let mut machine = GameStateMachine::with_seed(config, 7);

    for _ in 0..3 {
        machine.start(GameMode::Pvp, 5).unwrap();
        machine.end_game().unwrap();
    }

    assert_eq!(machine.state().history.len(), 2);
}

#[test]
fn test_rolls_clear_between_rounds() {
    let mut machine = GameStateMachine::with_seed(GameConfig::default(), 7);
    machine.start(GameMode::Pvp, 5).unwrap();
    machine.roll_dice(PlayerId::FIRST).unwrap();
    machine.roll_dice(PlayerId::SECOND).unwrap();
    machine.next_round().unwrap();

    assert_eq!(machine.state().current_round, 2);
    assert!(!machine.state().has_rolled(PlayerId::FIRST));
    assert!(!machine.state().has_rolled(PlayerId::SECOND));
    // The previous round's scores stay on the board.
    let scores = machine.state().players.map(|p| p.score);
    assert!(scores[PlayerId::FIRST] > 0);
    assert!(scores[PlayerId::SECOND] > 0);
}
