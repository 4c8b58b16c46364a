//! Round-end scoring, win detection, tiebreaks and turn rotation.

mod common;

use common::{live_card, new_game, player_id, run, scores, team, team_id, T0};
use voice_charades::cards::{Category, DieFace};
use voice_charades::core::{Action, EventKind, GameStatus, PenaltyKind, RoundMode, TeamId};
use voice_charades::error::IgnoredIntent;
use voice_charades::rules::{preview_scores, transition, try_transition, TeamScore};

fn penalty_against(n: usize) -> Action {
    Action::ApplyPenalty {
        kind: PenaltyKind::MovementOnlyNoSound,
        source_team_id: Some(team_id(n)),
    }
}

fn all_in_card(category: Category) -> Vec<Action> {
    vec![
        Action::RollDie { face: DieFace::AllIn },
        Action::SetAllInCategory { category },
        Action::DrawNextCard,
    ]
}

#[test]
fn test_card_and_pass_penalty_example() {
    let state = run(
        &live_card(&new_game(2, 30, 2)),
        &[
            Action::MarkCorrect { team_ids: Vec::new() },
            Action::DrawNextCard,
            Action::MarkPass,
            Action::EndRoundAndScore,
        ],
    );

    assert_eq!(scores(&state), vec![2, 1]);
    assert_eq!(state.status, GameStatus::InGame);
    assert!(state.winner_team_ids.is_empty());
    assert!(state.log.iter().any(|e| e.kind == EventKind::RoundScored));
}

#[test]
fn test_every_penalty_counts() {
    let state = run(
        &new_game(3, 30, 1),
        &[
            penalty_against(1),
            penalty_against(1),
            penalty_against(2),
            Action::EndRoundAndScore,
        ],
    );
    assert_eq!(scores(&state), vec![1, 2, 3]);
}

#[test]
fn test_scores_accumulate_across_rounds() {
    let mut state = new_game(2, 30, 3);
    for _ in 0..3 {
        state = run(
            &live_card(&state),
            &[Action::MarkCorrect { team_ids: Vec::new() }, Action::EndRoundAndScore],
        );
    }
    // team-1, team-2, team-1
    assert_eq!(scores(&state), vec![6, 3]);
}

#[test]
fn test_preview_does_not_commit() {
    let state = run(
        &live_card(&new_game(2, 30, 3)),
        &[Action::MarkCorrect { team_ids: Vec::new() }, penalty_against(2)],
    );

    assert_eq!(
        preview_scores(&state),
        vec![
            TeamScore { team_id: team_id(1), score: 4 },
            TeamScore { team_id: team_id(2), score: 0 },
        ]
    );
    assert_eq!(scores(&state), vec![0, 0]);
}

#[test]
fn test_single_team_at_target_wins() {
    let state = run(
        &live_card(&new_game(2, 3, 3)),
        &[Action::MarkCorrect { team_ids: Vec::new() }, Action::EndRoundAndScore],
    );

    assert_eq!(state.status, GameStatus::Finished);
    assert_eq!(state.winner_team_ids, vec![team_id(1)]);
    assert!(!state.round.timer_running);
    assert_eq!(state.round.active_card_id, None);
    assert_eq!(state.log[0].kind, EventKind::WinnerDeclared);
    assert_eq!(state.log[0].message, "Team 1 wins the game.");

    // Finished games ignore play.
    assert_eq!(
        try_transition(&state, &Action::StartRound, T0),
        Err(IgnoredIntent::NotInGame)
    );
}

#[test]
fn test_tie_at_target_starts_tiebreak() {
    let state = run(
        &live_card(&new_game(2, 2, 2)),
        &[
            Action::MarkCorrect { team_ids: Vec::new() },
            penalty_against(1),
            penalty_against(1),
            Action::EndRoundAndScore,
        ],
    );

    assert_eq!(scores(&state), vec![2, 2]);
    assert_eq!(state.status, GameStatus::InGame);
    assert!(state.winner_team_ids.is_empty());
    assert_eq!(state.round.mode, RoundMode::TiebreakAllIn);
    assert_eq!(state.round.die_face, DieFace::AllIn);
    assert_eq!(state.round.active_team_id, Some(team_id(2)));
    assert_eq!(state.round.active_player_id, Some(player_id(2, 1)));
    assert_eq!(state.log[0].kind, EventKind::TiebreakStarted);
}

fn tied_game() -> voice_charades::core::GameState {
    run(
        &live_card(&new_game(2, 2, 2)),
        &[
            Action::MarkCorrect { team_ids: Vec::new() },
            penalty_against(1),
            penalty_against(1),
            Action::EndRoundAndScore,
        ],
    )
}

#[test]
fn test_tiebreak_leader_wins() {
    let mut actions = all_in_card(Category::Incident);
    actions.push(Action::MarkCorrect {
        team_ids: vec![team_id(2)],
    });
    actions.push(Action::ResolveTiebreak { winner_team_id: None });

    let state = run(&tied_game(), &actions);
    assert_eq!(state.status, GameStatus::Finished);
    assert_eq!(state.winner_team_ids, vec![team_id(2)]);
    // The deciding card is committed to the totals.
    assert_eq!(scores(&state), vec![2, 4]);
}

#[test]
fn test_tiebreak_still_tied_replays_same_team() {
    let mut actions = all_in_card(Category::Object);
    actions.push(Action::MarkCorrect {
        team_ids: vec![team_id(1), team_id(2)],
    });
    actions.push(Action::ResolveTiebreak { winner_team_id: None });

    let tied = tied_game();
    let state = run(&tied, &actions);
    assert_eq!(scores(&state), vec![4, 4]);
    assert_eq!(state.status, GameStatus::InGame);
    assert_eq!(state.round.mode, RoundMode::TiebreakAllIn);
    assert_eq!(state.round.active_team_id, tied.round.active_team_id);
    assert_eq!(state.round.active_player_id, tied.round.active_player_id);
    assert!(state.round.resolved_cards.is_empty());
}

#[test]
fn test_tiebreak_explicit_winner() {
    let state = run(
        &tied_game(),
        &[Action::ResolveTiebreak {
            winner_team_id: Some(team_id(1)),
        }],
    );
    assert_eq!(state.status, GameStatus::Finished);
    assert_eq!(state.winner_team_ids, vec![team_id(1)]);

    assert_eq!(
        try_transition(
            &tied_game(),
            &Action::ResolveTiebreak {
                winner_team_id: Some(TeamId::new("team-7")),
            },
            T0,
        ),
        Err(IgnoredIntent::UnknownTeam)
    );
}

#[test]
fn test_check_win_or_tiebreak() {
    let mut state = live_card(&new_game(3, 10, 1));
    state.teams[1].score = 12;
    let won = transition(&state, &Action::CheckWinOrTiebreak, T0);
    assert_eq!(won.status, GameStatus::Finished);
    assert_eq!(won.winner_team_ids, vec![team_id(2)]);

    state.teams[2].score = 10;
    let tied = transition(&state, &Action::CheckWinOrTiebreak, T0);
    assert_eq!(tied.status, GameStatus::InGame);
    assert_eq!(tied.round.mode, RoundMode::TiebreakAllIn);
    assert_eq!(tied.round.chosen_category, None);
    assert!(!tied.round.timer_running);
    assert_eq!(tied.round.active_card_id, None);
    assert_eq!(tied.round.active_team_id, Some(team_id(1)));
}

#[test]
fn test_clockwise_rotation_with_player_cursor() {
    let mut state = new_game(3, 30, 1);
    let mut seen = Vec::new();
    for _ in 0..4 {
        state = transition(&state, &Action::AdvanceToNextTeam, T0);
        seen.push((
            state.round.active_team_id.clone().unwrap(),
            state.round.active_player_id.clone().unwrap(),
        ));
    }

    assert_eq!(
        seen,
        vec![
            (team_id(2), player_id(2, 1)),
            (team_id(3), player_id(3, 1)),
            (team_id(1), player_id(1, 2)),
            (team_id(2), player_id(2, 2)),
        ]
    );
    assert_eq!(team(&state, 2).next_player_index, 0);
    assert_eq!(state.round.mode, RoundMode::Normal);
}

#[test]
fn test_round_end_rotates_from_active_team() {
    let state = run(&new_game(3, 30, 1), &[Action::AdvanceToNextTeam, Action::AdvanceToNextTeam]);
    assert_eq!(state.round.active_team_id, Some(team_id(3)));

    let state = transition(&state, &Action::EndRoundAndScore, T0);
    assert_eq!(state.round.active_team_id, Some(team_id(1)));
    assert_eq!(state.round.mode, RoundMode::Normal);
    assert_eq!(state.round.timer_seconds_left, 60);
}
