//! Shared fixtures for integration tests.

#![allow(dead_code)]

use voice_charades::cards::{Category, PromptBank, PromptCard};
use voice_charades::core::config::EXPECTED_CARDS_PER_CATEGORY;
use voice_charades::core::{Action, GameState, PlayerId, Team, TeamId, Timestamp};
use voice_charades::rules::transition;
use voice_charades::setup::GameConfig;

pub const T0: Timestamp = Timestamp(1_700_000_000_000);

/// `per_category` cards in every category, all worth `points`.
pub fn cards(per_category: usize, points: u8) -> Vec<PromptCard> {
    Category::ALL
        .iter()
        .flat_map(|&category| {
            (0..per_category).map(move |i| {
                PromptCard::new(
                    format!("{category}-{i:03}"),
                    category,
                    format!("{category} prompt {i}"),
                    points,
                )
            })
        })
        .collect()
}

/// A full, valid bank where every card is worth `points`.
pub fn bank(points: u8) -> PromptBank {
    PromptBank::new(cards(EXPECTED_CARDS_PER_CATEGORY, points)).unwrap()
}

pub fn team_id(n: usize) -> TeamId {
    TeamId::new(format!("team-{n}"))
}

pub fn player_id(team: usize, player: usize) -> PlayerId {
    PlayerId::new(format!("team-{team}-player-{player}"))
}

/// Apply actions in order at `T0`.
pub fn run(state: &GameState, actions: &[Action]) -> GameState {
    actions
        .iter()
        .fold(state.clone(), |acc, action| transition(&acc, action, T0))
}

/// A game in progress: `team_count` teams of two players, team 1's first
/// player giving clues, first round started. Every card is worth `points`.
pub fn new_game(team_count: usize, target_score: u32, points: u8) -> GameState {
    let mut config = GameConfig::new().target_score(target_score);
    for i in 1..=team_count {
        config = config.team(format!("Team {i}"), [format!("Ada {i}"), format!("Ben {i}")]);
    }
    let init = config.build(&bank(points), "fixture-seed").unwrap();

    run(
        &GameState::empty(),
        &[
            Action::InitGame(Box::new(init)),
            Action::AssignFirstClueGiver {
                team_id: team_id(1),
                player_id: player_id(1, 1),
            },
            Action::StartRound,
        ],
    )
}

/// Roll a category, draw a card and start the clock.
pub fn live_card(state: &GameState) -> GameState {
    run(
        state,
        &[
            Action::RollDie {
                face: voice_charades::cards::DieFace::Action,
            },
            Action::DrawNextCard,
            Action::StartTimer,
        ],
    )
}

pub fn team(state: &GameState, n: usize) -> &Team {
    state.team(&team_id(n)).unwrap()
}

pub fn scores(state: &GameState) -> Vec<u32> {
    state.teams.iter().map(|t| t.score).collect()
}
