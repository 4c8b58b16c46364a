//! Round scoring and win detection.
//!
//! Round results are applied to team scores only at round end:
//! 1. Every resolved card adds its points to each team it was awarded to.
//! 2. Every penalty adds one point to every team except its source.
//!
//! Penalties are not deduplicated: three penalties against team A give
//! every other team three points.

use im::Vector;
use rustc_hash::FxHashMap;

use crate::cards::DeckState;
use crate::core::{GameState, RoundState, Team, TeamId};

/// Where the game stands after a score check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Exactly one team reached the target.
    Winner(TeamId),
    /// Several teams reached the target together.
    Tie(Vec<TeamId>),
    /// Nobody reached the target.
    Continue,
}

impl RoundOutcome {
    /// Classify teams against a target score.
    #[must_use]
    pub fn from_scores<'a>(teams: impl IntoIterator<Item = &'a Team>, target: u32) -> Self {
        let mut reached: Vec<TeamId> = teams
            .into_iter()
            .filter(|t| t.score >= target)
            .map(|t| t.id.clone())
            .collect();

        match reached.len() {
            0 => RoundOutcome::Continue,
            1 => RoundOutcome::Winner(reached.remove(0)),
            _ => RoundOutcome::Tie(reached),
        }
    }

    /// Check if a team won outright.
    #[must_use]
    pub fn is_winner(&self, team: &TeamId) -> bool {
        matches!(self, RoundOutcome::Winner(id) if id == team)
    }
}

/// A team's score as it would stand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamScore {
    pub team_id: TeamId,
    pub score: u32,
}

/// Points each team would gain if the round ended now.
///
/// Cards no longer in the deck's catalog score nothing.
#[must_use]
pub fn round_gains(teams: &Vector<Team>, round: &RoundState, decks: &DeckState) -> FxHashMap<TeamId, u32> {
    let mut gains: FxHashMap<TeamId, u32> = teams.iter().map(|t| (t.id.clone(), 0)).collect();

    for resolved in &round.resolved_cards {
        let Some(card) = decks.card(&resolved.card_id) else {
            continue;
        };
        for team_id in &resolved.awarded_team_ids {
            *gains.entry(team_id.clone()).or_insert(0) += u32::from(card.points);
        }
    }

    for penalty in &round.penalties {
        for team in teams {
            if team.id != penalty.source_team_id {
                *gains.entry(team.id.clone()).or_insert(0) += 1;
            }
        }
    }

    gains
}

/// Teams with this round's results applied.
#[must_use]
pub fn score_round(teams: &Vector<Team>, round: &RoundState, decks: &DeckState) -> Vector<Team> {
    let gains = round_gains(teams, round, decks);
    teams
        .iter()
        .map(|team| {
            let mut team = team.clone();
            team.score += gains.get(&team.id).copied().unwrap_or(0);
            team
        })
        .collect()
}

/// Live scores: current totals plus the pending round, in seat order.
///
/// Does not change the state.
#[must_use]
pub fn preview_scores(state: &GameState) -> Vec<TeamScore> {
    let gains = round_gains(&state.teams, &state.round, &state.decks);
    state
        .teams
        .iter()
        .map(|team| TeamScore {
            team_id: team.id.clone(),
            score: team.score + gains.get(&team.id).copied().unwrap_or(0),
        })
        .collect()
}

/// Teams sharing the highest score, in seat order.
#[must_use]
pub fn leading_teams(scores: &[TeamScore]) -> Vec<TeamId> {
    let Some(max) = scores.iter().map(|s| s.score).max() else {
        return Vec::new();
    };
    scores
        .iter()
        .filter(|s| s.score == max)
        .map(|s| s.team_id.clone())
        .collect()
}
