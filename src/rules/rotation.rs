//! Clockwise turn order.
//!
//! Teams sit in setup order. Play passes to the team after the one that
//! was active, wrapping at the end. Each team keeps its own player cursor,
//! which wraps modulo that team's player count.

use im::Vector;

use crate::core::{PlayerId, Team, TeamId};

/// Result of passing play clockwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rotation {
    /// Teams with the next team's player cursor advanced.
    pub teams: Vector<Team>,
    pub next_team_id: Option<TeamId>,
    pub next_player_id: Option<PlayerId>,
}

/// Pass play to the team after `active`.
///
/// An unknown or missing active team counts as the first seat, so play
/// passes to the second. The next team's Sound Master is the player at its
/// cursor, and the cursor moves one past them.
#[must_use]
pub fn advance_clockwise(teams: &Vector<Team>, active: Option<&TeamId>) -> Rotation {
    if teams.is_empty() {
        return Rotation {
            teams: teams.clone(),
            next_team_id: None,
            next_player_id: None,
        };
    }

    let current = active
        .and_then(|id| teams.iter().position(|t| &t.id == id))
        .unwrap_or(0);
    let next_index = (current + 1) % teams.len();

    let mut teams = teams.clone();
    let mut next_player_id = None;
    let mut next_team_id = None;

    if let Some(team) = teams.get_mut(next_index) {
        next_team_id = Some(team.id.clone());
        let count = team.player_ids.len();
        if count > 0 {
            let draw = team.next_player_index % count;
            next_player_id = team.player_ids.get(draw).cloned();
            team.next_player_index = (draw + 1) % count;
        }
    }

    Rotation {
        teams,
        next_team_id,
        next_player_id,
    }
}
