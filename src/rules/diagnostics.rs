//! Host harness helpers: a text dump of the state and wall-clock replay.

use serde_json::json;

use super::engine::transition;
use crate::core::{Action, GameState, Timestamp};

/// Compact JSON summary of what a player would see.
///
/// ```
/// use voice_charades::core::GameState;
/// use voice_charades::rules::diagnostic_text;
///
/// let text = diagnostic_text(&GameState::empty());
/// assert!(text.contains("\"status\":\"setup\""));
/// ```
#[must_use]
pub fn diagnostic_text(state: &GameState) -> String {
    let round = &state.round;
    let active_card = round
        .active_card_id
        .as_ref()
        .and_then(|id| state.decks.card(id));
    let scores: Vec<_> = state
        .teams
        .iter()
        .map(|t| {
            json!({
                "team": t.name,
                "score": t.score,
                "uncuff": t.uncuff_remaining,
                "steal": t.steal_remaining,
            })
        })
        .collect();

    json!({
        "mode": round.mode,
        "status": state.status,
        "activeTeam": state.active_team().map(|t| &t.name),
        "activePlayer": state.active_player().map(|p| &p.name),
        "timerSecondsLeft": round.timer_seconds_left,
        "category": round.chosen_category,
        "dieFace": round.die_face,
        "activeCard": active_card,
        "scores": scores,
    })
    .to_string()
}

/// Number of one-second ticks `millis` of wall time stands for.
///
/// Rounds to the nearest second, never less than one.
#[must_use]
pub fn ticks_for(millis: u64) -> u64 {
    ((millis + 500) / 1000).max(1)
}

/// Replay `millis` of wall time as one-second timer ticks.
///
/// Ticks after the timer stops are ignored like any other tick.
#[must_use]
pub fn advance_time(state: &GameState, millis: u64, now: Timestamp) -> GameState {
    let tick = Action::tick();
    (0..ticks_for(millis)).fold(state.clone(), |acc, _| transition(&acc, &tick, now))
}
