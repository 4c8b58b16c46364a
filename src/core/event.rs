//! Game event log entries.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::clock::Timestamp;
use super::ids::EventId;

/// What happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    RoundStarted,
    DieRolled,
    CardDrawn,
    CardScored,
    Pass,
    Penalty,
    StealLocked,
    StealResolved,
    RoundScored,
    WinnerDeclared,
    TiebreakStarted,
}

impl EventKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EventKind::RoundStarted => "round_started",
            EventKind::DieRolled => "die_rolled",
            EventKind::CardDrawn => "card_drawn",
            EventKind::CardScored => "card_scored",
            EventKind::Pass => "pass",
            EventKind::Penalty => "penalty",
            EventKind::StealLocked => "steal_locked",
            EventKind::StealResolved => "steal_resolved",
            EventKind::RoundScored => "round_scored",
            EventKind::WinnerDeclared => "winner_declared",
            EventKind::TiebreakStarted => "tiebreak_started",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry in the game log.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameEvent {
    pub id: EventId,
    pub timestamp: Timestamp,
    pub kind: EventKind,
    pub message: String,
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.id, self.kind, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_display() {
        let event = GameEvent {
            id: EventId(7),
            timestamp: Timestamp(1_000),
            kind: EventKind::StealLocked,
            message: "Team 2 locked a steal".to_string(),
        };
        assert_eq!(event.to_string(), "[evt-7] steal_locked: Team 2 locked a steal");
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&EventKind::TiebreakStarted).unwrap();
        assert_eq!(json, "\"tiebreak_started\"");
    }
}
