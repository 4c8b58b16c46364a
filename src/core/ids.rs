//! Identifiers for teams, players, prompt cards and log entries.
//!
//! Team and player ids follow the setup convention:
//! - Teams: `team-<n>` (1-based)
//! - Players: `<team-id>-player-<n>` (1-based within the team)
//!
//! ```
//! use voice_charades::core::{PlayerId, TeamId};
//!
//! let team = TeamId::for_index(0);
//! assert_eq!(team.as_str(), "team-1");
//! assert_eq!(PlayerId::for_team(&team, 1).as_str(), "team-1-player-2");
//! ```

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an id from any string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw id.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Team identifier (`team-1`, `team-2`, ...).
    TeamId
);

string_id!(
    /// Player identifier, scoped under its team id.
    PlayerId
);

string_id!(
    /// Prompt card identifier, assigned by the content files.
    CardId
);

impl TeamId {
    /// Id for the team at a 0-based setup position.
    #[must_use]
    pub fn for_index(index: usize) -> Self {
        Self(format!("team-{}", index + 1))
    }
}

impl PlayerId {
    /// Id for the player at a 0-based position within `team`.
    #[must_use]
    pub fn for_team(team: &TeamId, index: usize) -> Self {
        Self(format!("{}-player-{}", team, index + 1))
    }
}

/// Sequence number of an entry in the game's event log.
///
/// Allocated from a per-game counter so replays produce identical logs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventId(pub u64);

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "evt-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_ids_are_one_based() {
        assert_eq!(TeamId::for_index(0).as_str(), "team-1");
        assert_eq!(TeamId::for_index(3).as_str(), "team-4");
    }

    #[test]
    fn test_player_ids_are_scoped_to_team() {
        let team = TeamId::for_index(2);
        assert_eq!(PlayerId::for_team(&team, 0).as_str(), "team-3-player-1");
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&CardId::new("action-001")).unwrap();
        assert_eq!(json, "\"action-001\"");

        let back: CardId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CardId::from("action-001"));
    }

    #[test]
    fn test_event_id_display() {
        assert_eq!(format!("{}", EventId(7)), "evt-7");
    }
}
