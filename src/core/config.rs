//! Rule constants and per-game settings.
//!
//! Constants mirror the official rules and the content collaborator's
//! contract. `GameSettings` is the part of configuration stored in state.

use serde::{Deserialize, Serialize};

/// Default turn length in seconds.
pub const DEFAULT_TURN_SECONDS: u32 = 60;

/// Default score needed to win.
pub const DEFAULT_TARGET_SCORE: u32 = 30;

/// Uncuff lifelines each team starts with.
pub const STARTING_UNCUFF: u8 = 2;

/// Steal lifelines each team starts with.
pub const STARTING_STEAL: u8 = 2;

pub const MIN_TEAMS: usize = 2;
pub const MAX_TEAMS: usize = 4;
pub const MIN_PLAYERS_PER_TEAM: usize = 2;

/// Maximum event log entries kept (newest first).
pub const LOG_CAPACITY: usize = 300;

/// Prompts each category must contain for a bank to be accepted.
pub const EXPECTED_CARDS_PER_CATEGORY: usize = 65;

/// Key the persisted snapshot is stored under.
pub const STORAGE_KEY: &str = "voice-charades-state-v1";

/// Snapshot format version. Snapshots with any other version are ignored.
pub const STORAGE_VERSION: u32 = 1;

/// Settings chosen at setup and carried in state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSettings {
    /// Length of each turn's timer.
    pub turn_seconds: u32,

    /// Whether the optional party-play card preview is offered.
    pub party_play_enabled: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            turn_seconds: DEFAULT_TURN_SECONDS,
            party_play_enabled: false,
        }
    }
}

impl GameSettings {
    #[must_use]
    pub fn with_turn_seconds(mut self, seconds: u32) -> Self {
        self.turn_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_party_play(mut self, enabled: bool) -> Self {
        self.party_play_enabled = enabled;
        self
    }
}
