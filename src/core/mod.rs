//! Core game types: ids, time, randomness, configuration, intents, state.
//!
//! Nothing here knows the rules. The `rules` module interprets these
//! types; hosts build them through `setup` and drive them through
//! `session`.

pub mod action;
pub mod clock;
pub mod config;
pub mod event;
pub mod ids;
pub mod rng;
pub mod state;

pub use action::{Action, InitGame};
pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use config::GameSettings;
pub use event::{EventKind, GameEvent};
pub use ids::{CardId, EventId, PlayerId, TeamId};
pub use rng::{roll_die, seed_hash, shuffle, GameRng, SeededRng};
pub use state::{
    GameState, GameStatus, PenaltyEvent, PenaltyKind, Player, ResolvedCard, ResolvedVia,
    RoundMode, RoundState, Team,
};
