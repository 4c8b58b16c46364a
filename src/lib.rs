//! # voice-charades
//!
//! Rules engine for a team party game: one player per team acts out a
//! prompt with sounds only, under a timer, with steal and uncuff lifelines.
//!
//! ## Design Principles
//!
//! 1. **Pure Transitions**: `rules::transition` maps (state, intent, time)
//!    to a new state. It never blocks, never performs I/O and never reads a
//!    clock or an entropy source.
//!
//! 2. **Ignore, Don't Fail**: an intent whose preconditions don't hold
//!    returns the prior state unchanged. Only content loading, setup and
//!    storage have error types.
//!
//! 3. **Reproducible Decks**: prompt order comes from a string-seeded
//!    generator, one independent shuffle per category.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im` so every
//!   transition produces a fresh value.
//!
//! - **Deferred Scoring**: cards and penalties accrue in the round and are
//!   applied to team scores only when the round ends.
//!
//! ## Modules
//!
//! - `core`: ids, time, randomness, configuration, intents and state
//! - `cards`: categories, prompt cards, the validated bank, decks
//! - `rules`: transitions, scoring, turn order, diagnostics
//! - `setup`: setup validation and the `GameConfig` builder
//! - `persist`: versioned snapshots and snapshot stores
//! - `session`: host-side session tying state, clock and storage together

pub mod cards;
pub mod core;
pub mod error;
pub mod persist;
pub mod rules;
pub mod session;
pub mod setup;

// Re-export commonly used types
pub use crate::core::{
    Action, CardId, Clock, EventKind, GameEvent, GameRng, GameSettings, GameState, GameStatus,
    InitGame, ManualClock, PenaltyKind, PlayerId, RoundMode, RoundState, SystemClock, Team, TeamId,
    Timestamp,
};

pub use crate::cards::{Category, DeckState, DieFace, PromptBank, PromptCard};

pub use crate::error::{IgnoredIntent, PersistError, PromptBankError, SetupError};

pub use crate::rules::{legal_actions, transition, try_transition, RoundOutcome};

pub use crate::persist::{FileStore, MemoryStore, Snapshot, SnapshotStore};

pub use crate::session::GameSession;

pub use crate::setup::{GameConfig, TeamSetup};
