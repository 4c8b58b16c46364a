//! Game rules.
//!
//! - `engine`: the transition function and legal-intent enumeration
//! - `scoring`: round scoring, live previews, win detection
//! - `rotation`: clockwise turn order
//! - `diagnostics`: text dump and time replay for host harnesses
//!
//! None of this performs I/O or reads a clock; time comes in as an
//! argument.

pub mod diagnostics;
pub mod engine;
pub mod rotation;
pub mod scoring;

pub use diagnostics::{advance_time, diagnostic_text, ticks_for};
pub use engine::{legal_actions, transition, try_transition};
pub use rotation::{advance_clockwise, Rotation};
pub use scoring::{leading_teams, preview_scores, round_gains, score_round, RoundOutcome, TeamScore};
