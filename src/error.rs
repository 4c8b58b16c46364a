//! Error types.
//!
//! The transition function has no error channel; invalid intents are
//! ignored (see `IgnoredIntent`). Errors only exist at the edges: loading
//! prompt content, validating setup input, and talking to snapshot storage.

use thiserror::Error;

use crate::cards::Category;
use crate::core::CardId;

/// One problem found while validating a prompt bank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankViolation {
    #[error("category {category} expected {expected} cards but got {actual}")]
    WrongCount {
        category: Category,
        expected: usize,
        actual: usize,
    },

    #[error("category {category} has duplicate prompt text \"{text}\"")]
    DuplicateText { category: Category, text: String },

    #[error("card {card_id} has empty text")]
    EmptyText { card_id: CardId },

    #[error("card {card_id} has invalid points value {points}")]
    InvalidPoints { card_id: CardId, points: u8 },

    #[error("card id {card_id} is used by more than one card")]
    DuplicateId { card_id: CardId },
}

/// Prompt content could not be accepted.
#[derive(Debug, Error)]
pub enum PromptBankError {
    #[error("failed to parse prompt content: {0}")]
    Parse(#[from] serde_json::Error),

    /// Every violation found, not only the first.
    #[error("prompt validation failed: {}", join(.0))]
    Invalid(Vec<BankViolation>),
}

impl PromptBankError {
    /// Violations carried by an `Invalid` error; empty for parse failures.
    #[must_use]
    pub fn violations(&self) -> &[BankViolation] {
        match self {
            PromptBankError::Invalid(violations) => violations,
            PromptBankError::Parse(_) => &[],
        }
    }
}

/// One problem found in setup input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupViolation {
    #[error("use {min} to {max} teams (got {count})")]
    TeamCount { count: usize, min: usize, max: usize },

    #[error("team {team} needs a name")]
    EmptyTeamName { team: usize },

    #[error("team {team} needs at least {min} players (got {count})")]
    TooFewPlayers { team: usize, count: usize, min: usize },

    #[error("team {team}, player {player} needs a name")]
    EmptyPlayerName { team: usize, player: usize },

    #[error("target score must be a positive whole number")]
    TargetScore,

    #[error("turn timer must be a positive whole number of seconds")]
    TurnSeconds,
}

/// Setup input was rejected. Team and player numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("game setup is invalid: {}", join(.violations))]
pub struct SetupError {
    pub violations: Vec<SetupViolation>,
}

/// Why an intent left the game unchanged.
///
/// Not a failure: `rules::transition` swallows these and returns the prior
/// state. `rules::try_transition` exposes them for hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IgnoredIntent {
    #[error("game is not in progress")]
    NotInGame,

    #[error("no card is active")]
    NoActiveCard,

    #[error("no category has been chosen")]
    NoCategory,

    #[error("chosen category has no cards")]
    EmptyCategory,

    #[error("only allowed in normal rounds")]
    NotNormalMode,

    #[error("only allowed in all-in rounds")]
    NotAllInMode,

    #[error("only allowed during a tiebreak")]
    NotTiebreak,

    #[error("timer is not running")]
    TimerStopped,

    #[error("timer has no time left")]
    TimerExpired,

    #[error("unknown team")]
    UnknownTeam,

    #[error("player is not on that team")]
    UnknownPlayer,

    #[error("no team is active")]
    NoActiveTeam,

    #[error("no team to award")]
    NoAwardedTeams,

    #[error("lifeline already used up")]
    NoLifelineLeft,

    #[error("a steal is already locked")]
    StealAlreadyLocked,

    #[error("no steal is locked")]
    NoStealLock,

    #[error("active team cannot steal its own card")]
    StealFromSelf,

    #[error("a card is already active")]
    CardAlreadyActive,

    #[error("no team has reached the target score")]
    NoTeamAtTarget,

    #[error("nothing would change")]
    Unchanged,
}

/// Snapshot storage failure.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("snapshot storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot encoding failed: {0}")]
    Encode(#[from] bincode::Error),
}

fn join<'a, T: std::fmt::Display + 'a>(items: impl IntoIterator<Item = &'a T>) -> String {
    items
        .into_iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" | ")
}
