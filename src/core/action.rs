//! Intents: the named transitions a host can request.
//!
//! Every action is a plain value. The rules decide whether it applies to
//! the current state; an action that doesn't apply is ignored. For example:
//! - `DrawNextCard` with no chosen category does nothing
//! - `RequestStealLock` from the active team does nothing
//! - anything but `InitGame`, `Rehydrate` and `Reset` does nothing
//!   outside a game in progress

use serde::{Deserialize, Serialize};

use super::config::GameSettings;
use super::ids::{PlayerId, TeamId};
use super::state::{GameState, PenaltyKind, Player, Team};
use crate::cards::{Category, DeckState, DieFace};

/// Everything needed to start a game.
///
/// Usually produced by `setup::GameConfig::build`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitGame {
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
    pub target_score: u32,
    pub settings: GameSettings,
    pub decks: DeckState,
}

/// A requested transition.
///
/// ## Example
///
/// ```
/// use voice_charades::cards::DieFace;
/// use voice_charades::core::{Action, TeamId};
///
/// let roll = Action::RollDie { face: DieFace::Object };
/// assert_eq!(roll.name(), "roll_die");
///
/// let steal = Action::RequestStealLock { team_id: TeamId::new("team-2") };
/// assert_eq!(steal.name(), "request_steal_lock");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Install teams, players, settings and decks; status becomes in-game.
    InitGame(Box<InitGame>),

    /// Choose the first Sound Master explicitly.
    AssignFirstClueGiver { team_id: TeamId, player_id: PlayerId },

    /// Clear per-round state, keeping the active team and player.
    StartRound,

    RollDie { face: DieFace },

    /// Pick the category for an all-in round before drawing.
    SetAllInCategory { category: Category },

    DrawNextCard,

    /// Score the active card. Team ids only matter in all-in rounds.
    MarkCorrect { team_ids: Vec<TeamId> },

    MarkPass,

    /// Log a penalty against `source_team_id`, or the active team if `None`.
    ApplyPenalty {
        kind: PenaltyKind,
        source_team_id: Option<TeamId>,
    },

    ActivateUncuff,

    RequestStealLock { team_id: TeamId },

    ResolveSteal { correct: bool },

    /// Void the active card without scoring or penalty.
    MarkDeadCard,

    StartTimer,

    TimerTick { seconds: u32 },

    EndRoundAndScore,

    /// Check the target score without scoring the round.
    CheckWinOrTiebreak,

    StartTiebreakAllIn,

    /// Declare a tiebreak winner, or let the leader win.
    ResolveTiebreak { winner_team_id: Option<TeamId> },

    /// Pass play clockwise without scoring.
    AdvanceToNextTeam,

    /// Replace the whole state with a trusted snapshot.
    Rehydrate(Box<GameState>),

    /// Discard everything and return to setup.
    Reset,
}

impl Action {
    /// Stable snake_case name, used in logs and diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Action::InitGame(_) => "init_game",
            Action::AssignFirstClueGiver { .. } => "assign_first_clue_giver",
            Action::StartRound => "start_round",
            Action::RollDie { .. } => "roll_die",
            Action::SetAllInCategory { .. } => "set_all_in_category",
            Action::DrawNextCard => "draw_next_card",
            Action::MarkCorrect { .. } => "mark_correct",
            Action::MarkPass => "mark_pass",
            Action::ApplyPenalty { .. } => "apply_penalty",
            Action::ActivateUncuff => "activate_uncuff",
            Action::RequestStealLock { .. } => "request_steal_lock",
            Action::ResolveSteal { .. } => "resolve_steal",
            Action::MarkDeadCard => "mark_dead_card",
            Action::StartTimer => "start_timer",
            Action::TimerTick { .. } => "timer_tick",
            Action::EndRoundAndScore => "end_round_and_score",
            Action::CheckWinOrTiebreak => "check_win_or_tiebreak",
            Action::StartTiebreakAllIn => "start_tiebreak_all_in",
            Action::ResolveTiebreak { .. } => "resolve_tiebreak",
            Action::AdvanceToNextTeam => "advance_to_next_team",
            Action::Rehydrate(_) => "rehydrate",
            Action::Reset => "reset",
        }
    }

    /// Actions that apply regardless of game status.
    #[must_use]
    pub fn ignores_status(&self) -> bool {
        matches!(self, Action::InitGame(_) | Action::Rehydrate(_) | Action::Reset)
    }

    /// Shorthand for a one-second tick.
    #[must_use]
    pub const fn tick() -> Self {
        Action::TimerTick { seconds: 1 }
    }
}
