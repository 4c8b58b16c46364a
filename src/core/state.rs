//! Game state: teams, players, the current round, decks and the event log.
//!
//! ## GameState
//!
//! The aggregate value the rules transform. Built from `im` persistent
//! collections, so cloning is O(1) and every transition can return a new
//! value without disturbing the one it was given.
//!
//! ## RoundState
//!
//! Everything scoped to one clue-giver's turn:
//! - Mode (normal, all-in, tiebreak all-in), die face, chosen category
//! - Active team / player (the Sound Master)
//! - Timer
//! - The active card and any steal lock on it
//! - Cards resolved, penalties accrued and cards killed this round
//!
//! Round results are only applied to team scores at round end.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::clock::Timestamp;
use super::config::{GameSettings, LOG_CAPACITY, STARTING_STEAL, STARTING_UNCUFF};
use super::event::{EventKind, GameEvent};
use super::ids::{CardId, EventId, PlayerId, TeamId};
use crate::cards::{Category, DeckState, DieFace};

/// A team and its running totals.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Players in rotation order.
    pub player_ids: Vec<PlayerId>,
    pub score: u32,
    pub uncuff_remaining: u8,
    pub steal_remaining: u8,
    /// Rotation cursor: index of the next player to give clues.
    pub next_player_index: usize,
}

impl Team {
    /// New team with zero score and full lifelines.
    #[must_use]
    pub fn new(id: TeamId, name: impl Into<String>, player_ids: Vec<PlayerId>) -> Self {
        Self {
            id,
            name: name.into(),
            player_ids,
            score: 0,
            uncuff_remaining: STARTING_UNCUFF,
            steal_remaining: STARTING_STEAL,
            next_player_index: 0,
        }
    }

    /// Player the rotation cursor points at.
    #[must_use]
    pub fn next_clue_giver(&self) -> Option<&PlayerId> {
        if self.player_ids.is_empty() {
            return None;
        }
        self.player_ids.get(self.next_player_index % self.player_ids.len())
    }
}

/// A player. Immutable after setup.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub team_id: TeamId,
    pub name: String,
    /// Position within the team (0-based).
    pub order: usize,
}

/// Round variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundMode {
    /// Only the active team guesses; lifelines and pass penalties apply.
    #[default]
    Normal,
    /// Every team may guess the same card.
    AllIn,
    /// All-in round played to break a tie at the target score.
    TiebreakAllIn,
}

impl RoundMode {
    /// True for both all-in variants.
    #[must_use]
    pub const fn is_all_in(self) -> bool {
        matches!(self, RoundMode::AllIn | RoundMode::TiebreakAllIn)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            RoundMode::Normal => "normal",
            RoundMode::AllIn => "all_in",
            RoundMode::TiebreakAllIn => "tiebreak_all_in",
        }
    }
}

/// How a card came to be scored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedVia {
    TeamGuess,
    Steal,
    AllIn,
}

/// A card scored this round, and who gets its points.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedCard {
    pub card_id: CardId,
    pub awarded_team_ids: SmallVec<[TeamId; 4]>,
    pub via: ResolvedVia,
}

/// Rule infractions a referee can log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyKind {
    Pass,
    HandsUnclasped,
    PointedAtObject,
    UsedNonOnomatopoeia,
    UsedForbiddenOnomatopoeia,
    MovementOnlyNoSound,
}

impl PenaltyKind {
    pub const ALL: [PenaltyKind; 6] = [
        PenaltyKind::Pass,
        PenaltyKind::HandsUnclasped,
        PenaltyKind::PointedAtObject,
        PenaltyKind::UsedNonOnomatopoeia,
        PenaltyKind::UsedForbiddenOnomatopoeia,
        PenaltyKind::MovementOnlyNoSound,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PenaltyKind::Pass => "pass",
            PenaltyKind::HandsUnclasped => "hands_unclasped",
            PenaltyKind::PointedAtObject => "pointed_at_object",
            PenaltyKind::UsedNonOnomatopoeia => "used_non_onomatopoeia",
            PenaltyKind::UsedForbiddenOnomatopoeia => "used_forbidden_onomatopoeia",
            PenaltyKind::MovementOnlyNoSound => "movement_only_no_sound",
        }
    }
}

/// A penalty logged against a team. Every other team gains a point
/// per penalty when the round is scored.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PenaltyEvent {
    pub kind: PenaltyKind,
    pub source_team_id: TeamId,
    pub created_at: Timestamp,
}

/// State of the current round.
///
/// Invariants maintained by the rules:
/// - `active_card_id` is set only for a drawn card not yet resolved or dead
/// - `steal_lock_team_id` is set only in normal mode, with the timer
///   running and an active card
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub mode: RoundMode,
    pub die_face: DieFace,
    pub chosen_category: Option<Category>,
    pub active_team_id: Option<TeamId>,
    pub active_player_id: Option<PlayerId>,
    pub timer_seconds_left: u32,
    pub timer_running: bool,
    pub active_card_id: Option<CardId>,
    pub steal_lock_team_id: Option<TeamId>,
    pub uncuff_active: bool,
    pub resolved_cards: Vector<ResolvedCard>,
    pub penalties: Vector<PenaltyEvent>,
    pub dead_card_ids: Vector<CardId>,
}

impl RoundState {
    /// Fresh normal-mode round with a full timer.
    #[must_use]
    pub fn new(
        active_team_id: Option<TeamId>,
        active_player_id: Option<PlayerId>,
        turn_seconds: u32,
    ) -> Self {
        Self {
            mode: RoundMode::Normal,
            die_face: DieFace::Action,
            chosen_category: None,
            active_team_id,
            active_player_id,
            timer_seconds_left: turn_seconds,
            timer_running: false,
            active_card_id: None,
            steal_lock_team_id: None,
            uncuff_active: false,
            resolved_cards: Vector::new(),
            penalties: Vector::new(),
            dead_card_ids: Vector::new(),
        }
    }

    /// Fresh round in the given mode. All-in modes start on the all-in face.
    #[must_use]
    pub fn fresh(
        mode: RoundMode,
        active_team_id: Option<TeamId>,
        active_player_id: Option<PlayerId>,
        turn_seconds: u32,
    ) -> Self {
        Self {
            mode,
            die_face: if mode.is_all_in() { DieFace::AllIn } else { DieFace::Action },
            ..Self::new(active_team_id, active_player_id, turn_seconds)
        }
    }

    /// Clear the active card and any steal lock on it.
    pub fn clear_active_card(&mut self) {
        self.active_card_id = None;
        self.steal_lock_team_id = None;
    }

    /// Move the active card to the dead list.
    pub fn kill_active_card(&mut self) {
        if let Some(card_id) = self.active_card_id.take() {
            self.dead_card_ids.push_back(card_id);
        }
        self.steal_lock_team_id = None;
    }
}

/// Lifecycle of a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Setup,
    InGame,
    Finished,
}

/// The complete game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Teams in clockwise seating order.
    pub teams: Vector<Team>,
    pub players: Vector<Player>,
    pub target_score: u32,
    pub settings: GameSettings,
    pub round: RoundState,
    pub decks: DeckState,
    /// Newest first, capped at `LOG_CAPACITY`.
    pub log: Vector<GameEvent>,
    pub status: GameStatus,
    pub winner_team_ids: Vec<TeamId>,
    /// Next event log sequence number.
    pub next_event_id: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::empty()
    }
}

impl GameState {
    /// The empty setup-state game.
    #[must_use]
    pub fn empty() -> Self {
        let settings = GameSettings::default();
        Self {
            teams: Vector::new(),
            players: Vector::new(),
            target_score: 0,
            settings,
            round: RoundState::new(None, None, settings.turn_seconds),
            decks: DeckState::default(),
            log: Vector::new(),
            status: GameStatus::Setup,
            winner_team_ids: Vec::new(),
            next_event_id: 0,
        }
    }

    #[must_use]
    pub fn is_in_game(&self) -> bool {
        self.status == GameStatus::InGame
    }

    // === Lookup ===

    #[must_use]
    pub fn team(&self, id: &TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| &t.id == id)
    }

    /// Position of a team in seating order.
    #[must_use]
    pub fn team_index(&self, id: &TeamId) -> Option<usize> {
        self.teams.iter().position(|t| &t.id == id)
    }

    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    #[must_use]
    pub fn active_team(&self) -> Option<&Team> {
        self.round.active_team_id.as_ref().and_then(|id| self.team(id))
    }

    #[must_use]
    pub fn active_player(&self) -> Option<&Player> {
        self.round.active_player_id.as_ref().and_then(|id| self.player(id))
    }

    /// Apply `f` to the team with `id`, if it exists.
    pub fn update_team(&mut self, id: &TeamId, f: impl FnOnce(&mut Team)) {
        if let Some(index) = self.team_index(id) {
            if let Some(team) = self.teams.get_mut(index) {
                f(team);
            }
        }
    }

    // === Event Log ===

    /// Prepend an event, dropping the oldest beyond `LOG_CAPACITY`.
    pub fn push_event(&mut self, kind: EventKind, message: impl Into<String>, at: Timestamp) {
        let event = GameEvent {
            id: EventId(self.next_event_id),
            timestamp: at,
            kind,
            message: message.into(),
        };
        self.next_event_id += 1;
        self.log.push_front(event);
        if self.log.len() > LOG_CAPACITY {
            self.log.truncate(LOG_CAPACITY);
        }
    }
}
