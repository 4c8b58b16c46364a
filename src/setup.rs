//! Game setup: validating team input and building the `InitGame` payload.
//!
//! ## Key Types
//!
//! - `TeamSetup`: a team name and its player names as entered
//! - `Roster`: the `Team` / `Player` records built from setup input
//! - `GameConfig`: consuming builder that validates and produces `InitGame`
//!
//! Names are trimmed. Team ids are `team-<n>` and player ids
//! `<team-id>-player-<n>`, both 1-based.

use serde::{Deserialize, Serialize};

use crate::cards::{DeckState, PromptBank};
use crate::core::config::{
    DEFAULT_TARGET_SCORE, DEFAULT_TURN_SECONDS, MAX_TEAMS, MIN_PLAYERS_PER_TEAM, MIN_TEAMS,
};
use crate::core::{GameSettings, InitGame, Player, PlayerId, Team, TeamId};
use crate::error::{SetupError, SetupViolation};

/// One team as entered at setup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSetup {
    pub name: String,
    pub players: Vec<String>,
}

impl TeamSetup {
    #[must_use]
    pub fn new<S: Into<String>>(name: impl Into<String>, players: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            players: players.into_iter().map(Into::into).collect(),
        }
    }
}

/// Team and player records for a new game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roster {
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
}

/// Build team and player records from setup input.
///
/// Does not validate; see `validate_setup`.
#[must_use]
pub fn build_roster(inputs: &[TeamSetup]) -> Roster {
    let mut teams = Vec::with_capacity(inputs.len());
    let mut players = Vec::new();

    for (team_index, input) in inputs.iter().enumerate() {
        let team_id = TeamId::for_index(team_index);
        let mut player_ids = Vec::with_capacity(input.players.len());

        for (order, name) in input.players.iter().enumerate() {
            let id = PlayerId::for_team(&team_id, order);
            player_ids.push(id.clone());
            players.push(Player {
                id,
                team_id: team_id.clone(),
                name: name.trim().to_string(),
                order,
            });
        }

        teams.push(Team::new(team_id, input.name.trim(), player_ids));
    }

    Roster { teams, players }
}

/// Check setup input, collecting every problem.
#[must_use]
pub fn validate_setup(teams: &[TeamSetup], target_score: u32, turn_seconds: u32) -> Vec<SetupViolation> {
    let mut violations = Vec::new();

    if !(MIN_TEAMS..=MAX_TEAMS).contains(&teams.len()) {
        violations.push(SetupViolation::TeamCount {
            count: teams.len(),
            min: MIN_TEAMS,
            max: MAX_TEAMS,
        });
    }

    for (i, team) in teams.iter().enumerate() {
        if team.name.trim().is_empty() {
            violations.push(SetupViolation::EmptyTeamName { team: i + 1 });
        }
        if team.players.len() < MIN_PLAYERS_PER_TEAM {
            violations.push(SetupViolation::TooFewPlayers {
                team: i + 1,
                count: team.players.len(),
                min: MIN_PLAYERS_PER_TEAM,
            });
        }
        for (p, player) in team.players.iter().enumerate() {
            if player.trim().is_empty() {
                violations.push(SetupViolation::EmptyPlayerName {
                    team: i + 1,
                    player: p + 1,
                });
            }
        }
    }

    if target_score == 0 {
        violations.push(SetupViolation::TargetScore);
    }
    if turn_seconds == 0 {
        violations.push(SetupViolation::TurnSeconds);
    }

    violations
}

/// Builder for a new game.
///
/// ## Example
///
/// ```
/// use voice_charades::setup::GameConfig;
///
/// let config = GameConfig::new()
///     .team("Owls", ["Ada", "Ben"])
///     .team("Foxes", ["Cy", "Di"])
///     .target_score(20)
///     .turn_seconds(45);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    teams: Vec<TeamSetup>,
    target_score: u32,
    turn_seconds: u32,
    party_play: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            teams: Vec::new(),
            target_score: DEFAULT_TARGET_SCORE,
            turn_seconds: DEFAULT_TURN_SECONDS,
            party_play: false,
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a team in the next clockwise seat.
    pub fn team<S: Into<String>>(mut self, name: impl Into<String>, players: impl IntoIterator<Item = S>) -> Self {
        self.teams.push(TeamSetup::new(name, players));
        self
    }

    pub fn teams(mut self, teams: impl IntoIterator<Item = TeamSetup>) -> Self {
        self.teams.extend(teams);
        self
    }

    pub fn target_score(mut self, score: u32) -> Self {
        self.target_score = score;
        self
    }

    pub fn turn_seconds(mut self, seconds: u32) -> Self {
        self.turn_seconds = seconds;
        self
    }

    pub fn party_play(mut self, enabled: bool) -> Self {
        self.party_play = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), SetupError> {
        let violations = validate_setup(&self.teams, self.target_score, self.turn_seconds);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(SetupError { violations })
        }
    }

    /// Validate and build the payload for `Action::InitGame`.
    ///
    /// The bank is shuffled into decks with `seed`.
    pub fn build(self, bank: &PromptBank, seed: &str) -> Result<InitGame, SetupError> {
        self.validate()?;

        let Roster { teams, players } = build_roster(&self.teams);
        Ok(InitGame {
            teams,
            players,
            target_score: self.target_score,
            settings: GameSettings::default()
                .with_turn_seconds(self.turn_seconds)
                .with_party_play(self.party_play),
            decks: DeckState::new(bank, seed),
        })
    }
}
