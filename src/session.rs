//! A host-side game session.
//!
//! `GameSession` is the glue a UI would otherwise write by hand: it owns
//! the current state, feeds intents through the rules one at a time,
//! stamps them with the clock, and persists after every applied intent.
//! Cosmetic randomness (who starts, a die roll, a party card) comes from a
//! `GameRng` here and never from inside the rules.

use tracing::{debug, info, warn};

use crate::cards::{DieFace, PromptBank, PromptCard};
use crate::core::{Action, Clock, GameRng, GameState, SystemClock};
use crate::error::SetupError;
use crate::persist::{load_game_state, save_game_state, SnapshotStore};
use crate::rules::{self, TeamScore};
use crate::setup::GameConfig;

/// Owns a game and serializes every change to it.
///
/// ## Example
///
/// ```
/// use voice_charades::core::{GameRng, GameStatus, ManualClock};
/// use voice_charades::persist::MemoryStore;
/// use voice_charades::session::GameSession;
///
/// let session = GameSession::open(MemoryStore::new(), ManualClock::new(0), GameRng::new(7));
/// assert_eq!(session.state().status, GameStatus::Setup);
/// ```
#[derive(Debug)]
pub struct GameSession<S, C = SystemClock> {
    state: GameState,
    store: S,
    clock: C,
    rng: GameRng,
}

impl<S: SnapshotStore, C: Clock> GameSession<S, C> {
    /// Open a session, resuming a saved game if the store holds a usable one.
    pub fn open(store: S, clock: C, rng: GameRng) -> Self {
        let state = match load_game_state(&store) {
            Some(saved) => {
                info!(status = ?saved.status, teams = saved.teams.len(), "resumed saved game");
                rules::transition(&GameState::empty(), &Action::Rehydrate(Box::new(saved)), clock.now())
            }
            None => GameState::empty(),
        };

        Self {
            state,
            store,
            clock,
            rng,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Apply an intent. Returns whether it changed the game.
    pub fn dispatch(&mut self, action: &Action) -> bool {
        match rules::try_transition(&self.state, action, self.clock.now()) {
            Ok(next) => {
                self.state = next;
                self.persist();
                true
            }
            Err(reason) => {
                debug!(intent = action.name(), %reason, "intent ignored");
                false
            }
        }
    }

    /// Validate setup, deal fresh decks, pick a random first Sound Master
    /// and start the first round.
    pub fn start_game(&mut self, config: GameConfig, bank: &PromptBank) -> Result<(), SetupError> {
        let seed = self.rng.deck_seed(self.clock.now().millis());
        let init = config.build(bank, &seed)?;
        info!(%seed, "starting game");
        self.dispatch(&Action::InitGame(Box::new(init)));

        let players: Vec<_> = self.state.players.iter().cloned().collect();
        if let Some(first) = self.rng.choose(&players) {
            self.dispatch(&Action::AssignFirstClueGiver {
                team_id: first.team_id.clone(),
                player_id: first.id.clone(),
            });
            self.dispatch(&Action::StartRound);
        }
        Ok(())
    }

    /// Roll a random face and apply it.
    pub fn roll_die(&mut self) -> DieFace {
        let face = self.rng.roll_die();
        self.dispatch(&Action::RollDie { face });
        face
    }

    /// A random card to act out for fun, when party play is on.
    ///
    /// Does not touch decks or scores.
    pub fn party_card(&mut self) -> Option<PromptCard> {
        if !self.state.settings.party_play_enabled {
            return None;
        }
        let mut cards: Vec<&PromptCard> = self.state.decks.cards_by_id.values().collect();
        cards.sort_by(|a, b| a.id.cmp(&b.id));
        self.rng.choose(&cards).map(|card| (*card).clone())
    }

    /// Replay wall time as timer ticks.
    pub fn advance_time(&mut self, millis: u64) {
        for _ in 0..rules::ticks_for(millis) {
            self.dispatch(&Action::tick());
        }
    }

    /// Discard the game and clear storage.
    pub fn reset(&mut self) {
        self.dispatch(&Action::Reset);
    }

    #[must_use]
    pub fn render_text(&self) -> String {
        rules::diagnostic_text(&self.state)
    }

    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        rules::legal_actions(&self.state)
    }

    #[must_use]
    pub fn preview_scores(&self) -> Vec<TeamScore> {
        rules::preview_scores(&self.state)
    }

    /// Give back the store, e.g. to reopen it later.
    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&mut self) {
        if let Err(e) = save_game_state(&mut self.store, &self.state) {
            warn!(error = %e, "failed to save game");
        }
    }
}
