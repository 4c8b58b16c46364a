//! Saving and restoring the game between sessions.
//!
//! The full `GameState` is encoded with bincode together with a format
//! version and stored under `STORAGE_KEY`. Loading never fails loudly: a
//! missing, unreadable, undecodable or wrong-version snapshot all mean
//! "no saved game", and the host starts fresh.

pub mod store;

pub use store::{FileStore, MemoryStore, SnapshotStore};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::config::{STORAGE_KEY, STORAGE_VERSION};
use crate::core::{GameState, GameStatus};
use crate::error::PersistError;

/// A versioned, encoded game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub state: GameState,
}

impl Snapshot {
    /// Wrap a state at the current format version.
    #[must_use]
    pub fn new(state: GameState) -> Self {
        Self {
            version: STORAGE_VERSION,
            state,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, PersistError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a snapshot, checking the version before the state.
    ///
    /// Returns `None` for a foreign version or undecodable bytes.
    #[must_use]
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        let header: SnapshotHeader = match bincode::deserialize(bytes) {
            Ok(header) => header,
            Err(e) => {
                warn!(error = %e, "discarding unreadable snapshot");
                return None;
            }
        };
        if header.version != STORAGE_VERSION {
            warn!(
                found = header.version,
                expected = STORAGE_VERSION,
                "discarding snapshot with foreign version"
            );
            return None;
        }

        match bincode::deserialize(bytes) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(error = %e, "discarding undecodable snapshot");
                None
            }
        }
    }
}

// Leading field of `Snapshot`; bincode ignores the trailing state bytes.
#[derive(Deserialize)]
struct SnapshotHeader {
    version: u32,
}

/// Persist `state`, or clear storage if the game is back in setup.
pub fn save_game_state<S: SnapshotStore + ?Sized>(
    store: &mut S,
    state: &GameState,
) -> Result<(), PersistError> {
    if state.status == GameStatus::Setup {
        return clear_game_state(store);
    }
    let bytes = Snapshot::new(state.clone()).encode()?;
    debug!(bytes = bytes.len(), "snapshot saved");
    store.write(STORAGE_KEY, &bytes)
}

/// Saved state, if there is a usable one.
#[must_use]
pub fn load_game_state<S: SnapshotStore + ?Sized>(store: &S) -> Option<GameState> {
    let bytes = match store.read(STORAGE_KEY) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return None,
        Err(e) => {
            warn!(error = %e, "snapshot storage unreadable");
            return None;
        }
    };
    Snapshot::decode(&bytes).map(|snapshot| snapshot.state)
}

pub fn clear_game_state<S: SnapshotStore + ?Sized>(store: &mut S) -> Result<(), PersistError> {
    store.remove(STORAGE_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_game() -> GameState {
        GameState {
            status: GameStatus::InGame,
            target_score: 15,
            ..GameState::empty()
        }
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let state = in_game();

        save_game_state(&mut store, &state).unwrap();
        assert_eq!(load_game_state(&store), Some(state));
    }

    #[test]
    fn test_setup_status_clears_storage() {
        let mut store = MemoryStore::new();
        save_game_state(&mut store, &in_game()).unwrap();
        assert!(store.contains(STORAGE_KEY));

        save_game_state(&mut store, &GameState::empty()).unwrap();
        assert!(!store.contains(STORAGE_KEY));
        assert_eq!(load_game_state(&store), None);
    }

    #[test]
    fn test_foreign_version_is_ignored() {
        let mut store = MemoryStore::new();
        let snapshot = Snapshot {
            version: STORAGE_VERSION + 1,
            state: in_game(),
        };
        store.write(STORAGE_KEY, &snapshot.encode().unwrap()).unwrap();

        assert_eq!(load_game_state(&store), None);
    }

    #[test]
    fn test_garbage_is_ignored() {
        let mut store = MemoryStore::new();
        store.write(STORAGE_KEY, &[1, 0, 0, 0, 0xff]).unwrap();
        assert_eq!(load_game_state(&store), None);

        store.write(STORAGE_KEY, &[]).unwrap();
        assert_eq!(load_game_state(&store), None);
    }
}
