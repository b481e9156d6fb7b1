//! Save file format and storage backends.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use common::{GameError, GameResult, Vec2, MAP_START};
use data::LocationId;
use serde::{Deserialize, Serialize};

use crate::{CaughtFish, UpgradeLevels, STARTING_COINS};

/// Everything written to disk between sessions.
///
/// Each field falls back to its default when missing from the file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveState {
    pub coins: u32,
    pub boat_upgrades: UpgradeLevels,
    pub unlocked_locations: BTreeMap<LocationId, bool>,
    pub collected_fish: Vec<CaughtFish>,
    /// Snake case name of the mode the player was in.
    pub current_game_state: String,
    pub player_map_position: Vec2,
}

impl Default for SaveState {
    fn default() -> Self {
        let unlocked_locations = [("Coast", true), ("Sea", false), ("Ocean", false)]
            .into_iter()
            .map(|(id, open)| (LocationId::from(id), open))
            .collect();
        Self {
            coins: STARTING_COINS,
            boat_upgrades: UpgradeLevels::default(),
            unlocked_locations,
            collected_fish: Vec::new(),
            current_game_state: "main_menu".to_string(),
            player_map_position: MAP_START,
        }
    }
}

/// Persistence collaborator for [`SaveState`].
pub trait SaveStore {
    fn save(&mut self, state: &SaveState) -> GameResult<()>;

    /// Returns `None` when nothing has been saved yet.
    fn load(&self) -> GameResult<Option<SaveState>>;
}

/// Pretty printed JSON file on disk.
#[derive(Clone, Debug)]
pub struct JsonSaveFile {
    path: PathBuf,
}

impl JsonSaveFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SaveStore for JsonSaveFile {
    fn save(&mut self, state: &SaveState) -> GameResult<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }
        let json =
            serde_json::to_string_pretty(state).map_err(|e| GameError::Decode(e.to_string()))?;
        std::fs::write(&self.path, json)?;
        log::debug!("Saved game to {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> GameResult<Option<SaveState>> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let state = serde_json::from_str(&data).map_err(|e| GameError::Decode(e.to_string()))?;
        Ok(Some(state))
    }
}

/// In-memory store for tests and targets without a filesystem.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    state: Option<SaveState>,
    fail_saves: bool,
}

impl MemoryStore {
    pub fn with_state(state: SaveState) -> Self {
        Self {
            state: Some(state),
            fail_saves: false,
        }
    }

    /// A store that rejects every save.
    pub fn failing() -> Self {
        Self {
            state: None,
            fail_saves: true,
        }
    }
}

impl SaveStore for MemoryStore {
    fn save(&mut self, state: &SaveState) -> GameResult<()> {
        if self.fail_saves {
            return Err(GameError::InvalidOperation);
        }
        self.state = Some(state.clone());
        Ok(())
    }

    fn load(&self) -> GameResult<Option<SaveState>> {
        Ok(self.state.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("fishmania_{}_{}", name, std::process::id()))
            .join("save_game.json")
    }

    #[test]
    fn missing_file_loads_none() {
        let store = JsonSaveFile::new(temp_path("missing"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn save_and_load_file() {
        let path = temp_path("roundtrip");
        let mut store = JsonSaveFile::new(&path);
        let mut state = SaveState::default();
        state.coins = 42;
        state.current_game_state = "map_explore".into();
        store.save(&state).unwrap();
        let loaded = store.load().unwrap();
        if let Some(dir) = path.parent() {
            std::fs::remove_dir_all(dir).unwrap();
        }
        assert_eq!(loaded, Some(state));
    }

    #[test]
    fn missing_keys_use_defaults() {
        let state: SaveState = serde_json::from_str(r#"{ "coins": 7 }"#).unwrap();
        assert_eq!(state.coins, 7);
        assert_eq!(state.current_game_state, "main_menu");
        assert_eq!(state.player_map_position, MAP_START);
        assert_eq!(state.unlocked_locations.get(&LocationId::coast()), Some(&true));
    }

    #[test]
    fn corrupt_file_is_decode_error() {
        let path = temp_path("corrupt");
        let dir = path.parent().unwrap().to_path_buf();
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "{ nope").unwrap();
        let res = JsonSaveFile::new(&path).load();
        std::fs::remove_dir_all(dir).unwrap();
        assert!(matches!(res, Err(GameError::Decode(_))));
    }

    #[test]
    fn memory_store_can_fail() {
        let mut store = MemoryStore::failing();
        assert!(store.save(&SaveState::default()).is_err());
        assert_eq!(store.load().unwrap(), None);
    }
}
