//! Game settings read from `fishmania.ron`.

use common::{GameError, GameResult};
use fishing::EncounterTuning;
use serde::Deserialize;

use crate::mode::GameMode;

/// Key names for every bindable control, parsed by [`crate::input::parse_key`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub cast: String,
    pub reel: String,
    pub confirm: String,
    pub select: String,
    pub back: String,
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
    pub scroll_up: String,
    pub scroll_down: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            cast: "space".into(),
            reel: "r".into(),
            confirm: "c".into(),
            select: "return".into(),
            back: "escape".into(),
            up: "w".into(),
            down: "s".into(),
            left: "a".into(),
            right: "d".into(),
            scroll_up: "pageup".into(),
            scroll_down: "pagedown".into(),
        }
    }
}

/// Music file per mode. Fishing plays the location's own track.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MusicConfig {
    pub main_menu: Option<String>,
    pub land_explore: Option<String>,
    pub map_explore: Option<String>,
    pub shop: Option<String>,
    pub market: Option<String>,
    pub inventory: Option<String>,
}

impl Default for MusicConfig {
    fn default() -> Self {
        let menu = Some("menu_theme.ogg".to_string());
        Self {
            main_menu: menu.clone(),
            land_explore: Some("island_theme.ogg".into()),
            map_explore: Some("sailing_theme.ogg".into()),
            shop: menu.clone(),
            market: menu.clone(),
            inventory: menu,
        }
    }
}

impl MusicConfig {
    pub fn track_for(&self, mode: GameMode) -> Option<&str> {
        match mode {
            GameMode::MainMenu => self.main_menu.as_deref(),
            GameMode::LandExplore => self.land_explore.as_deref(),
            GameMode::MapExplore => self.map_explore.as_deref(),
            GameMode::Fishing => None,
            GameMode::Shop => self.shop.as_deref(),
            GameMode::Market => self.market.as_deref(),
            GameMode::Inventory => self.inventory.as_deref(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub keys: KeyBindings,
    pub encounter: EncounterTuning,
    pub music: MusicConfig,
    pub volume: u8,
    /// Largest frame step in seconds; longer frames are clamped.
    pub max_dt: f32,
    pub save_path: String,
    /// External location catalog. The built-in table is used when unset or unreadable.
    pub catalog_path: Option<String>,
    pub ambient_fish: usize,
    pub colorblind: bool,
    /// Fixed RNG seed, mostly for reproducing a session.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            keys: KeyBindings::default(),
            encounter: EncounterTuning::default(),
            music: MusicConfig::default(),
            volume: 7,
            max_dt: 0.1,
            save_path: "saves/save_game.json".into(),
            catalog_path: None,
            ambient_fish: 8,
            colorblind: false,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parses a RON document. Out of range values are replaced by their defaults.
    pub fn from_ron(text: &str) -> GameResult<Self> {
        let cfg: Self = ron::from_str(text).map_err(|e| GameError::Decode(e.to_string()))?;
        Ok(cfg.validated())
    }

    /// Replaces values the frame loop cannot run with by their defaults.
    pub fn validated(mut self) -> Self {
        if !(self.max_dt.is_finite() && self.max_dt > 0.0) {
            let fallback = Self::default().max_dt;
            log::warn!("Invalid max_dt {}, using {}", self.max_dt, fallback);
            self.max_dt = fallback;
        }
        self.encounter = self.encounter.validated();
        self
    }

    /// Loads configuration from `path`, using defaults when the file is missing
    /// or unreadable.
    pub fn load(path: &str) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No {} found, using default settings", path);
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", path, e);
                return Self::default();
            }
        };
        match Self::from_ron(&text) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Ignoring malformed {}: {}", path, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let cfg = GameConfig::load("/no/such/fishmania.ron");
        assert_eq!(cfg, GameConfig::default());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let cfg = GameConfig::from_ron(
            "(max_dt: 0.05, keys: (cast: \"x\"), encounter: (bite_chance: 0.5), colorblind: true)",
        )
        .unwrap();
        assert_eq!(cfg.max_dt, 0.05);
        assert_eq!(cfg.keys.cast, "x");
        assert_eq!(cfg.keys.reel, "r");
        assert_eq!(cfg.encounter.bite_chance, 0.5);
        assert_eq!(cfg.encounter.cast_speed, 150.0);
        assert!(cfg.colorblind);
        assert_eq!(cfg.save_path, "saves/save_game.json");
    }

    #[test]
    fn malformed_file_falls_back() {
        let mut path = std::env::temp_dir();
        path.push(format!("fishmania_bad_{}.ron", std::process::id()));
        std::fs::write(&path, "(max_dt: ").unwrap();
        let cfg = GameConfig::load(path.to_str().unwrap());
        std::fs::remove_file(path).unwrap();
        assert_eq!(cfg, GameConfig::default());
    }

    #[test]
    fn unusable_values_fall_back() {
        let cfg =
            GameConfig::from_ron("(max_dt: -0.5, encounter: (reel_speed: -50.0), volume: 3)").unwrap();
        assert_eq!(cfg.max_dt, 0.1);
        assert_eq!(cfg.encounter, EncounterTuning::default());
        assert_eq!(cfg.volume, 3);

        let cfg = GameConfig {
            max_dt: f32::NAN,
            ..GameConfig::default()
        }
        .validated();
        assert_eq!(cfg.max_dt, 0.1);
    }

    #[test]
    fn menus_share_a_track() {
        let music = MusicConfig::default();
        assert_eq!(music.track_for(GameMode::Shop), music.track_for(GameMode::MainMenu));
        assert_eq!(music.track_for(GameMode::Fishing), None);
    }
}
