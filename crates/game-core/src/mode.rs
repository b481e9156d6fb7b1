//! Top-level modes and the transient state each one owns.

use bracket_lib::prelude::RandomNumberGenerator;
use common::Vec2;
use data::{Location, LocationId};
use ecology::{spawn_ambient_fish, update_ambient_fish, AmbientFish};
use fishing::{EncounterOutcome, EncounterTuning, FishingEncounter};
use ui::Menu;
use world::{FishingScene, LandScene, SeaMap};

/// Screen the game is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameMode {
    MainMenu,
    LandExplore,
    MapExplore,
    Fishing,
    Shop,
    Market,
    Inventory,
}

impl GameMode {
    pub const ALL: [GameMode; 7] = [
        GameMode::MainMenu,
        GameMode::LandExplore,
        GameMode::MapExplore,
        GameMode::Fishing,
        GameMode::Shop,
        GameMode::Market,
        GameMode::Inventory,
    ];

    /// Name stored in the save file.
    pub fn name(self) -> &'static str {
        match self {
            GameMode::MainMenu => "main_menu",
            GameMode::LandExplore => "land_explore",
            GameMode::MapExplore => "map_explore",
            GameMode::Fishing => "fishing",
            GameMode::Shop => "shop",
            GameMode::Market => "market",
            GameMode::Inventory => "inventory",
        }
    }

    /// Parses a saved mode name. Older `*_screen` names are accepted too.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "market_screen" => return Some(GameMode::Market),
            "inventory_screen" => return Some(GameMode::Inventory),
            _ => {}
        }
        Self::ALL.into_iter().find(|m| m.name() == name)
    }

    /// Where the escape key leads, if anywhere.
    pub fn back_target(self) -> Option<GameMode> {
        match self {
            GameMode::MainMenu => None,
            GameMode::LandExplore => Some(GameMode::MainMenu),
            GameMode::MapExplore => Some(GameMode::LandExplore),
            GameMode::Fishing => Some(GameMode::MapExplore),
            GameMode::Shop | GameMode::Market | GameMode::Inventory => Some(GameMode::MainMenu),
        }
    }

    pub fn is_menu(self) -> bool {
        matches!(
            self,
            GameMode::MainMenu | GameMode::Shop | GameMode::Market | GameMode::Inventory
        )
    }
}

/// Boat sailing the sea map.
#[derive(Clone, Debug, PartialEq)]
pub struct MapVoyage {
    pub position: Vec2,
    /// Fishing spot the boat currently overlaps.
    pub active: Option<LocationId>,
}

impl MapVoyage {
    pub fn new(map: &SeaMap, position: Vec2) -> Self {
        let mut voyage = Self {
            position: map.clamp(position),
            active: None,
        };
        voyage.refresh(map);
        voyage
    }

    pub fn sail(&mut self, map: &SeaMap, dir: Vec2, speed: f32, dt: f32) {
        self.position = map.sail(self.position, dir, speed, dt);
        self.refresh(map);
    }

    fn refresh(&mut self, map: &SeaMap) {
        self.active = map.spot_at(self.position).map(|s| s.location.clone());
    }
}

/// One visit to a fishing location.
#[derive(Debug)]
pub struct FishingSession {
    location: Location,
    encounter: FishingEncounter,
    line_length: f32,
    tuning: EncounterTuning,
    boat_x: f32,
    fish: Vec<AmbientFish>,
}

impl FishingSession {
    pub fn new(
        location: Location,
        scene: &FishingScene,
        line_length: f32,
        tuning: EncounterTuning,
        ambient: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Self {
        let encounter = FishingEncounter::for_location(&location, line_length, tuning);
        let fish = spawn_ambient_fish(&location.fish, scene.water, ambient, rng);
        Self {
            location,
            encounter,
            line_length,
            tuning,
            boat_x: scene.anchor(),
            fish,
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn encounter(&self) -> &FishingEncounter {
        &self.encounter
    }

    pub fn encounter_mut(&mut self) -> &mut FishingEncounter {
        &mut self.encounter
    }

    pub fn boat_x(&self) -> f32 {
        self.boat_x
    }

    pub fn ambient_fish(&self) -> &[AmbientFish] {
        &self.fish
    }

    /// Moves the boat, swims the fish and runs the encounter for `dt` seconds.
    pub fn update(
        &mut self,
        scene: &FishingScene,
        steer: f32,
        speed: f32,
        dt: f32,
        rng: &mut RandomNumberGenerator,
    ) -> Option<EncounterOutcome> {
        self.boat_x = scene.move_boat(self.boat_x, steer, speed, dt);
        update_ambient_fish(&mut self.fish, scene.water, dt);
        let outcome = self.encounter.advance(dt, &self.location, rng)?;
        self.encounter = FishingEncounter::for_location(&self.location, self.line_length, self.tuning);
        Some(outcome)
    }
}

/// State owned by the active mode. Dropped when the mode is left.
#[derive(Debug)]
pub enum ModeState {
    MainMenu(Menu),
    LandExplore(LandScene),
    MapExplore(MapVoyage),
    Fishing(Box<FishingSession>),
    Shop(Menu),
    Market(Menu),
    Inventory(Menu),
}

impl ModeState {
    pub fn mode(&self) -> GameMode {
        match self {
            ModeState::MainMenu(_) => GameMode::MainMenu,
            ModeState::LandExplore(_) => GameMode::LandExplore,
            ModeState::MapExplore(_) => GameMode::MapExplore,
            ModeState::Fishing(_) => GameMode::Fishing,
            ModeState::Shop(_) => GameMode::Shop,
            ModeState::Market(_) => GameMode::Market,
            ModeState::Inventory(_) => GameMode::Inventory,
        }
    }

    /// The menu of a menu mode.
    pub fn menu(&self) -> Option<&Menu> {
        match self {
            ModeState::MainMenu(m) | ModeState::Shop(m) | ModeState::Market(m) | ModeState::Inventory(m) => {
                Some(m)
            }
            _ => None,
        }
    }

    pub fn fishing(&self) -> Option<&FishingSession> {
        match self {
            ModeState::Fishing(session) => Some(&**session),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data::load_catalog_embedded;

    #[test]
    fn names_round_trip() {
        for mode in GameMode::ALL {
            assert_eq!(GameMode::from_name(mode.name()), Some(mode));
        }
        assert_eq!(GameMode::from_name("market_screen"), Some(GameMode::Market));
        assert_eq!(GameMode::from_name("settings"), None);
    }

    #[test]
    fn escape_routes() {
        assert_eq!(GameMode::Fishing.back_target(), Some(GameMode::MapExplore));
        assert_eq!(GameMode::MapExplore.back_target(), Some(GameMode::LandExplore));
        assert_eq!(GameMode::LandExplore.back_target(), Some(GameMode::MainMenu));
        assert_eq!(GameMode::Inventory.back_target(), Some(GameMode::MainMenu));
        assert_eq!(GameMode::MainMenu.back_target(), None);
    }

    #[test]
    fn session_starts_idle_at_anchor() {
        let catalog = load_catalog_embedded().unwrap();
        let coast = catalog.get(&LocationId::coast()).unwrap().clone();
        let scene = FishingScene::default();
        let mut rng = RandomNumberGenerator::seeded(1);
        let session = FishingSession::new(coast, &scene, 450.0, EncounterTuning::default(), 5, &mut rng);
        assert!(session.encounter().is_idle());
        assert_eq!(session.encounter().max_depth(), 150.0);
        assert_eq!(session.boat_x(), scene.anchor());
        assert_eq!(session.ambient_fish().len(), 5);
    }
}
