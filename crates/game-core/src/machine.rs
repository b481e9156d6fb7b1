//! The mode state machine driving a whole play session.

use std::collections::HashSet;

use audio::MusicPlayer;
use bracket_lib::prelude::RandomNumberGenerator;
use common::{Action, GameError, GameResult, InputEvent, Vec2, MAP_START};
use data::{Catalog, Location, LocationId};
use fishing::EncounterOutcome;
use ledger::{Ledger, SaveState, SaveStore};
use ui::{Menu, MenuAction, UIContext, UILayout};
use world::{direction, FishingScene, Hotspot, LandScene, SeaMap};

use crate::config::GameConfig;
use crate::mode::{FishingSession, GameMode, MapVoyage, ModeState};

/// What a mode asks the machine to do after handling an input.
#[derive(Clone, Debug, PartialEq)]
enum Request {
    Transition(GameMode, Option<LocationId>),
    Menu(MenuAction),
    Unlock(LocationId),
}

/// Owns the active mode together with everything that outlives it.
pub struct Game {
    config: GameConfig,
    catalog: Catalog,
    sea_map: SeaMap,
    scene: FishingScene,
    ledger: Ledger,
    store: Box<dyn SaveStore>,
    music: MusicPlayer,
    rng: RandomNumberGenerator,
    ui: UIContext,
    held: HashSet<Action>,
    map_position: Vec2,
    resume_mode: GameMode,
    state: ModeState,
    running: bool,
}

impl Game {
    /// Loads the catalog and the saved ledger, then opens the main menu.
    pub fn new(config: GameConfig, store: Box<dyn SaveStore>) -> GameResult<Self> {
        let config = config.validated();
        let catalog = data::load_catalog_or_embedded(config.catalog_path.as_deref())?;
        let saved = match store.load() {
            Ok(Some(state)) => state,
            Ok(None) => {
                log::info!("No save found, starting fresh");
                SaveState::default()
            }
            Err(e) => {
                log::warn!("Could not load save ({}), starting fresh", e);
                SaveState::default()
            }
        };
        let rng = match config.seed {
            Some(seed) => RandomNumberGenerator::seeded(seed),
            None => RandomNumberGenerator::new(),
        };
        let mut log_window = UIContext::default();
        log_window.set_layout(UILayout::Menu);
        let mut game = Self {
            sea_map: SeaMap::new(catalog.locations()),
            scene: FishingScene::default(),
            ledger: Ledger::from_save(&saved),
            music: MusicPlayer::new(config.volume),
            map_position: saved.player_map_position,
            resume_mode: GameMode::from_name(&saved.current_game_state).unwrap_or(GameMode::MainMenu),
            state: ModeState::MainMenu(ui::main_menu()),
            held: HashSet::new(),
            running: true,
            catalog,
            config,
            store,
            rng,
            ui: log_window,
        };
        game.switch(GameMode::MainMenu, None, false);
        Ok(game)
    }

    pub fn mode(&self) -> GameMode {
        self.state.mode()
    }

    pub fn state(&self) -> &ModeState {
        &self.state
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn sea_map(&self) -> &SeaMap {
        &self.sea_map
    }

    pub fn fishing_scene(&self) -> &FishingScene {
        &self.scene
    }

    pub fn music(&self) -> &MusicPlayer {
        &self.music
    }

    pub fn ui(&self) -> &UIContext {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut UIContext {
        &mut self.ui
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn save_store(&self) -> &dyn SaveStore {
        self.store.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Persistent sea map position, live while sailing.
    pub fn map_position(&self) -> Vec2 {
        match &self.state {
            ModeState::MapExplore(voyage) => voyage.position,
            _ => self.map_position,
        }
    }

    /// Switches to `target`, saving first.
    ///
    /// Fishing needs an unlocked location in `payload`; otherwise the sea map opens instead.
    pub fn transition(&mut self, target: GameMode, payload: Option<LocationId>) {
        self.switch(target, payload, true);
    }

    fn switch(&mut self, target: GameMode, payload: Option<LocationId>, persist: bool) {
        let leaving = self.state.mode();
        let (target, location) = self.resolve(target, payload);
        if persist {
            self.persist(leaving);
        }
        self.teardown();
        if matches!(leaving, GameMode::LandExplore | GameMode::MapExplore | GameMode::Fishing) {
            self.resume_mode = leaving;
        }
        self.state = self.build(target, location);
        let track = match self.state.fishing() {
            Some(session) => session.location().music.clone(),
            None => self.config.music.track_for(target).map(str::to_string),
        };
        self.music.play_track(track.as_deref());
        self.ui.set_layout(match target {
            GameMode::Fishing => UILayout::Fishing,
            mode if mode.is_menu() => UILayout::Menu,
            _ => UILayout::Explore,
        });
        log::debug!("Mode {} -> {}", leaving.name(), target.name());
    }

    fn resolve(&self, target: GameMode, payload: Option<LocationId>) -> (GameMode, Option<Location>) {
        if target != GameMode::Fishing {
            return (target, None);
        }
        match self.fishing_location(payload) {
            Ok(location) => (GameMode::Fishing, Some(location)),
            Err(e) => {
                log::warn!("Cannot start fishing: {}, opening the sea map", e);
                (GameMode::MapExplore, None)
            }
        }
    }

    fn fishing_location(&self, payload: Option<LocationId>) -> GameResult<Location> {
        let id = payload.ok_or(GameError::InvalidOperation)?;
        let location = self
            .catalog
            .get(&id)
            .ok_or_else(|| GameError::UnknownLocation(id.to_string()))?;
        if !self.ledger.is_unlocked(&location.id) {
            return Err(GameError::LocationLocked(id.to_string()));
        }
        Ok(location.clone())
    }

    fn persist(&mut self, mode: GameMode) {
        let state = self.ledger.snapshot(mode.name(), self.map_position());
        if let Err(e) = self.store.save(&state) {
            log::warn!("Save failed: {}", e);
        }
    }

    fn teardown(&mut self) {
        if let ModeState::MapExplore(voyage) = &self.state {
            self.map_position = voyage.position;
        }
    }

    fn build(&mut self, target: GameMode, location: Option<Location>) -> ModeState {
        match (target, location) {
            (GameMode::MainMenu, _) => ModeState::MainMenu(ui::main_menu()),
            (GameMode::LandExplore, _) => ModeState::LandExplore(LandScene::new()),
            (GameMode::Fishing, Some(location)) => {
                self.ui.add_log(&format!(
                    "Fishing at {}. Press cast to drop the line.",
                    location.display_name
                ));
                ModeState::Fishing(Box::new(FishingSession::new(
                    location,
                    &self.scene,
                    self.ledger.boat().stats().line_length,
                    self.config.encounter,
                    self.config.ambient_fish,
                    &mut self.rng,
                )))
            }
            (GameMode::MapExplore | GameMode::Fishing, _) => {
                ModeState::MapExplore(MapVoyage::new(&self.sea_map, self.map_position))
            }
            (GameMode::Shop, _) => ModeState::Shop(ui::shop_menu(&self.ledger)),
            (GameMode::Market, _) => ModeState::Market(ui::market_menu(&self.ledger)),
            (GameMode::Inventory, _) => ModeState::Inventory(ui::inventory_menu(&self.ledger)),
        }
    }

    /// Routes one input event to the active mode.
    pub fn dispatch_event(&mut self, event: InputEvent) {
        if event.pressed {
            self.held.insert(event.action);
        } else {
            self.held.remove(&event.action);
        }
        if event.pressed && event.action == Action::EscapeBack {
            if let Some(back) = self.mode().back_target() {
                self.transition(back, None);
            }
            return;
        }
        let request = match &mut self.state {
            ModeState::MainMenu(menu)
            | ModeState::Shop(menu)
            | ModeState::Market(menu)
            | ModeState::Inventory(menu) => menu_input(menu, event),
            ModeState::LandExplore(scene) => {
                if !event.pressed || event.action != Action::Select {
                    None
                } else {
                    match scene.active() {
                        Some(Hotspot::House) => Some(Request::Transition(GameMode::MainMenu, None)),
                        Some(Hotspot::Boat) => Some(Request::Transition(GameMode::MapExplore, None)),
                        None => None,
                    }
                }
            }
            ModeState::MapExplore(voyage) => match (&voyage.active, event) {
                (Some(id), InputEvent { action: Action::Select, pressed: true }) => {
                    if self.ledger.is_unlocked(id) {
                        Some(Request::Transition(GameMode::Fishing, Some(id.clone())))
                    } else {
                        Some(Request::Unlock(id.clone()))
                    }
                }
                _ => None,
            },
            ModeState::Fishing(session) => {
                session.encounter_mut().handle_input(event);
                None
            }
        };
        if let Some(request) = request {
            self.apply(request);
        }
    }

    fn apply(&mut self, request: Request) {
        match request {
            Request::Transition(target, payload) => self.transition(target, payload),
            Request::Menu(action) => self.menu_action(action),
            Request::Unlock(id) => self.unlock(&id),
        }
    }

    fn menu_action(&mut self, action: MenuAction) {
        match action {
            MenuAction::NewAdventure => {
                self.ledger.reset_for_new_adventure();
                self.map_position = MAP_START;
                self.ui.add_log("A new adventure begins!");
                self.transition(GameMode::LandExplore, None);
            }
            MenuAction::Continue => {
                let target = match self.resume_mode {
                    GameMode::MapExplore => GameMode::MapExplore,
                    _ => GameMode::LandExplore,
                };
                self.transition(target, None);
            }
            MenuAction::OpenShop => self.transition(GameMode::Shop, None),
            MenuAction::OpenInventory => self.transition(GameMode::Inventory, None),
            MenuAction::OpenMarket => self.transition(GameMode::Market, None),
            MenuAction::Quit => self.quit(),
            MenuAction::Upgrade(kind) => {
                match self.ledger.purchase_upgrade(kind) {
                    Ok(cost) => self.ui.add_log(&format!(
                        "{} upgraded to level {} for {} coins",
                        kind.label(),
                        self.ledger.boat().level(kind),
                        cost
                    )),
                    Err(e) => self.ui.add_log(&format!("Cannot upgrade {}: {}", kind.label(), e)),
                }
                self.refresh_menu();
            }
            MenuAction::SellAll => {
                let earned = self.ledger.sell_all();
                self.ui.add_log(&format!("Sold your catch for {} coins", earned));
                self.refresh_menu();
            }
            MenuAction::Back => self.transition(GameMode::MainMenu, None),
        }
    }

    fn refresh_menu(&mut self) {
        match &mut self.state {
            ModeState::Shop(menu) => menu.set_options(ui::shop_options(&self.ledger)),
            ModeState::Market(menu) => menu.set_options(ui::market_options(&self.ledger)),
            ModeState::Inventory(menu) => menu.set_options(ui::inventory_options(&self.ledger)),
            _ => {}
        }
    }

    fn unlock(&mut self, id: &LocationId) {
        let Some(location) = self.catalog.get(id) else {
            log::warn!("Unlock requested for unknown location {}", id);
            return;
        };
        match self.ledger.unlock_location(location) {
            Ok(cost) => self.ui.add_log(&format!(
                "{} unlocked for {} coins!",
                location.display_name, cost
            )),
            Err(e) => self.ui.add_log(&format!(
                "Cannot unlock {}: {}",
                location.display_name, e
            )),
        }
    }

    /// Runs the active mode for `dt` seconds, clamped to the configured maximum.
    pub fn advance(&mut self, dt: f32) {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.config.max_dt)
        } else {
            0.0
        };
        let steer = direction(
            self.held.contains(&Action::MoveLeft),
            self.held.contains(&Action::MoveRight),
            self.held.contains(&Action::MoveUp),
            self.held.contains(&Action::MoveDown),
        );
        let speed = self.ledger.boat().stats().speed;
        let outcome = match &mut self.state {
            ModeState::LandExplore(scene) => {
                scene.update(steer, dt);
                None
            }
            ModeState::MapExplore(voyage) => {
                voyage.sail(&self.sea_map, steer, speed, dt);
                None
            }
            ModeState::Fishing(session) => session
                .update(&self.scene, steer.x, speed, dt, &mut self.rng)
                .map(|outcome| (outcome, session.location().id.clone())),
            ModeState::MainMenu(_) | ModeState::Shop(_) | ModeState::Market(_) | ModeState::Inventory(_) => None,
        };
        if let Some((outcome, location)) = outcome {
            self.resolve_catch(outcome, &location);
        }
    }

    fn resolve_catch(&mut self, outcome: EncounterOutcome, location: &LocationId) {
        match outcome {
            EncounterOutcome::Caught(species) => {
                let value = self.ledger.record_catch(&species, location);
                self.ui.add_log(&format!(
                    "Caught a {} ({})! +{} coins",
                    species.name,
                    species.rarity.label(),
                    value
                ));
            }
            EncounterOutcome::Escaped(species) => {
                self.ui.add_log(&format!("The {} got away...", species.name));
            }
            EncounterOutcome::Empty => self.ui.add_log("Nothing on the line."),
        }
    }

    /// Saves one last time and stops the session.
    ///
    /// Quitting from a menu records the exploration mode Continue would resume.
    pub fn quit(&mut self) {
        let mode = if self.mode().is_menu() {
            self.resume_mode
        } else {
            self.mode()
        };
        self.persist(mode);
        self.running = false;
        log::info!("Goodbye");
    }
}

fn menu_input(menu: &mut Menu, event: InputEvent) -> Option<Request> {
    if !event.pressed {
        return None;
    }
    match event.action {
        Action::MenuUp => menu.move_up(),
        Action::MenuDown => menu.move_down(),
        Action::Select => return menu.selected_action().map(Request::Menu),
        _ => {}
    }
    None
}
