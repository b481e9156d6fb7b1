use std::collections::HashSet;

use bracket_lib::prelude::*;
use common::InputEvent;

use crate::input::InputConfig;
use crate::machine::Game;
use crate::render;

/// Bridges the bracket-lib frame loop and the [`Game`].
pub struct FishmaniaApp {
    game: Game,
    input: InputConfig,
    palette: ui::ColorPalette,
    held_keys: HashSet<VirtualKeyCode>,
}

impl FishmaniaApp {
    pub fn new(game: Game) -> Self {
        let input = InputConfig::from_bindings(&game.config().keys);
        let palette = if game.config().colorblind {
            ui::ColorPalette::colorblind()
        } else {
            ui::ColorPalette::default()
        };
        Self {
            game,
            input,
            palette,
            held_keys: HashSet::new(),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Forwards a key change as logical actions. Auto-repeated presses are dropped.
    fn handle_key(&mut self, key: VirtualKeyCode, pressed: bool) {
        if pressed {
            if !self.held_keys.insert(key) {
                return;
            }
            if key == self.input.scroll_up {
                self.game.ui_mut().scroll_up();
            } else if key == self.input.scroll_down {
                self.game.ui_mut().scroll_down();
            }
        } else if !self.held_keys.remove(&key) {
            return;
        }
        for action in self.input.actions(key) {
            if !self.game.is_running() {
                break;
            }
            self.game.dispatch_event(InputEvent { action, pressed });
        }
    }

    fn handle_event(&mut self, event: BEvent) {
        match event {
            BEvent::KeyboardInput { key, pressed, .. } => self.handle_key(key, pressed),
            BEvent::CloseRequested => {
                if self.game.is_running() {
                    self.game.quit();
                }
            }
            _ => {}
        }
    }
}

impl GameState for FishmaniaApp {
    fn tick(&mut self, ctx: &mut BTerm) {
        let mut events = Vec::new();
        INPUT.lock().for_each_message(|event| events.push(event));
        for event in events {
            self.handle_event(event);
        }
        if self.game.is_running() {
            self.game.advance(ctx.frame_time_ms / 1000.0);
        }
        if !self.game.is_running() {
            ctx.quit();
            return;
        }
        render::draw(ctx, &self.game, &self.palette);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::mode::GameMode;
    use ledger::MemoryStore;

    fn app() -> FishmaniaApp {
        let game = Game::new(GameConfig::default(), Box::new(MemoryStore::default())).unwrap();
        FishmaniaApp::new(game)
    }

    #[test]
    fn repeated_presses_are_ignored() {
        let mut app = app();
        app.handle_key(VirtualKeyCode::Down, true);
        app.handle_key(VirtualKeyCode::Down, true);
        app.handle_key(VirtualKeyCode::Down, true);
        app.handle_key(VirtualKeyCode::Down, false);
        let menu = app.game().state().menu().unwrap();
        assert_eq!(menu.selected_index(), 1);
    }

    #[test]
    fn stray_release_is_ignored() {
        let mut app = app();
        app.handle_key(VirtualKeyCode::Return, false);
        assert_eq!(app.game().mode(), GameMode::MainMenu);
    }

    #[test]
    fn enter_starts_new_adventure() {
        let mut app = app();
        app.handle_key(VirtualKeyCode::Return, true);
        app.handle_key(VirtualKeyCode::Return, false);
        assert_eq!(app.game().mode(), GameMode::LandExplore);
    }

    #[test]
    fn closing_the_window_saves_and_quits() {
        let mut app = app();
        app.handle_event(BEvent::KeyboardInput {
            key: VirtualKeyCode::Return,
            scan_code: 0,
            pressed: true,
        });
        assert_eq!(app.game().mode(), GameMode::LandExplore);
        app.handle_event(BEvent::CloseRequested);
        assert!(!app.game().is_running());
        let saved = app.game().save_store().load().unwrap().expect("saved state");
        assert_eq!(saved.current_game_state, "land_explore");
    }

    #[test]
    fn escape_from_land_returns_to_menu() {
        let mut app = app();
        app.handle_key(VirtualKeyCode::Return, true);
        app.handle_key(VirtualKeyCode::Return, false);
        app.handle_key(VirtualKeyCode::Escape, true);
        assert_eq!(app.game().mode(), GameMode::MainMenu);
    }
}
