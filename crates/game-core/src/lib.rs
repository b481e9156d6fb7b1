//! Game engine entry point.

mod app;
mod config;
mod input;
mod machine;
mod mode;
mod render;

use bracket_lib::prelude::*;
use ledger::JsonSaveFile;

pub use app::FishmaniaApp;
pub use config::{GameConfig, KeyBindings, MusicConfig};
pub use input::{parse_key, InputConfig};
pub use machine::Game;
pub use mode::{FishingSession, GameMode, MapVoyage, ModeState};

const CONFIG_PATH: &str = "fishmania.ron";

/// Runs the game loop using [`bracket-lib`].
pub fn run() -> BError {
    let config = GameConfig::load(CONFIG_PATH);
    let store = JsonSaveFile::new(&config.save_path);
    log::info!("Saving to {}", store.path().display());
    let game = Game::new(config, Box::new(store))?;
    log::info!("Welcome to Fishing Mania!");

    let context = BTermBuilder::simple(ui::CONSOLE_WIDTH, ui::CONSOLE_HEIGHT)?
        .with_title("Fishing Mania")
        .with_advanced_input(true)
        .build()?;
    main_loop(context, FishmaniaApp::new(game))
}
