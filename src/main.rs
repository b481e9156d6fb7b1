fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    // Logging first so config and save warnings are visible
    if let Err(e) = game_core::run() {
        log::error!("Game error: {}", e);
    }
}
