mod app;
mod config;

use common::id_generator::generate_player_name;
use common::logger::init_logger;
use eframe::egui;

use app::GameApp;
use config::{Config, get_config_manager};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger(None);

    let config_manager = get_config_manager();
    let config = match config_manager.get_config() {
        Ok(config) => config,
        Err(e) => {
            common::log!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    };

    let player_name = match config.player_name.clone() {
        Some(name) => name,
        None => {
            let name = generate_player_name();
            let updated = Config {
                player_name: Some(name.clone()),
                ..config.clone()
            };
            if let Err(e) = config_manager.set_config(&updated) {
                common::log!("Failed to save config: {}", e);
            }
            name
        }
    };

    common::log!("Starting tic-tac-toe client for {}", player_name);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width as f32, config.window.height as f32])
            .with_title(format!("Tic-Tac-Toe - {}", player_name)),
        ..Default::default()
    };

    eframe::run_native(
        "Tic-Tac-Toe",
        options,
        Box::new(|_cc| Ok(Box::new(GameApp::new(player_name)))),
    )?;

    Ok(())
}
