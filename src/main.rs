//! wpm: a typing trainer built on MoGE/MoUI
//!
//! Reads `wpm.ron` (optional), the practice text, and fonts from the
//! resource archive, then runs until the window closes.

mod wpm;

use log::{info, warn, LevelFilter};
use macroquad::prelude::*;
use moge::config::{Config, CONFIG_FILE};
use std::path::Path;
use std::sync::OnceLock;

static CONFIG: OnceLock<Config> = OnceLock::new();

/// `wpm.ron`, read once and shared by the window setup and the app
fn config() -> &'static Config {
    CONFIG.get_or_init(|| match Config::load_or_default(Path::new(CONFIG_FILE)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    })
}

fn window_conf() -> Conf {
    let config = config();
    Conf {
        window_title: format!("{} v{}", config.title, moge::VERSION),
        window_width: config.window_width,
        window_height: config.window_height,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let config = config().clone();
    let level = config.level_filter();
    if let Err(e) = moge::logging::init(level.unwrap_or(LevelFilter::Info)) {
        eprintln!("Logger already set: {}", e);
    }
    info!("=== wpm v{} ===", moge::VERSION);

    // Config was read before the logger existed
    if Path::new(CONFIG_FILE).exists() {
        info!("Loaded config from `{}`", CONFIG_FILE);
    } else {
        info!("No `{}`, using default config", CONFIG_FILE);
    }
    if level.is_none() {
        warn!("Unknown log level `{}`, using info", config.log_level);
    }

    if let Err(e) = wpm::run(config).await {
        wpm::fail(e);
    }
}
