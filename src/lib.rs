//! MoGE / MoUI: a small 2D engine scaffold on top of macroquad
//!
//! - `archive`: the `data.dat` resource archive (chunk codec, scanner, mutator)
//! - `resources`: decoded textures/fonts cached by chunk name
//! - `ui`: immediate-mode layout and widgets
//! - `timer`: frame-delta timers and alarms
//! - `config` / `logging`: ambient setup shared by the demo and the packer

pub mod archive;
pub mod config;
pub mod logging;
pub mod resources;
pub mod timer;
pub mod ui;

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
