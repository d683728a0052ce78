//! wpm: typing practice on top of the engine
//!
//! Reads a practice text, times how fast it is typed back, and shows the
//! result next to an on-screen keyboard.

pub mod keyboard;
pub mod session;
pub mod view;

use log::{error, info, warn};
use macroquad::prelude::*;
use moge::archive::{Archive, ArchiveError};
use moge::config::Config;
use moge::resources::{Decode, ResourceCache, Resources};
use moge::ui::{theme, MacroquadPainter, MouseState, Ui};
use session::{Input, TypingSession};
use std::path::PathBuf;
use thiserror::Error;
use view::PanelState;

/// Fatal startup errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("could not read practice text `{}`: {source}", .path.display())]
    Text {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

/// Practice text from disk
pub fn load_text(config: &Config) -> Result<String, AppError> {
    let raw = std::fs::read_to_string(&config.text_path).map_err(|source| AppError::Text {
        path: config.text_path.clone(),
        source,
    })?;
    Ok(session::prepare_text(&raw))
}

/// Font for the practice text, from the archive when there is one.
///
/// Without an archive the default font is used. Once an archive exists the
/// configured font must be in it.
pub fn load_font(config: &Config) -> Result<Option<Font>, AppError> {
    let archive = Archive::new(&config.archive_path);
    if !archive.exists() {
        warn!(
            "`{}` not found, using the default font",
            archive.path().display()
        );
        return Ok(None);
    }

    let mut resources = Resources::new();
    let font = load_assets(
        &archive,
        &mut resources.textures,
        &mut resources.fonts,
        &config.font_name,
    )?;
    info!(
        "Font `{}` and {} texture(s) loaded",
        config.font_name,
        resources.textures.len()
    );
    Ok(Some(font))
}

/// Every texture plus the single font named `font_name`
fn load_assets<T: Decode, F: Decode + Clone>(
    archive: &Archive,
    textures: &mut ResourceCache<T>,
    fonts: &mut ResourceCache<F>,
    font_name: &str,
) -> Result<F, ArchiveError> {
    textures.load_all(archive)?;
    Ok(fonts.load_one(archive, font_name)?.clone())
}

/// Keystrokes since the last frame
fn poll_input() -> Vec<Input> {
    let mut inputs = Vec::new();
    let ctrl = is_key_down(KeyCode::LeftControl) || is_key_down(KeyCode::RightControl);
    if is_key_pressed(KeyCode::Backspace) {
        inputs.push(if ctrl { Input::DeleteWord } else { Input::Backspace });
    }
    if is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter) {
        inputs.push(Input::Newline);
    }
    while let Some(ch) = get_char_pressed() {
        if let Some(input) = Input::from_char(ch) {
            inputs.push(input);
        }
    }
    inputs
}

/// Load everything, then run the frame loop forever
pub async fn run(config: Config) -> Result<(), AppError> {
    let text = load_text(&config)?;
    info!("Practice text: {} chars", text.chars().count());
    let font = load_font(&config)?;

    let mut session = TypingSession::new(&text);
    let mut ui = Ui::new(MacroquadPainter::new(font.clone())).with_char_size(config.ui_char_size);
    let mut text_painter = MacroquadPainter::new(font.clone());
    let mut panel = PanelState {
        show_keyboard: config.show_keyboard,
        char_size: f32::from(config.char_size),
    };

    loop {
        let delta = get_frame_time();
        for input in poll_input() {
            session.apply(input);
        }
        let was_done = session.is_done();
        session.update(delta);
        if session.is_done() && !was_done {
            info!(
                "Done in {:.2}s, {:.1} wpm, {} mistake(s)",
                session.elapsed(),
                session.wpm(),
                session.mistakes()
            );
        }

        clear_background(theme::BG_COLOR);

        if panel.show_keyboard {
            let board = keyboard::size();
            let origin = Vec2::new(
                ((screen_width() - board.x) / 2.0).max(0.0),
                screen_height() - board.y - 10.0,
            );
            keyboard::draw(origin, font.as_ref());
        }

        view::draw_text(&mut text_painter, &session, panel.char_size);

        ui.begin_frame(MouseState::poll());
        let anchor = Vec2::new(screen_width() - 10.0, 10.0);
        if view::draw_panel(&mut ui, anchor, &session, &mut panel) {
            info!("Restarting");
            session.reset();
        }

        next_frame().await;
    }
}

/// Report a fatal error and exit
pub fn fail(err: AppError) -> ! {
    error!("{}", err);
    std::process::exit(1);
}
