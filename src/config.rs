//! App configuration (`wpm.ron`)
//!
//! Every field has a default, so a partial file (or none at all) is fine.

use crate::archive::DEFAULT_ARCHIVE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "wpm.ron";

/// Font used when the config does not name one
pub const DEFAULT_FONT_NAME: &str = "res/font/IosevkaNerdFontMono-Regular.ttf";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse `{}`: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub title: String,
    pub window_width: i32,
    pub window_height: i32,
    /// Resource archive to load fonts from
    pub archive_path: PathBuf,
    /// Practice text
    pub text_path: PathBuf,
    /// Archive chunk name of the font for the practice text
    pub font_name: String,
    /// Size of the practice text
    pub char_size: u16,
    /// Widget text size
    pub ui_char_size: u16,
    /// `error`, `warn`, `info`, `debug` or `trace`
    pub log_level: String,
    pub show_keyboard: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "wpm".to_string(),
            window_width: 1280,
            window_height: 720,
            archive_path: PathBuf::from(DEFAULT_ARCHIVE),
            text_path: PathBuf::from("input.txt"),
            font_name: DEFAULT_FONT_NAME.to_string(),
            char_size: 32,
            ui_char_size: 20,
            log_level: "info".to_string(),
            show_keyboard: true,
        }
    }
}

impl Config {
    pub fn from_ron(text: &str, path: &Path) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&text, path)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    /// A file that exists but fails to parse is still an error.
    ///
    /// Runs before the logger is up, so nothing is logged here.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new().indentor("  ".to_string());
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    /// Level filter for the logger, `None` when `log_level` is not a level name
    pub fn level_filter(&self) -> Option<log::LevelFilter> {
        self.log_level.parse().ok()
    }
}
