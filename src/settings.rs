//! Code for loading program settings.
use crate::get_config_dir;
use crate::input::read_toml;
use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Get the path to where the settings file will be read from
pub fn get_settings_file_path() -> PathBuf {
    get_config_dir().join(SETTINGS_FILE_NAME)
}

/// Program settings from the user's configuration file
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct Settings {
    /// The program log level, overriding the built-in default
    pub log_level: Option<String>,
    /// Whether to overwrite existing output folders by default
    #[serde(default)]
    pub overwrite: bool,
}

impl Settings {
    /// Read the settings file from the user's configuration directory.
    ///
    /// If the file is not present, default values for settings will be used.
    ///
    /// # Returns
    ///
    /// The program settings as a `Settings` struct or an error if the file is invalid
    pub fn load() -> Result<Settings> {
        Self::load_from_path(&get_settings_file_path())
    }

    /// Read the settings file from the specified path, if it exists
    fn load_from_path(file_path: &Path) -> Result<Settings> {
        if !file_path.is_file() {
            return Ok(Settings::default());
        }

        read_toml(file_path)
    }
}
