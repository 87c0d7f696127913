use crate::error::{Result, StampError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Keys accepted by [`StampConfig::get`] and [`StampConfig::set`].
pub const CONFIG_KEYS: &[&str] = &["real-time", "date-source", "debug-logging"];

/// User settings, stored as `config.json` in the config directory.
///
/// Missing fields fall back to their defaults, so a partial file is merged over
/// [`StampConfig::default`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct StampConfig {
    /// Stamp a task as soon as the line is finished in a live editor
    pub enable_real_time_adding: bool,

    /// Use the file creation time for retroactive stamping (modified time otherwise)
    pub use_file_creation_date: bool,

    /// Raise log verbosity to debug
    pub enable_debug_logging: bool,
}

impl Default for StampConfig {
    fn default() -> Self {
        Self {
            enable_real_time_adding: true,
            use_file_creation_date: true,
            enable_debug_logging: false,
        }
    }
}

impl StampConfig {
    pub fn path<P: AsRef<Path>>(config_dir: P) -> PathBuf {
        config_dir.as_ref().join(CONFIG_FILENAME)
    }

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = Self::path(config_dir);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(StampError::Io)?;
        let config: StampConfig =
            serde_json::from_str(&content).map_err(StampError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(StampError::Io)?;
        }

        let content = serde_json::to_string_pretty(self).map_err(StampError::Serialization)?;
        fs::write(Self::path(config_dir), content).map_err(StampError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "real-time" => Some(on_off(self.enable_real_time_adding).to_string()),
            "date-source" => Some(
                if self.use_file_creation_date {
                    "creation"
                } else {
                    "modified"
                }
                .to_string(),
            ),
            "debug-logging" => Some(on_off(self.enable_debug_logging).to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "real-time" => self.enable_real_time_adding = parse_switch(value)?,
            "date-source" => {
                self.use_file_creation_date = match value {
                    "creation" | "created" | "ctime" => true,
                    "modified" | "mtime" => false,
                    other => {
                        return Err(format!(
                            "Invalid date-source: {} (expected creation or modified)",
                            other
                        ));
                    }
                }
            }
            "debug-logging" => self.enable_debug_logging = parse_switch(value)?,
            other => return Err(format!("Unknown config key: {}", other)),
        }
        Ok(())
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

fn parse_switch(value: &str) -> std::result::Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => Err(format!("Invalid value: {} (expected on or off)", other)),
    }
}
