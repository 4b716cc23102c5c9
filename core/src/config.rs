//! Recorder configuration (`recorder.toml`)
//!
//! Chooses which live inputs are sampled into each recorded frame. Stored as
//! TOML, either at an explicit path or in the platform config directory.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::replay::types::is_reserved_input_id;

/// File name used inside [`config_dir`]
pub const CONFIG_FILE_NAME: &str = "recorder.toml";

/// Which inputs a [`Recorder`](crate::replay::Recorder) captures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RecorderConfig {
    /// Virtual button names sampled every recorded frame
    #[serde(default)]
    pub recorded_buttons: Vec<String>,
    /// Axis names sampled every recorded frame
    #[serde(default)]
    pub recorded_axes: Vec<String>,
    /// Keyboard key names sampled every recorded frame
    #[serde(default)]
    pub recorded_keys: Vec<String>,
    /// Capture mouse buttons 0-2 and the cursor position (default: false)
    #[serde(default)]
    pub record_mouse: bool,
    /// Pretty-print recordings written by tools (default: false)
    #[serde(default)]
    pub pretty_json: bool,
}

/// Errors loading or saving a config file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("config is not valid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("config could not be serialized: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl RecorderConfig {
    /// Config recording the given buttons and axes
    pub fn with_inputs<B, A>(buttons: B, axes: A) -> Self
    where
        B: IntoIterator,
        B::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self {
            recorded_buttons: buttons.into_iter().map(Into::into).collect(),
            recorded_axes: axes.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Check for ids that would clash inside a frame.
    ///
    /// Returns a list of warning messages; an empty list means the config is clean.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        let groups = [
            (&self.recorded_buttons, "recorded_buttons"),
            (&self.recorded_axes, "recorded_axes"),
            (&self.recorded_keys, "recorded_keys"),
        ];
        for (names, field) in groups {
            for name in names {
                if is_reserved_input_id(name) {
                    warnings.push(format!(
                        "{} entry '{}' uses a reserved mouse input id",
                        field, name
                    ));
                }
                if !seen.insert(name.as_str()) {
                    warnings.push(format!(
                        "{} entry '{}' is already recorded under another entry",
                        field, name
                    ));
                }
            }
        }

        warnings
    }
}

/// Returns the platform-specific configuration directory.
///
/// On Windows: `%APPDATA%\InputVCR\config`
/// On macOS: `~/Library/Application Support/io.inputvcr.InputVCR`
/// On Linux: `~/.config/InputVCR`
///
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io.inputvcr", "", "InputVCR")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Loads the configuration from the platform config directory.
///
/// Returns default values if the file doesn't exist or cannot be parsed.
pub fn load() -> RecorderConfig {
    let Some(path) = config_dir().map(|dir| dir.join(CONFIG_FILE_NAME)) else {
        return RecorderConfig::default();
    };
    match load_from(&path) {
        Ok(config) => config,
        Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            RecorderConfig::default()
        }
        Err(e) => {
            tracing::warn!("Ignoring {}: {}", path.display(), e);
            RecorderConfig::default()
        }
    }
}

/// Loads the configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<RecorderConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Saves the configuration to the platform config directory.
///
/// Creates the directory if it doesn't exist. Does nothing when no home
/// directory can be determined.
pub fn save(config: &RecorderConfig) -> Result<(), ConfigError> {
    if let Some(dir) = config_dir() {
        std::fs::create_dir_all(&dir)?;
        save_to(&dir.join(CONFIG_FILE_NAME), config)?;
    }
    Ok(())
}

/// Saves the configuration to an explicit path.
pub fn save_to(path: &Path, config: &RecorderConfig) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
