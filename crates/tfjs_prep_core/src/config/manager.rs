//! Config manager for loading and writing the config file.
//!
//! Key features:
//! - Missing file falls back to built-in defaults
//! - Atomic writes (write to temp file, then rename)

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use thiserror::Error;

use super::settings::Settings;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "tfjs-prep.toml";

/// Errors that can occur during config operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Config file already exists: {0}")]
    AlreadyExists(PathBuf),
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Manages application configuration.
pub struct ConfigManager {
    /// Path to the config file.
    config_path: PathBuf,
    /// Current settings loaded in memory.
    settings: Settings,
}

impl ConfigManager {
    /// Create a new config manager with the given config file path.
    ///
    /// Does not load the config - call `load()` or `load_or_default()` after.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            settings: Settings::default(),
        }
    }

    /// Get a reference to the current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Take ownership of the loaded settings.
    pub fn into_settings(self) -> Settings {
        self.settings
    }

    /// Load config from file.
    ///
    /// Returns error if file doesn't exist.
    pub fn load(&mut self) -> ConfigResult<()> {
        if !self.config_path.exists() {
            return Err(ConfigError::NotFound(self.config_path.clone()));
        }

        let content = fs::read_to_string(&self.config_path)?;
        self.settings = toml::from_str(&content)?;
        Ok(())
    }

    /// Load config from file, keeping defaults if it doesn't exist.
    ///
    /// Returns whether a file was read.
    pub fn load_or_default(&mut self) -> ConfigResult<bool> {
        if self.config_path.exists() {
            self.load()?;
            Ok(true)
        } else {
            tracing::debug!(
                "No config at {}, using defaults",
                self.config_path.display()
            );
            self.settings = Settings::default();
            Ok(false)
        }
    }

    /// Write the built-in defaults to the config path.
    ///
    /// Refuses to overwrite an existing file.
    pub fn write_default(&mut self) -> ConfigResult<()> {
        if self.config_path.exists() {
            return Err(ConfigError::AlreadyExists(self.config_path.clone()));
        }

        self.settings = Settings::default();
        let content = self.generate_config_with_comments()?;
        self.atomic_write(&content)?;
        Ok(())
    }

    /// Generate config content with a header comment.
    fn generate_config_with_comments(&self) -> ConfigResult<String> {
        let mut output = String::new();

        output.push_str("# tfjs-prep configuration\n");
        output.push_str("# [patch] is used by fix-tfjs, [convert] by preconvert-models.\n");
        output.push_str("# patch.backup: \"overwrite\" or \"keep-original\"\n\n");
        output.push_str(&toml::to_string_pretty(&self.settings)?);

        Ok(output)
    }

    /// Write content to config file atomically.
    fn atomic_write(&self, content: &str) -> io::Result<()> {
        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.config_path.with_extension("toml.tmp");

        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }

        fs::rename(&temp_path, &self.config_path)?;

        Ok(())
    }
}
