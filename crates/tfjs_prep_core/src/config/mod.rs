//! Configuration management for tfjs-prep.
//!
//! This module provides:
//! - TOML-based configuration with one section per command
//! - Built-in defaults when no config file exists
//! - Atomic writes of a default config (write to temp, then rename)
//!
//! # Example
//!
//! ```no_run
//! use tfjs_prep_core::config::ConfigManager;
//!
//! let mut config = ConfigManager::new("tfjs-prep.toml");
//! config.load_or_default().unwrap();
//!
//! println!("Package: {}", config.settings().patch.package);
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult, DEFAULT_CONFIG_FILE};
pub use settings::{ConvertSettings, LoggingSettings, ModelEntry, PatchSettings, Settings};
