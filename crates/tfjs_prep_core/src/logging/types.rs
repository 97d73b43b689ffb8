//! Logging types and configuration.

use serde::{Deserialize, Serialize};

/// Log level for filtering messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace-level debugging (very verbose).
    Trace,
    /// Debug information.
    Debug,
    /// General information.
    #[default]
    Info,
    /// Warnings.
    Warn,
    /// Errors.
    Error,
}

/// Configuration for run logger behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level to output.
    pub level: LogLevel,
    /// Number of tool output lines kept for failure diagnosis.
    pub error_tail: usize,
    /// Show timestamps in log output.
    pub show_timestamps: bool,
    /// Echo messages to stdout.
    pub console: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            error_tail: 20,
            show_timestamps: false,
            console: true,
        }
    }
}

impl LogConfig {
    /// Configuration that never touches stdout (callback/file only).
    pub fn quiet() -> Self {
        Self {
            console: false,
            ..Self::default()
        }
    }
}

/// Callback receiving every formatted line.
pub type LineCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Message prefix types for consistent formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessagePrefix {
    /// Shell command: `$ command`
    Command,
    /// Phase marker: `=== Phase ===`
    Phase,
    /// Section marker: `--- Section ---`
    Section,
    /// Success: `[SUCCESS]`
    Success,
    /// Warning: `[WARNING]`
    Warning,
    /// Error: `[ERROR]`
    Error,
}

impl MessagePrefix {
    /// Format a message with this prefix.
    pub fn format(&self, message: &str) -> String {
        match self {
            MessagePrefix::Command => format!("$ {}", message),
            MessagePrefix::Phase => format!("=== {} ===", message),
            MessagePrefix::Section => format!("--- {} ---", message),
            MessagePrefix::Success => format!("[SUCCESS] {}", message),
            MessagePrefix::Warning => format!("[WARNING] {}", message),
            MessagePrefix::Error => format!("[ERROR] {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_format_consistently() {
        assert_eq!(MessagePrefix::Command.format("ls"), "$ ls");
        assert_eq!(MessagePrefix::Phase.format("Patch"), "=== Patch ===");
        assert_eq!(MessagePrefix::Error.format("boom"), "[ERROR] boom");
    }

    #[test]
    fn level_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            level: LogLevel,
        }
        let parsed: Wrapper = toml::from_str("level = \"debug\"").unwrap();
        assert_eq!(parsed.level, LogLevel::Debug);
    }
}
