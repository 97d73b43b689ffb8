//! Settings struct with TOML-based sections.
//!
//! `[patch]` drives `fix-tfjs`, `[convert]` drives `preconvert-models`,
//! `[logging]` is shared by both.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::convert::ModelConfig;
use crate::logging::{LogConfig, LogLevel};
use crate::patch::{BackupPolicy, SubstitutionRule};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Converter repair settings.
    #[serde(default)]
    pub patch: PatchSettings,

    /// Model conversion settings.
    #[serde(default)]
    pub convert: ConvertSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Which package to repair and how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchSettings {
    /// Installed package directory name.
    #[serde(default = "default_package")]
    pub package: String,

    /// Files inside the package that need repair.
    #[serde(default = "default_files")]
    pub files: Vec<String>,

    /// Python interpreter asked for its site-packages locations.
    #[serde(default = "default_python")]
    pub python: String,

    /// Explicit search roots. Empty means ask the interpreter.
    #[serde(default)]
    pub search_roots: Vec<PathBuf>,

    /// What to do with an existing `.bak` file.
    #[serde(default)]
    pub backup: BackupPolicy,

    /// Substitutions applied in order.
    #[serde(default = "default_rules")]
    pub rules: Vec<SubstitutionRule>,
}

fn default_package() -> String {
    "tensorflowjs".to_string()
}

fn default_files() -> Vec<String> {
    vec!["read_weights.py".to_string(), "write_weights.py".to_string()]
}

fn default_python() -> String {
    "python3".to_string()
}

fn default_rules() -> Vec<SubstitutionRule> {
    vec![
        SubstitutionRule::new("np.bool", "bool"),
        SubstitutionRule::new("np.object", "object"),
    ]
}

impl Default for PatchSettings {
    fn default() -> Self {
        Self {
            package: default_package(),
            files: default_files(),
            python: default_python(),
            search_roots: Vec::new(),
            backup: BackupPolicy::default(),
            rules: default_rules(),
        }
    }
}

/// One model to convert, relative to `models_dir`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    /// Keras `.h5` file.
    pub source: String,
    /// Output directory for the converted model.
    pub output_dir: String,
    /// Name used in console output.
    pub name: String,
}

impl ModelEntry {
    pub fn new(
        source: impl Into<String>,
        output_dir: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            output_dir: output_dir.into(),
            name: name.into(),
        }
    }
}

/// External converter invocation and model list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertSettings {
    /// Converter executable, resolved on PATH.
    #[serde(default = "default_tool")]
    pub tool: String,

    /// Value passed as `--input_format=<value>`.
    #[serde(default = "default_input_format")]
    pub input_format: String,

    /// Directory holding model sources and outputs.
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,

    /// File whose presence marks a successful conversion.
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// Where the integration scaffold is written.
    #[serde(default = "default_scaffold_path")]
    pub scaffold_path: PathBuf,

    #[serde(default = "default_models")]
    pub models: Vec<ModelEntry>,
}

fn default_tool() -> String {
    "tensorflowjs_converter".to_string()
}

fn default_input_format() -> String {
    "keras".to_string()
}

fn default_models_dir() -> PathBuf {
    PathBuf::from("models")
}

fn default_manifest() -> String {
    "model.json".to_string()
}

fn default_scaffold_path() -> PathBuf {
    PathBuf::from("express_example.js")
}

fn default_models() -> Vec<ModelEntry> {
    vec![
        ModelEntry::new("model_nlp.h5", "model_nlp", "NLP Model"),
        ModelEntry::new("model_pilgan.h5", "model_pilgan", "Quiz Model"),
    ]
}

impl Default for ConvertSettings {
    fn default() -> Self {
        Self {
            tool: default_tool(),
            input_format: default_input_format(),
            models_dir: default_models_dir(),
            manifest: default_manifest(),
            scaffold_path: default_scaffold_path(),
            models: default_models(),
        }
    }
}

impl ConvertSettings {
    /// Resolve the model list against `models_dir`.
    pub fn model_configs(&self) -> Vec<ModelConfig> {
        self.model_configs_in(&self.models_dir)
    }

    /// Resolve the model list against an explicit directory.
    pub fn model_configs_in(&self, models_dir: &Path) -> Vec<ModelConfig> {
        self.models
            .iter()
            .map(|entry| {
                ModelConfig::new(
                    models_dir.join(&entry.source),
                    models_dir.join(&entry.output_dir),
                    entry.name.clone(),
                )
            })
            .collect()
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Minimum level for console lines and diagnostics.
    #[serde(default)]
    pub level: LogLevel,

    /// Prefix lines with a timestamp.
    #[serde(default)]
    pub show_timestamps: bool,

    /// Converter output lines kept for failure diagnosis.
    #[serde(default = "default_error_tail")]
    pub error_tail: usize,

    /// Optional file receiving a copy of the console report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

fn default_error_tail() -> usize {
    20
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            show_timestamps: false,
            error_tail: default_error_tail(),
            log_file: None,
        }
    }
}

impl LoggingSettings {
    /// Build the run logger configuration.
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            level: self.level,
            error_tail: self.error_tail,
            show_timestamps: self.show_timestamps,
            console: true,
        }
    }
}
