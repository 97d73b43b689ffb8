//! Model configurations and conversion results.

use std::path::PathBuf;

use super::errors::ConversionError;

/// One model to convert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    pub source_path: PathBuf,
    pub output_dir: PathBuf,
    pub display_name: String,
}

impl ModelConfig {
    pub fn new(
        source_path: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            output_dir: output_dir.into(),
            display_name: display_name.into(),
        }
    }
}

/// A file the converter produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub name: String,
    pub size: u64,
}

/// Terminal state of one model.
#[derive(Debug)]
pub enum ConversionOutcome {
    /// Converted; lists the output directory contents, sorted by name.
    Succeeded { files: Vec<OutputFile> },
    Failed(ConversionError),
}

/// Result for one model. Never changes after creation.
#[derive(Debug)]
pub struct ConversionResult {
    pub model: String,
    pub outcome: ConversionOutcome,
}

impl ConversionResult {
    pub fn succeeded(model: impl Into<String>, files: Vec<OutputFile>) -> Self {
        Self {
            model: model.into(),
            outcome: ConversionOutcome::Succeeded { files },
        }
    }

    pub fn failed(model: impl Into<String>, error: ConversionError) -> Self {
        Self {
            model: model.into(),
            outcome: ConversionOutcome::Failed(error),
        }
    }

    pub fn success(&self) -> bool {
        matches!(self.outcome, ConversionOutcome::Succeeded { .. })
    }

    pub fn error(&self) -> Option<&ConversionError> {
        match &self.outcome {
            ConversionOutcome::Failed(e) => Some(e),
            ConversionOutcome::Succeeded { .. } => None,
        }
    }
}

/// Aggregate of a conversion run, in model order.
#[derive(Debug)]
pub struct ConversionSummary {
    pub results: Vec<ConversionResult>,
    pub success_count: usize,
    pub total: usize,
}

impl ConversionSummary {
    pub fn from_results(results: Vec<ConversionResult>) -> Self {
        let success_count = results.iter().filter(|r| r.success()).count();
        let total = results.len();
        Self {
            results,
            success_count,
            total,
        }
    }

    pub fn failure_count(&self) -> usize {
        self.total - self.success_count
    }

    pub fn any_succeeded(&self) -> bool {
        self.success_count > 0
    }
}
