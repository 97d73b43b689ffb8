//! Error types for converting a single model.
//!
//! These never cross the batch boundary; each is folded into a failed
//! [`ConversionResult`](super::ConversionResult).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    /// The source artifact does not exist.
    #[error("Source model not found: {path}")]
    SourceMissing { path: PathBuf },

    #[error("Failed to create output directory {path}: {source}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The converter could not be started at all.
    #[error("Failed to run {tool}: {source}")]
    Launch {
        tool: String,
        #[source]
        source: io::Error,
    },

    #[error("{tool} failed with exit code {}", describe_exit(.exit_code))]
    ExitNonzero { tool: String, exit_code: Option<i32> },

    /// The converter reported success but wrote no manifest.
    #[error("{tool} exited successfully but {path} was not created")]
    ManifestMissing { tool: String, path: PathBuf },

    /// Anything else that went wrong while handling the model.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "none (terminated by signal)".to_string(),
    }
}

impl ConversionError {
    pub fn source_missing(path: impl Into<PathBuf>) -> Self {
        Self::SourceMissing { path: path.into() }
    }

    pub fn create_output_dir(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::CreateOutputDir {
            path: path.into(),
            source,
        }
    }

    pub fn launch(tool: impl Into<String>, source: io::Error) -> Self {
        Self::Launch {
            tool: tool.into(),
            source,
        }
    }

    pub fn exit_nonzero(tool: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self::ExitNonzero {
            tool: tool.into(),
            exit_code,
        }
    }

    pub fn manifest_missing(tool: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::ManifestMissing {
            tool: tool.into(),
            path: path.into(),
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    /// Whether the external converter itself reported the failure.
    pub fn is_process_failure(&self) -> bool {
        matches!(
            self,
            Self::Launch { .. } | Self::ExitNonzero { .. } | Self::ManifestMissing { .. }
        )
    }
}
