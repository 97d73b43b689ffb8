//! Error types for patching a single file.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why one file could not be patched.
#[derive(Error, Debug)]
pub enum PatchError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write backup {path}: {source}")]
    Backup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PatchError {
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn backup(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Backup {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

pub type PatchResult<T> = Result<T, PatchError>;
