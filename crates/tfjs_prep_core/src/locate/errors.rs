//! Error types for package discovery.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocateError {
    /// None of the requested files exist under any search root.
    #[error("Package '{package}' not found in {roots} search root(s)")]
    PackageNotFound { package: String, roots: usize },

    /// The interpreter could not be launched or exited non-zero.
    #[error("Failed to query {python} for site-packages: {message}")]
    InterpreterFailed { python: String, message: String },

    /// The interpreter ran but its answer was not the expected JSON.
    #[error("Unexpected site-packages output from {python}: {source}")]
    InterpreterOutput {
        python: String,
        #[source]
        source: serde_json::Error,
    },
}

impl LocateError {
    pub fn package_not_found(package: impl Into<String>, roots: usize) -> Self {
        Self::PackageNotFound {
            package: package.into(),
            roots,
        }
    }

    pub fn interpreter_failed(python: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InterpreterFailed {
            python: python.into(),
            message: message.into(),
        }
    }
}

pub type LocateResult<T> = Result<T, LocateError>;
