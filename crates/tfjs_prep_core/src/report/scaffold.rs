//! Static Express.js example showing how to load the converted models.
//!
//! The content never depends on which models converted.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::ReportGenerator;

/// The scaffold text, byte-for-byte.
pub const EXPRESS_SCAFFOLD: &str = include_str!("../../templates/express_example.js");

/// Render the scaffold. Takes no inputs.
pub fn render_scaffold() -> &'static str {
    EXPRESS_SCAFFOLD
}

/// Writes the scaffold to a fixed path.
#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    path: PathBuf,
}

impl ScaffoldReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportGenerator for ScaffoldReport {
    fn generate(&self) -> io::Result<PathBuf> {
        fs::write(&self.path, render_scaffold())?;
        tracing::debug!("Wrote scaffold to {}", self.path.display());
        Ok(self.path.clone())
    }
}
