//! Integration scaffold emitted after a successful conversion.

mod scaffold;

pub use scaffold::{render_scaffold, ScaffoldReport, EXPRESS_SCAFFOLD};

use std::io;
use std::path::PathBuf;

/// Side-effecting report step run once after conversion.
pub trait ReportGenerator {
    /// Produce the report and return where it was written.
    fn generate(&self) -> io::Result<PathBuf>;
}
