//! Logging infrastructure for tfjs-prep.
//!
//! This module provides:
//! - A run logger with console + optional file + callback output
//! - Tail buffer of external tool output for error diagnosis
//! - Integration with the `tracing` ecosystem
//!
//! # Example
//!
//! ```no_run
//! use tfjs_prep_core::logging::{LogConfig, RunLogger};
//!
//! let logger = RunLogger::new(LogConfig::default(), None, None).unwrap();
//!
//! logger.phase("Model conversion");
//! logger.command("tensorflowjs_converter --input_format=keras model.h5 out");
//! logger.success("Converted");
//! ```

mod run_logger;
mod types;

pub use run_logger::RunLogger;
#[cfg(test)]
pub(crate) use run_logger::test_support;
pub use types::{LineCallback, LogConfig, LogLevel, MessagePrefix};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize global tracing subscriber for diagnostics.
///
/// This sets up a subscriber that:
/// - Respects RUST_LOG environment variable
/// - Falls back to the provided default level
/// - Outputs to stderr so it never interleaves with the console report
///
/// Should be called once at startup.
pub fn init_tracing(default_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_to_filter_str(default_level)));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Initialize tracing for tests (only logs warnings and above).
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

/// Convert LogLevel to filter string.
fn level_to_filter_str(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    }
}
