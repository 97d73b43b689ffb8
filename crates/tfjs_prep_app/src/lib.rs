//! Shared startup for the `fix-tfjs` and `preconvert-models` binaries.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tfjs_prep_core::config::{ConfigManager, Settings, DEFAULT_CONFIG_FILE};
use tfjs_prep_core::logging::{init_tracing, LogLevel, RunLogger};

/// Flags accepted by both commands. None are required.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Config file (missing file means built-in defaults)
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Show debug output, including converter output
    #[arg(short, long)]
    pub verbose: bool,

    /// Write the default config to --config and exit
    #[arg(long)]
    pub init_config: bool,
}

/// Initialize tracing and load settings.
///
/// Returns `None` when `--init-config` was handled and the command should exit.
pub fn startup(args: &CommonArgs) -> Result<Option<Settings>> {
    init_tracing(if args.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    });

    let mut manager = ConfigManager::new(&args.config);

    if args.init_config {
        manager
            .write_default()
            .with_context(|| format!("writing {}", args.config.display()))?;
        println!("Wrote default config to {}", args.config.display());
        return Ok(None);
    }

    let loaded = manager
        .load_or_default()
        .with_context(|| format!("loading {}", args.config.display()))?;
    tracing::debug!(
        "Settings from {}",
        if loaded { "config file" } else { "defaults" }
    );

    Ok(Some(manager.into_settings()))
}

/// Console logger configured from settings.
pub fn build_logger(settings: &Settings, verbose: bool) -> Result<RunLogger> {
    let mut config = settings.logging.to_log_config();
    if verbose {
        config.level = LogLevel::Debug;
    }

    RunLogger::new(config, settings.logging.log_file.as_deref(), None)
        .context("opening log file")
}
