//! Repair the installed tensorflowjs package for newer NumPy releases.
//!
//! Exits 1 when the package cannot be found at all; per-file failures are
//! reported but do not change the exit code.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tfjs_prep_app::{build_logger, startup, CommonArgs};
use tfjs_prep_core::io::SystemRunner;
use tfjs_prep_core::locate::{discover_search_roots, LocateError, PathLocator};
use tfjs_prep_core::patch::Patcher;

#[derive(Parser, Debug)]
#[command(
    name = "fix-tfjs",
    version,
    about = "Patch tensorflowjs sources for NumPy >= 1.20 compatibility"
)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let Some(settings) = startup(&cli.common)? else {
        return Ok(ExitCode::SUCCESS);
    };
    let logger = build_logger(&settings, cli.common.verbose)?;
    let patch = &settings.patch;

    logger.phase(&format!("Repairing {}", patch.package));
    for rule in &patch.rules {
        logger.debug(&format!("Rule: {} -> {}", rule.pattern, rule.replacement));
    }

    let roots = if patch.search_roots.is_empty() {
        discover_search_roots(&SystemRunner::new(), &patch.python)
    } else {
        patch.search_roots.clone()
    };
    for root in &roots {
        logger.debug(&format!("Search root: {}", root.display()));
    }

    let locator = PathLocator::new(roots);
    let files = match locator.locate_required(&patch.package, &patch.files) {
        Ok(files) => files,
        Err(e @ LocateError::PackageNotFound { .. }) => {
            tracing::debug!("{}", e);
            logger.error(&format!("No {} files found.", patch.package));
            logger.info(&format!("Make sure {} is installed.", patch.package));
            return Ok(ExitCode::from(1));
        }
        Err(e) => return Err(e.into()),
    };

    for wanted in &patch.files {
        if !files.iter().any(|f| &f.name == wanted) {
            logger.warn(&format!("{} not found in {}", wanted, patch.package));
        }
    }

    let patcher = Patcher::new(patch.rules.clone()).with_backup_policy(patch.backup);
    let summary = patcher.patch_all(&files, &logger);

    if summary.all_succeeded() {
        logger.success("All files repaired!");
    } else {
        logger.warn(&format!(
            "{}/{} files repaired, {} failed",
            summary.success_count,
            summary.total,
            summary.failure_count()
        ));
    }
    logger.info("Now run preconvert-models to convert the models.");

    Ok(ExitCode::SUCCESS)
}
