//! Convert the configured Keras models for TensorFlow.js.
//!
//! Always exits 0 once the run completes; failed models are reported in
//! the summary instead.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tfjs_prep_app::{build_logger, startup, CommonArgs};
use tfjs_prep_core::convert::{ConversionOrchestrator, ConverterOptions};
use tfjs_prep_core::io::SystemRunner;
use tfjs_prep_core::report::ScaffoldReport;

#[derive(Parser, Debug)]
#[command(
    name = "preconvert-models",
    version,
    about = "Convert Keras models with tensorflowjs_converter and emit an Express.js example"
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
    let convert = &settings.convert;

    logger.phase("ML Model Converter (CLI method)");

    let runner = SystemRunner::new();
    let orchestrator =
        ConversionOrchestrator::new(&runner, &logger, ConverterOptions::from_settings(convert));
    orchestrator.check_tool();

    let configs = convert.model_configs();
    let report = ScaffoldReport::new(&convert.scaffold_path);
    let summary = orchestrator.run_and_report(&configs, &report);

    tracing::debug!(
        "Conversion finished: {}/{}",
        summary.success_count,
        summary.total
    );

    Ok(ExitCode::SUCCESS)
}
