//! Conversion orchestrator that drives the external converter per model.

use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use super::errors::ConversionError;
use super::types::{ConversionResult, ConversionSummary, ModelConfig, OutputFile};
use crate::config::ConvertSettings;
use crate::io::{find_in_path, format_command, CommandOutput, ProcessRunner};
use crate::logging::RunLogger;
use crate::report::ReportGenerator;

/// How the external converter is invoked and judged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterOptions {
    /// Executable name or path.
    pub tool: String,
    /// Passed as `--input_format=<value>`.
    pub input_format: String,
    /// File that must exist in the output directory after a run.
    pub manifest: String,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self::from_settings(&ConvertSettings::default())
    }
}

impl ConverterOptions {
    pub fn from_settings(settings: &ConvertSettings) -> Self {
        Self {
            tool: settings.tool.clone(),
            input_format: settings.input_format.clone(),
            manifest: settings.manifest.clone(),
        }
    }

    /// Arguments for converting `source` into `output_dir`.
    pub fn args(&self, source: &Path, output_dir: &Path) -> Vec<String> {
        vec![
            format!("--input_format={}", self.input_format),
            source.to_string_lossy().into_owned(),
            output_dir.to_string_lossy().into_owned(),
        ]
    }
}

/// Converts models one after another and collects one result per model.
///
/// Runs are sequential and each converter call blocks until the process
/// exits. A hung converter hangs the run.
pub struct ConversionOrchestrator<'a> {
    runner: &'a dyn ProcessRunner,
    logger: &'a RunLogger,
    options: ConverterOptions,
}

impl<'a> ConversionOrchestrator<'a> {
    pub fn new(
        runner: &'a dyn ProcessRunner,
        logger: &'a RunLogger,
        options: ConverterOptions,
    ) -> Self {
        Self {
            runner,
            logger,
            options,
        }
    }

    /// Look up the converter on PATH and log where it resolved.
    ///
    /// A missing tool is only a warning; each model then fails at launch.
    pub fn check_tool(&self) -> Option<PathBuf> {
        let tool = &self.options.tool;
        let resolved = if tool.contains(std::path::MAIN_SEPARATOR) || tool.contains('/') {
            Some(PathBuf::from(tool)).filter(|p| p.is_file())
        } else {
            find_in_path(tool)
        };

        match &resolved {
            Some(path) => self.logger.info(&format!("Using converter: {}", path.display())),
            None => self.logger.warn(&format!(
                "{} not found on PATH; install it with: pip install tensorflowjs",
                tool
            )),
        }
        resolved
    }

    /// Convert every model in order.
    ///
    /// Always returns exactly one result per config.
    pub fn run(&self, configs: &[ModelConfig]) -> ConversionSummary {
        let results = configs
            .iter()
            .map(|config| {
                self.logger.section(&config.display_name);
                self.convert_model(config)
            })
            .collect();

        ConversionSummary::from_results(results)
    }

    /// Convert all models, print the summary, and generate the report once
    /// if anything converted.
    pub fn run_and_report(
        &self,
        configs: &[ModelConfig],
        report: &dyn ReportGenerator,
    ) -> ConversionSummary {
        let summary = self.run(configs);
        self.print_summary(&summary);

        if summary.any_succeeded() {
            self.logger.success("Models ready for deployment!");
            self.print_next_steps();

            match report.generate() {
                Ok(path) => self
                    .logger
                    .success(&format!("Integration example created: {}", path.display())),
                Err(e) => self
                    .logger
                    .error(&format!("Failed to write integration example: {}", e)),
            }
        }

        summary
    }

    /// Convert one model. Errors and panics become a failed result.
    pub fn convert_model(&self, config: &ModelConfig) -> ConversionResult {
        self.logger.clear_tail();

        let attempt = panic::catch_unwind(AssertUnwindSafe(|| self.try_convert(config)))
            .unwrap_or_else(|payload| Err(ConversionError::unexpected(panic_message(&*payload))));

        match attempt {
            Ok(files) => {
                self.logger
                    .success(&format!("{} converted successfully!", config.display_name));
                self.log_generated_files(&files);
                ConversionResult::succeeded(&config.display_name, files)
            }
            Err(e) => {
                tracing::debug!("{} failed: {:?}", config.display_name, e);
                match &e {
                    ConversionError::SourceMissing { .. } => self.logger.error(&format!(
                        "{} model not found: {}",
                        config.display_name,
                        config.source_path.display()
                    )),
                    other if other.is_process_failure() => {
                        self.logger.error(&format!(
                            "Conversion failed for {}: {}",
                            config.display_name, other
                        ));
                        self.logger.show_tail(&self.options.tool);
                    }
                    other => self
                        .logger
                        .error(&format!("Error converting {}: {}", config.display_name, other)),
                }
                ConversionResult::failed(&config.display_name, e)
            }
        }
    }

    fn try_convert(&self, config: &ModelConfig) -> Result<Vec<OutputFile>, ConversionError> {
        if !config.source_path.exists() {
            return Err(ConversionError::source_missing(&config.source_path));
        }

        self.logger.info(&format!("Converting {}...", config.display_name));

        fs::create_dir_all(&config.output_dir)
            .map_err(|e| ConversionError::create_output_dir(&config.output_dir, e))?;

        let args = self.options.args(&config.source_path, &config.output_dir);
        self.logger.command(&format_command(&self.options.tool, &args));

        let output = self
            .runner
            .run(&self.options.tool, &args)
            .map_err(|e| ConversionError::launch(&self.options.tool, e))?;
        self.record_output(&output);

        if !output.success() {
            return Err(ConversionError::exit_nonzero(&self.options.tool, output.exit_code));
        }

        let manifest = config.output_dir.join(&self.options.manifest);
        if !manifest.is_file() {
            return Err(ConversionError::manifest_missing(&self.options.tool, manifest));
        }

        list_output_files(&config.output_dir).map_err(|e| {
            ConversionError::unexpected(format!(
                "listing {}: {}",
                config.output_dir.display(),
                e
            ))
        })
    }

    fn record_output(&self, output: &CommandOutput) {
        for line in output.stdout.lines() {
            self.logger.output_line(line, false);
        }
        for line in output.stderr.lines() {
            self.logger.output_line(line, true);
        }
    }

    fn log_generated_files(&self, files: &[OutputFile]) {
        self.logger.info("Generated files:");
        for file in files {
            self.logger
                .info(&format!("  {} ({} bytes)", file.name, group_thousands(file.size)));
        }
    }

    /// Print per-model status and the `successCount/total` line.
    pub fn print_summary(&self, summary: &ConversionSummary) {
        self.logger.phase("CONVERSION SUMMARY");
        for result in &summary.results {
            match result.error() {
                None => self.logger.info(&format!("SUCCESS - {}", result.model)),
                Some(e) => self.logger.info(&format!("FAILED  - {} ({})", result.model, e)),
            }
        }
        self.logger.info(&format!(
            "Results: {}/{} models converted successfully",
            summary.success_count, summary.total
        ));
    }

    fn print_next_steps(&self) {
        self.logger.section("NEXT STEPS");
        self.logger
            .info("1. Install in Express.js: npm install @tensorflow/tfjs-node");
        self.logger
            .info("2. Copy models/ folder to your Express.js project");
        self.logger.info("3. Load models in your Express.js app");
    }
}

/// Files directly inside `dir` with their sizes, sorted by name.
fn list_output_files(dir: &Path) -> std::io::Result<Vec<OutputFile>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let metadata = entry.metadata()?;
        files.push(OutputFile {
            name: entry.file_name().to_string_lossy().into_owned(),
            size: metadata.len(),
        });
    }
    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic while converting model".to_string()
    }
}
