//! Command runner for external process execution.
//!
//! Everything that launches a process goes through [`ProcessRunner`] so
//! callers can be exercised with scripted outcomes instead of real tools.

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Create an output with the given exit code and no captured text.
    pub fn with_code(exit_code: i32) -> Self {
        Self {
            exit_code: Some(exit_code),
            ..Self::default()
        }
    }

    /// Whether the process exited with status 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Capability to run an external program to completion.
///
/// `Err` means the program could not be launched at all; a program that
/// ran and failed is reported through [`CommandOutput::exit_code`].
pub trait ProcessRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput>;
}

/// Runner backed by `std::process::Command`.
///
/// Blocks until the child exits. There is no timeout.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
        tracing::debug!("Running: {}", format_command(program, args));

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Render a command line for display, quoting arguments with spaces.
pub fn format_command(program: &str, args: &[String]) -> String {
    let mut parts = Vec::with_capacity(args.len() + 1);
    parts.push(quote(program));
    parts.extend(args.iter().map(|a| quote(a)));
    parts.join(" ")
}

fn quote(part: &str) -> String {
    if part.is_empty() || part.contains(char::is_whitespace) {
        format!("\"{}\"", part)
    } else {
        part.to_string()
    }
}

/// Find an executable on the command search path.
pub fn find_in_path(tool: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    find_in_dirs(tool, env::split_paths(&path_var))
}

fn find_in_dirs<I, P>(tool: &str, dirs: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    for dir in dirs {
        let full = dir.as_ref().join(tool);
        if full.is_file() {
            return Some(full);
        }
        #[cfg(windows)]
        {
            let exe = dir.as_ref().join(format!("{tool}.exe"));
            if exe.is_file() {
                return Some(exe);
            }
        }
    }
    None
}
