//! Process execution and tool lookup.

mod runner;

pub use runner::{find_in_path, format_command, CommandOutput, ProcessRunner, SystemRunner};
