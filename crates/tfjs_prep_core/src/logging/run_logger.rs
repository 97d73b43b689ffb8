//! Run logger with console, file, and callback output.
//!
//! One logger is shared by a whole command run. It:
//! - Prints prefixed, human-readable lines to stdout
//! - Mirrors every line to an optional log file
//! - Forwards every line to an optional callback
//! - Keeps a tail buffer of external tool output for failure diagnosis

use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Local;
use parking_lot::Mutex;

use super::types::{LineCallback, LogConfig, LogLevel, MessagePrefix};

/// Logger for user-visible progress of a single command run.
pub struct RunLogger {
    /// File writer (buffered).
    file_writer: Mutex<Option<BufWriter<File>>>,
    /// Callback for captured output.
    callback: Option<LineCallback>,
    /// Logging configuration.
    config: LogConfig,
    /// Recent tool output lines.
    tail_buffer: Mutex<VecDeque<String>>,
}

impl RunLogger {
    /// Create a new run logger.
    ///
    /// # Arguments
    /// * `config` - Logging configuration
    /// * `log_file` - Optional file that receives a copy of every line
    /// * `callback` - Optional callback receiving every line
    pub fn new(
        config: LogConfig,
        log_file: Option<&Path>,
        callback: Option<LineCallback>,
    ) -> std::io::Result<Self> {
        let file_writer = match log_file {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        fs::create_dir_all(parent)?;
                    }
                }
                Some(BufWriter::new(File::create(path)?))
            }
            None => None,
        };

        Ok(Self {
            file_writer: Mutex::new(file_writer),
            callback,
            tail_buffer: Mutex::new(VecDeque::with_capacity(config.error_tail)),
            config,
        })
    }

    /// Logger that only reports through the callback.
    pub fn with_callback(callback: LineCallback) -> Self {
        Self {
            file_writer: Mutex::new(None),
            callback: Some(callback),
            tail_buffer: Mutex::new(VecDeque::new()),
            config: LogConfig::quiet(),
        }
    }

    /// Log a message at the specified level.
    pub fn log(&self, level: LogLevel, message: &str) {
        if level < self.config.level {
            return;
        }

        let formatted = self.format_message(message);
        self.output(&formatted);
    }

    /// Log an info message.
    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    /// Log a debug message.
    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    /// Log a warning message.
    pub fn warn(&self, message: &str) {
        let msg = MessagePrefix::Warning.format(message);
        self.log(LogLevel::Warn, &msg);
    }

    /// Log an error message.
    pub fn error(&self, message: &str) {
        let msg = MessagePrefix::Error.format(message);
        self.log(LogLevel::Error, &msg);
    }

    /// Log a command being executed.
    pub fn command(&self, command: &str) {
        let msg = MessagePrefix::Command.format(command);
        self.log(LogLevel::Info, &msg);
    }

    /// Log a phase marker.
    pub fn phase(&self, phase_name: &str) {
        let msg = MessagePrefix::Phase.format(phase_name);
        self.log(LogLevel::Info, &msg);
    }

    /// Log a section marker.
    pub fn section(&self, section_name: &str) {
        let msg = MessagePrefix::Section.format(section_name);
        self.log(LogLevel::Info, &msg);
    }

    /// Log a success message.
    pub fn success(&self, message: &str) {
        let msg = MessagePrefix::Success.format(message);
        self.log(LogLevel::Info, &msg);
    }

    /// Record a line of external tool output.
    ///
    /// Lines always go to the tail buffer and are only echoed at debug level.
    pub fn output_line(&self, line: &str, is_stderr: bool) {
        if self.config.error_tail > 0 {
            let mut buffer = self.tail_buffer.lock();
            if buffer.len() >= self.config.error_tail {
                buffer.pop_front();
            }
            buffer.push_back(line.to_string());
        }

        let prefix = if is_stderr { "[stderr] " } else { "" };
        self.debug(&format!("{}{}", prefix, line));
    }

    /// Show the tail buffer (typically after a failure).
    pub fn show_tail(&self, header: &str) {
        let lines: Vec<String> = self.tail_buffer.lock().iter().cloned().collect();
        if lines.is_empty() {
            return;
        }

        self.output(&self.format_message(&format!("[{}/tail]", header)));
        for line in &lines {
            self.output(&self.format_message(line));
        }
    }

    /// Clear the tail buffer.
    pub fn clear_tail(&self) {
        self.tail_buffer.lock().clear();
    }

    /// Flush the log file.
    pub fn flush(&self) {
        if let Some(ref mut writer) = *self.file_writer.lock() {
            let _ = writer.flush();
        }
    }

    /// Close the log file and release it.
    pub fn close(&self) {
        self.flush();
        *self.file_writer.lock() = None;
    }

    fn format_message(&self, message: &str) -> String {
        if self.config.show_timestamps {
            let timestamp = Local::now().format("%H:%M:%S");
            format!("[{}] {}", timestamp, message)
        } else {
            message.to_string()
        }
    }

    fn output(&self, formatted: &str) {
        if self.config.console {
            println!("{}", formatted);
        }

        if let Some(ref mut writer) = *self.file_writer.lock() {
            let _ = writeln!(writer, "{}", formatted);
        }

        if let Some(ref callback) = self.callback {
            callback(formatted);
        }
    }
}

impl Drop for RunLogger {
    fn drop(&mut self) {
        self.close();
    }
}
