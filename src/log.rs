//! File-backed debug logging.
//!
//! Logging stays silent until debug mode is enabled, either with `--debug` or
//! from code via [`Logger::enable_debug`]. Entries are written to
//! `~/.snaptui/logs/snaptui.log` by a background writer thread.

mod errors;
mod formatter;
mod macros;
mod writer;

pub use errors::LogError;

use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicBool, Ordering};

static DEBUG_MODE: AtomicBool = AtomicBool::new(false);

/// Process-wide logger used by the `log_*!` macros.
pub static LOGGER: Lazy<Logger> = Lazy::new(Logger::new);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Entries the user may need after a crash skip write buffering.
    fn is_urgent(&self) -> bool {
        matches!(self, LogLevel::Warning | LogLevel::Error)
    }
}

pub struct Logger {
    writer: writer::LogWriter,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    pub fn new() -> Self {
        Self {
            writer: writer::LogWriter::new(),
        }
    }

    pub fn enable_debug(&self) {
        DEBUG_MODE.store(true, Ordering::SeqCst);
    }

    pub fn disable_debug(&self) {
        DEBUG_MODE.store(false, Ordering::SeqCst);
    }

    pub fn is_debug_enabled(&self) -> bool {
        DEBUG_MODE.load(Ordering::SeqCst)
    }

    pub fn log_debug(&self, message: &str) -> Result<(), LogError> {
        self.log(LogLevel::Debug, message)
    }

    pub fn log_info(&self, message: &str) -> Result<(), LogError> {
        self.log(LogLevel::Info, message)
    }

    pub fn log_warn(&self, message: &str) -> Result<(), LogError> {
        self.log(LogLevel::Warning, message)
    }

    pub fn log_error(&self, message: &str) -> Result<(), LogError> {
        self.log(LogLevel::Error, message)
    }

    /// Block until every queued entry has reached the log file.
    pub fn flush(&self) -> Result<(), LogError> {
        self.writer.flush()
    }

    fn log(&self, level: LogLevel, message: &str) -> Result<(), LogError> {
        if self.is_debug_enabled() {
            self.writer.write(level, message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "test/log.rs"]
mod tests;
