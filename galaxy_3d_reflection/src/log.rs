//! Reflection logging
//!
//! Every message carries the source that emitted it: `galaxy3d::reflection`
//! for the compactor, `galaxy3d::spirq` for the SPIR-V backend. Messages go
//! through the `Logger` installed on `Engine`, colored stdout by default.
//! Errors raised through `engine_err!`/`engine_bail!` are logged once, with
//! the file and line that raised them.

use colored::*;
use std::fmt::Display;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Destination of reflection log entries
///
/// # Example
///
/// Collect shader reflection failures for an asset pipeline report:
///
/// ```no_run
/// use galaxy_3d_reflection::galaxy3d::log::{LogEntry, LogSeverity, Logger};
/// use std::sync::Mutex;
///
/// struct FailureReport {
///     failures: Mutex<Vec<String>>,
/// }
///
/// impl Logger for FailureReport {
///     fn log(&self, entry: &LogEntry) {
///         if entry.severity == LogSeverity::Error {
///             if let Ok(mut failures) = self.failures.lock() {
///                 failures.push(entry.message.clone());
///             }
///         }
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    fn log(&self, entry: &LogEntry);
}

/// One log message
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub severity: LogSeverity,
    pub timestamp: SystemTime,
    /// `galaxy3d::reflection` or `galaxy3d::spirq`
    pub source: String,
    pub message: String,
    /// Set for errors only
    pub file: Option<&'static str>,
    /// Set for errors only
    pub line: Option<u32>,
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Why each raw resource was kept or dropped
    Trace,
    /// Resource and variable counts per reflected shader
    Debug,
    Info,
    /// Ambiguous input, e.g. a module with several entry points
    Warn,
    /// Reflection failures and broken invariants
    Error,
}

impl LogSeverity {
    /// Fixed-width label used by the default output format
    pub fn label(&self) -> &'static str {
        match self {
            LogSeverity::Trace => "TRACE",
            LogSeverity::Debug => "DEBUG",
            LogSeverity::Info => "INFO ",
            LogSeverity::Warn => "WARN ",
            LogSeverity::Error => "ERROR",
        }
    }
}

fn layout(entry: &LogEntry, severity: impl Display, source: impl Display) -> String {
    let datetime: DateTime<Local> = entry.timestamp.into();
    let mut line = format!(
        "[{}] [{}] [{}] {}",
        datetime.format("%Y-%m-%d %H:%M:%S%.3f"),
        severity,
        source,
        entry.message
    );
    if let (Some(file), Some(at)) = (entry.file, entry.line) {
        line.push_str(&format!(" ({}:{})", file, at));
    }
    line
}

/// Plain-text form of an entry
///
/// `[timestamp] [SEVERITY] [source] message`, followed by `(file:line)` when
/// the entry carries both.
pub fn format_entry(entry: &LogEntry) -> String {
    layout(entry, entry.severity.label(), &entry.source)
}

/// Colored stdout logger installed by default
pub struct DefaultLogger;

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let label = entry.severity.label();
        let severity = match entry.severity {
            LogSeverity::Trace => label.bright_black(),
            LogSeverity::Debug => label.cyan(),
            LogSeverity::Info => label.green(),
            LogSeverity::Warn => label.yellow(),
            LogSeverity::Error => label.red().bold(),
        };
        println!("{}", layout(entry, severity, entry.source.bright_blue()));
    }
}

// ===== LOGGING MACROS =====

/// Log at an explicit severity
///
/// ```no_run
/// use galaxy_3d_reflection::galaxy3d::log::LogSeverity;
/// galaxy_3d_reflection::engine_log!(LogSeverity::Debug, "galaxy3d::spirq", "Scanned {} variables", 12);
/// ```
#[macro_export]
macro_rules! engine_log {
    ($severity:expr, $source:expr, $($arg:tt)*) => {
        $crate::galaxy3d::Engine::log($severity, $source, format!($($arg)*))
    };
}

/// Log a TRACE message, filtered out by default
///
/// ```no_run
/// galaxy_3d_reflection::engine_trace!("galaxy3d::reflection", "Dropped stage output '{}'", "out_color");
/// ```
#[macro_export]
macro_rules! engine_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::engine_log!($crate::galaxy3d::log::LogSeverity::Trace, $source, $($arg)*)
    };
}

/// Log a DEBUG message
#[macro_export]
macro_rules! engine_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::engine_log!($crate::galaxy3d::log::LogSeverity::Debug, $source, $($arg)*)
    };
}

/// Log an INFO message
#[macro_export]
macro_rules! engine_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::engine_log!($crate::galaxy3d::log::LogSeverity::Info, $source, $($arg)*)
    };
}

/// Log a WARN message
#[macro_export]
macro_rules! engine_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::engine_log!($crate::galaxy3d::log::LogSeverity::Warn, $source, $($arg)*)
    };
}

/// Log an ERROR message with the file and line of the call
///
/// ```no_run
/// galaxy_3d_reflection::engine_error!("galaxy3d::spirq", "Entry point '{}' not found", "main");
/// ```
#[macro_export]
macro_rules! engine_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::galaxy3d::Engine::log_detailed(
            $crate::galaxy3d::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
