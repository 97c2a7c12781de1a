//! Structured logging for probe and generator diagnostics
//!
//! Diagnostics go to stderr so they never interleave with the probe's
//! stdout report, which is the product of the run. Each process run gets
//! a correlation id so log lines from one invocation can be grouped.

use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::sync::Mutex;
use uuid::Uuid;

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    /// Debug level - detailed information for debugging
    Debug = 0,
    /// Info level - general application information
    Info = 1,
    /// Warning level - potentially harmful situations
    Warn = 2,
    /// Error level - error events but application can continue
    Error = 3,
}

impl LogLevel {
    /// Get log level name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Get ANSI color code for console output
    pub fn color_code(&self) -> &'static str {
        match self {
            LogLevel::Debug => "\x1b[36m", // Cyan
            LogLevel::Info => "\x1b[32m",  // Green
            LogLevel::Warn => "\x1b[33m",  // Yellow
            LogLevel::Error => "\x1b[31m", // Red
        }
    }

    /// Reset ANSI color code
    pub fn reset_code() -> &'static str {
        "\x1b[0m"
    }
}

impl std::str::FromStr for LogLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(AppError::parse(format!("Invalid log level: {}", s))),
        }
    }
}

/// A single structured log record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub component: String,
    pub message: String,
    pub run_id: Uuid,
}

impl LogRecord {
    /// Render as a single console line
    pub fn format_console(&self, use_color: bool) -> String {
        let level = if use_color {
            format!(
                "{}{}{}",
                self.level.color_code(),
                self.level.as_str(),
                LogLevel::reset_code()
            )
        } else {
            self.level.as_str().to_string()
        };

        format!(
            "[{}] [{}] [{}] {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
            level,
            self.component,
            self.message
        )
    }
}

/// Structured logger writing console lines to a sink (stderr by default)
pub struct StructuredLogger {
    min_level: LogLevel,
    use_color: bool,
    run_id: Uuid,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl StructuredLogger {
    /// Create a logger writing to stderr
    pub fn new(min_level: LogLevel, use_color: bool) -> Self {
        Self::with_sink(min_level, use_color, Box::new(io::stderr()))
    }

    /// Create a logger writing to a custom sink
    pub fn with_sink(min_level: LogLevel, use_color: bool, sink: Box<dyn Write + Send>) -> Self {
        Self {
            min_level,
            use_color,
            run_id: Uuid::new_v4(),
            sink: Mutex::new(sink),
        }
    }

    /// Correlation id for this process run
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Whether a record at `level` would be emitted
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Emit a record if it passes the level filter
    pub fn log(&self, level: LogLevel, component: &str, message: impl Into<String>) {
        if !self.enabled(level) {
            return;
        }

        let record = LogRecord {
            timestamp: Utc::now(),
            level,
            component: component.to_string(),
            message: message.into(),
            run_id: self.run_id,
        };

        // A poisoned or unwritable sink silently drops the line; logging
        // must never take down the run.
        if let Ok(mut sink) = self.sink.lock() {
            let _ = writeln!(sink, "{}", record.format_console(self.use_color));
        }
    }

    pub fn debug(&self, component: &str, message: impl Into<String>) {
        self.log(LogLevel::Debug, component, message);
    }

    pub fn info(&self, component: &str, message: impl Into<String>) {
        self.log(LogLevel::Info, component, message);
    }

    pub fn warn(&self, component: &str, message: impl Into<String>) {
        self.log(LogLevel::Warn, component, message);
    }

    pub fn error(&self, component: &str, message: impl Into<String>) {
        self.log(LogLevel::Error, component, message);
    }
}

/// Pick the log level implied by the CLI verbosity flags
pub fn level_for_flags(verbose: bool, debug: bool) -> LogLevel {
    if debug {
        LogLevel::Debug
    } else if verbose {
        LogLevel::Info
    } else {
        LogLevel::Warn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Shared in-memory sink for asserting on emitted lines
    #[derive(Clone)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn new() -> Self {
            Self(Arc::new(Mutex::new(Vec::new())))
        }

        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_level_ordering_and_parse() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert_eq!("info".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("WARNING".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("chatty".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_min_level_filtering() {
        let buf = SharedBuf::new();
        let logger = StructuredLogger::with_sink(LogLevel::Warn, false, Box::new(buf.clone()));

        logger.debug("probe", "hidden");
        logger.info("probe", "hidden too");
        logger.warn("probe", "visible");
        logger.error("probe", "also visible");

        let out = buf.contents();
        assert!(!out.contains("hidden"));
        assert!(out.contains("visible"));
        assert!(out.contains("[WARN]"));
        assert!(out.contains("[ERROR]"));
    }

    #[test]
    fn test_record_format_plain() {
        let record = LogRecord {
            timestamp: Utc::now(),
            level: LogLevel::Info,
            component: "seedgen".to_string(),
            message: "fetched 1000 records".to_string(),
            run_id: Uuid::new_v4(),
        };
        let line = record.format_console(false);
        assert!(line.contains("[INFO]"));
        assert!(line.contains("[seedgen]"));
        assert!(line.contains("fetched 1000 records"));
        assert!(!line.contains("\x1b["));
    }

    #[test]
    fn test_record_format_colored() {
        let record = LogRecord {
            timestamp: Utc::now(),
            level: LogLevel::Error,
            component: "probe".to_string(),
            message: "boom".to_string(),
            run_id: Uuid::new_v4(),
        };
        let line = record.format_console(true);
        assert!(line.contains("\x1b[31m"));
        assert!(line.contains(LogLevel::reset_code()));
    }

    #[test]
    fn test_level_for_flags() {
        assert_eq!(level_for_flags(false, false), LogLevel::Warn);
        assert_eq!(level_for_flags(true, false), LogLevel::Info);
        assert_eq!(level_for_flags(false, true), LogLevel::Debug);
        assert_eq!(level_for_flags(true, true), LogLevel::Debug);
    }

    #[test]
    fn test_run_id_is_stable_within_logger() {
        let logger = StructuredLogger::with_sink(
            LogLevel::Debug,
            false,
            Box::new(SharedBuf::new()),
        );
        assert_eq!(logger.run_id(), logger.run_id());
    }
}
