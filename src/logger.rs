//! Logging backend for the `log` facade.
//!
//! Records at or above the configured level are formatted as
//! `"<UTC timestamp> <LEVEL> <message>"` and handed to a sink. The default
//! sink writes to stderr so log lines never mix with the rendered output on
//! stdout.

use crate::error::{AppError, AppResult};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::{Arc, Mutex, PoisonError};

type Sink = Box<dyn Fn(String) + Send + Sync>;

/// Format a log record into a single line.
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {} {}", timestamp, level_str, record.args())
}

/// Logger forwarding formatted records to a replaceable sink.
///
pub struct CustomLogger {
    level: LevelFilter,
    sink: Arc<Mutex<Sink>>,
}

impl CustomLogger {
    /// Logger writing to stderr.
    ///
    pub fn new(level: LevelFilter) -> Self {
        CustomLogger {
            level,
            sink: Arc::new(Mutex::new(Box::new(|line| eprintln!("{}", line)))),
        }
    }

    pub fn set_sink(&self, sink: Sink) {
        *self.sink.lock().unwrap_or_else(PoisonError::into_inner) = sink;
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
            sink(format_log(record));
        }
    }

    fn flush(&self) {}
}

/// Install a stderr `CustomLogger` as the global logger.
///
pub fn init(level: LevelFilter) -> AppResult<()> {
    log::set_boxed_logger(Box::new(CustomLogger::new(level)))
        .map_err(|e| AppError::Logger(e.to_string()))?;
    log::set_max_level(level);
    Ok(())
}
