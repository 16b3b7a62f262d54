// src/utils/logger.rs

use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

static LOGGER: ConsoleLogger = ConsoleLogger;
static MAX_LEVEL: AtomicUsize = AtomicUsize::new(LevelFilter::Info as usize);

struct ConsoleLogger;

/// Parses a level name from the config file ("error", "warn", "info", "debug", "trace").
pub fn parse_level(name: &str) -> LevelFilter {
  name.parse().unwrap_or(LevelFilter::Info)
}

/// Installs the console logger. Messages go to stderr so that stdout stays
/// usable for structure output.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
  log::set_logger(&LOGGER).map(|()| set_level(level))
}

/// Changes the level of an installed logger, e.g. once the config file has been read.
pub fn set_level(level: LevelFilter) {
  MAX_LEVEL.store(level as usize, Ordering::Relaxed);
  log::set_max_level(level);
}

fn icon(level: Level) -> &'static str {
  match level {
    Level::Error => "🔴",
    Level::Warn => "🟠",
    Level::Info => "🔵",
    Level::Debug => "⚪",
    Level::Trace => "▫️",
  }
}

impl log::Log for ConsoleLogger {
  fn enabled(&self, metadata: &Metadata) -> bool {
    (metadata.level() as usize) <= MAX_LEVEL.load(Ordering::Relaxed)
  }

  fn log(&self, record: &Record) {
    if self.enabled(record.metadata()) {
      // Format: "🔵  Generated 16 atoms"
      let stderr = std::io::stderr();
      let mut handle = stderr.lock();
      let _ = writeln!(handle, "{}  {}", icon(record.level()), record.args());
    }
  }

  fn flush(&self) {
    let _ = std::io::stderr().flush();
  }
}
