//! File logging backend for the `log` facade
//!
//! The TUI owns the terminal, so log lines go to a file instead of stderr.
//! Each run starts the file fresh.

use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Main logger struct
pub struct FileLogger {
    file: Mutex<File>,
    min_level: LevelFilter,
}

impl FileLogger {
    fn new(path: &Path, min_level: LevelFilter) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            file: Mutex::new(file),
            min_level,
        })
    }

    /// `userdir.log` in the executable's directory
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("userdir.log")
    }
}

/// One line per entry: `[timestamp] [LEVEL] [target] message`
pub fn format_line(level: log::Level, target: &str, message: &str) -> String {
    format!(
        "[{}] [{:5}] [{}] {}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        level,
        target,
        message
    )
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.min_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.level(), record.target(), &record.args().to_string());
        let mut file = self.file.lock();
        let _ = file.write_all(line.as_bytes());
        let _ = file.flush();
    }

    fn flush(&self) {
        let _ = self.file.lock().flush();
    }
}

/// Install the global logger and return the log file path. Later calls are
/// ignored. Fails if the log file cannot be created; nothing is installed then.
pub fn init(path: Option<&Path>, level: LevelFilter) -> crate::Result<PathBuf> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(FileLogger::default_path);
    let logger = FileLogger::new(&path, level)?;
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level);
    }
    Ok(path)
}
