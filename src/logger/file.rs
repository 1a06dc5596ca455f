/// File output for the logger
///
/// One log file per process start, named waypost_<date>_<time>.log in the
/// logs directory. Writes are line-buffered behind a mutex; failures are
/// silently ignored so logging can never take the service down.
use crate::paths;
use chrono::Local;
use once_cell::sync::Lazy;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;

static LOG_FILE: Lazy<Mutex<Option<File>>> = Lazy::new(|| Mutex::new(None));

/// Open the log file for this process
pub fn init_file_logging() {
    let filename = format!(
        "waypost_{}.log",
        Local::now().format("%Y-%m-%d_%H-%M-%S")
    );
    let path = paths::get_logs_directory().join(filename);

    let file = OpenOptions::new().create(true).append(true).open(&path);

    if let (Ok(file), Ok(mut slot)) = (file, LOG_FILE.lock()) {
        *slot = Some(file);
    }
}

/// Append a line to the log file (no-op before init or after failure)
pub fn write_to_file(line: &str) {
    if let Ok(mut slot) = LOG_FILE.lock() {
        if let Some(file) = slot.as_mut() {
            let _ = writeln!(file, "{}", line);
        }
    }
}

/// Flush pending writes (called during shutdown)
pub fn flush_file_logging() {
    if let Ok(mut slot) = LOG_FILE.lock() {
        if let Some(file) = slot.as_mut() {
            let _ = file.flush();
        }
    }
}
