//! Structured logging for Waypost
//!
//! Provides a small, ergonomic logging API with:
//! - Standard log levels (Error/Warning/Info/Debug/Verbose)
//! - Per-module debug control via --debug-<module> flags
//! - Dual output: colored console + file persistence
//!
//! ## Usage
//!
//! ```rust
//! use waypost::logger::{self, LogTag};
//!
//! logger::error(LogTag::Database, "Insert failed");
//! logger::info(LogTag::Webserver, "Listening on :8080");
//! logger::debug(LogTag::Places, "Cache hit: 3 venues"); // Only with --debug-places
//! ```
//!
//! ## Initialization
//!
//! Call once at startup, after the data directories exist:
//! ```rust
//! waypost::logger::init();
//! ```

mod config;
mod core;
mod file;
mod format;
mod levels;
mod tags;

pub use config::{get_logger_config, init_from_args, set_logger_config, LoggerConfig};
pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger system
///
/// Must be called once at startup, before any logging occurs. Parses
/// command-line arguments for debug flags and opens the log file.
pub fn init() {
    config::init_from_args();
    file::init_file_logging();
}

/// Log at ERROR level (always shown, critical issues)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (important issues, shown unless --quiet)
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operational messages)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level (only shown with --debug-<module> for the tag)
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level (only shown with --verbose)
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}

/// Force flush pending log writes during shutdown
pub fn flush() {
    file::flush_file_logging();
}
