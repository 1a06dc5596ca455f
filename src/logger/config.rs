/// Logger configuration derived from command-line arguments
///
/// Filtering state lives in a global RwLock so that the logging functions
/// can consult it without threading a config handle everywhere.
use super::levels::LogLevel;
use super::tags::LogTag;
use crate::arguments;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::RwLock;

/// Runtime logger configuration
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Minimum level threshold (messages above this are dropped)
    pub min_level: LogLevel,
    /// Tags with --debug-<module> enabled
    pub debug_tags: HashSet<String>,
    /// Global --verbose flag
    pub verbose: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
            verbose: false,
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

/// Get a snapshot of the current logger configuration
pub fn get_logger_config() -> LoggerConfig {
    LOGGER_CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_default()
}

/// Replace the logger configuration (used by tests)
pub fn set_logger_config(config: LoggerConfig) {
    if let Ok(mut current) = LOGGER_CONFIG.write() {
        *current = config;
    }
}

/// Initialize the configuration from command-line arguments
///
/// Scans argv for --debug-<module>, --verbose and --quiet flags.
pub fn init_from_args() {
    let mut config = LoggerConfig::default();

    for arg in arguments::get_cmd_args() {
        if let Some(module) = arg.strip_prefix("--debug-") {
            config.debug_tags.insert(module.to_string());
        }
    }

    if arguments::is_verbose_enabled() {
        config.verbose = true;
        config.min_level = LogLevel::Verbose;
    } else if arguments::is_quiet_enabled() {
        config.min_level = LogLevel::Error;
    } else if !config.debug_tags.is_empty() {
        // Debug flags imply debug-level visibility for those tags
        config.min_level = LogLevel::Debug;
    }

    set_logger_config(config);
}

/// Check whether debug output is enabled for a tag
pub fn is_debug_enabled_for_tag(tag: &LogTag) -> bool {
    let config = get_logger_config();
    config.verbose || config.debug_tags.contains(tag.to_debug_key())
}
