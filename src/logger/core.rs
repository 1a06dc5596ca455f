/// Core logging implementation with automatic filtering
///
/// Filtering rules:
/// 1. Errors are always shown
/// 2. Check against minimum log level threshold
/// 3. Debug level requires --debug-<module> flag for that tag
/// 4. Verbose level requires the --verbose flag
use super::config::{get_logger_config, is_debug_enabled_for_tag};
use super::levels::LogLevel;
use super::tags::LogTag;

/// Check if a log message should be displayed
pub fn should_log(tag: &LogTag, level: LogLevel) -> bool {
    let config = get_logger_config();

    // Rule 1: Errors always log
    if level == LogLevel::Error {
        return true;
    }

    // Rule 2: Minimum level threshold
    if level > config.min_level {
        return false;
    }

    // Rule 3: Debug requires debug mode for that specific tag
    if level == LogLevel::Debug {
        return is_debug_enabled_for_tag(tag);
    }

    // Rule 4: Verbose requires the explicit --verbose flag
    if level == LogLevel::Verbose {
        return config.verbose;
    }

    true
}

/// Internal logging entry point
pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if !should_log(&tag, level) {
        return;
    }

    super::format::format_and_log(tag, level, message);
}

#[cfg(test)]
mod tests {
    use super::super::config::{set_logger_config, LoggerConfig};
    use super::*;
    use std::collections::HashSet;

    // Single test: the config is a process-wide global and parallel tests
    // would race on it
    #[test]
    fn test_filtering_rules() {
        set_logger_config(LoggerConfig {
            min_level: LogLevel::Error,
            debug_tags: HashSet::new(),
            verbose: false,
        });
        assert!(should_log(&LogTag::Database, LogLevel::Error));
        assert!(!should_log(&LogTag::Database, LogLevel::Info));

        let mut tags = HashSet::new();
        tags.insert("places".to_string());
        set_logger_config(LoggerConfig {
            min_level: LogLevel::Debug,
            debug_tags: tags,
            verbose: false,
        });
        assert!(should_log(&LogTag::Places, LogLevel::Debug));
        assert!(!should_log(&LogTag::Badges, LogLevel::Debug));

        set_logger_config(LoggerConfig::default());
    }
}
