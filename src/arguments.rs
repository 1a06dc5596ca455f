/// Centralized argument handling for Waypost
///
/// All command-line parsing and debug flag checking lives here so the rest
/// of the codebase never touches `std::env::args` directly.
///
/// Features:
/// - Centralized CMD_ARGS storage with thread-safe access
/// - Debug flag checking functions for all modules
/// - Value extraction for flags like --port and --config
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

/// Global command-line arguments storage
/// Thread-safe singleton that stores arguments for access throughout the application
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Sets the global command-line arguments
/// Used by tests to override the default env::args() collection
pub fn set_cmd_args(args: Vec<String>) {
    if let Ok(mut cmd_args) = CMD_ARGS.lock() {
        *cmd_args = args;
    }
}

/// Gets a copy of the current command-line arguments
/// Returns a vector clone to avoid holding the mutex lock
pub fn get_cmd_args() -> Vec<String> {
    match CMD_ARGS.lock() {
        Ok(args) => args.clone(),
        Err(_) => {
            // Fallback to env::args if mutex is poisoned
            env::args().collect()
        }
    }
}

/// Checks if a specific argument is present in the command line
pub fn has_arg(arg: &str) -> bool {
    get_cmd_args().iter().any(|a| a == arg)
}

/// Gets the value of a command-line argument that follows a flag
/// Returns None if the flag is not found or has no value
pub fn get_arg_value(flag: &str) -> Option<String> {
    let args = get_cmd_args();
    for (i, arg) in args.iter().enumerate() {
        if arg == flag && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    None
}

// =============================================================================
// DEBUG FLAG CHECKING FUNCTIONS
// These functions check for specific debug flags in the command-line arguments
// =============================================================================

/// Webserver debug mode
pub fn is_debug_webserver_enabled() -> bool {
    has_arg("--debug-webserver")
}

/// Database debug mode
pub fn is_debug_database_enabled() -> bool {
    has_arg("--debug-database")
}

/// Nearby-places resolver debug mode
pub fn is_debug_places_enabled() -> bool {
    has_arg("--debug-places")
}

/// Check-in submission debug mode
pub fn is_debug_checkins_enabled() -> bool {
    has_arg("--debug-checkins")
}

/// Badge awarder debug mode
pub fn is_debug_badges_enabled() -> bool {
    has_arg("--debug-badges")
}

/// Auth/session debug mode
pub fn is_debug_auth_enabled() -> bool {
    has_arg("--debug-auth")
}

/// Verbose mode (all modules, trace-level detail)
pub fn is_verbose_enabled() -> bool {
    has_arg("--verbose")
}

/// Quiet mode (errors only)
pub fn is_quiet_enabled() -> bool {
    has_arg("--quiet")
}

// =============================================================================
// SPECIAL MODES
// =============================================================================

/// Reset mode - wipe the local database and start fresh
pub fn is_reset_enabled() -> bool {
    has_arg("--reset")
}

/// Force mode - skip confirmation prompts in special modes
pub fn is_force_enabled() -> bool {
    has_arg("--force")
}

/// Port override from --port <n>
pub fn get_port_override() -> Option<u16> {
    get_arg_value("--port").and_then(|v| v.parse().ok())
}

/// Config file override from --config <path>
pub fn get_config_path_override() -> Option<String> {
    get_arg_value("--config")
}

/// Argument patterns that short-circuit normal startup
pub mod patterns {
    use super::has_arg;

    pub fn is_help_requested() -> bool {
        has_arg("--help") || has_arg("-h")
    }
}

/// Print usage information
pub fn print_help() {
    println!("Waypost - self-hosted location check-in service");
    println!();
    println!("USAGE:");
    println!("    waypost [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --port <n>            Override the configured listen port");
    println!("    --config <path>       Use an alternate config file");
    println!("    --reset               Delete the local database and exit");
    println!("    --force               Skip confirmation prompts");
    println!("    --verbose             Show verbose logs for all modules");
    println!("    --quiet               Show errors only");
    println!("    --debug-<module>      Per-module debug logs, one of:");
    println!("                          webserver, database, places, checkins,");
    println!("                          badges, auth");
    println!("    -h, --help            Print this help");
}

/// Print which debug modes are active at startup
pub fn print_debug_info() {
    let flags = [
        ("webserver", is_debug_webserver_enabled()),
        ("database", is_debug_database_enabled()),
        ("places", is_debug_places_enabled()),
        ("checkins", is_debug_checkins_enabled()),
        ("badges", is_debug_badges_enabled()),
        ("auth", is_debug_auth_enabled()),
    ];

    let active: Vec<&str> = flags
        .iter()
        .filter(|(_, enabled)| *enabled)
        .map(|(name, _)| *name)
        .collect();

    if !active.is_empty() {
        println!("Debug modes enabled: {}", active.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arg_value_extraction() {
        set_cmd_args(vec![
            "waypost".to_string(),
            "--port".to_string(),
            "9090".to_string(),
        ]);
        assert_eq!(get_port_override(), Some(9090));
        assert!(get_config_path_override().is_none());

        set_cmd_args(vec!["waypost".to_string()]);
        assert_eq!(get_port_override(), None);
    }
}
