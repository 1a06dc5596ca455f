//! Centralized path resolution for Waypost
//!
//! All file and directory paths are resolved through this module so behavior
//! stays consistent across platforms.
//!
//! ## Path Strategy
//!
//! Platform-standard application data locations:
//! - **macOS**: `~/Library/Application Support/Waypost/`
//! - **Windows**: `%LOCALAPPDATA%\Waypost\`
//! - **Linux**: `$XDG_DATA_HOME/Waypost/` (fallback `~/.local/share/Waypost/`)
//!
//! ## Directory Structure
//!
//! ```text
//! Waypost/
//! ├── data/
//! │   ├── config.json
//! │   └── waypost.db
//! └── logs/
//!     └── waypost_*.log
//! ```

use once_cell::sync::Lazy;
use std::fs;
use std::path::PathBuf;

// =============================================================================
// BASE DIRECTORY RESOLUTION
// =============================================================================

/// Lazy-initialized base directory (thread-safe)
static BASE_DIRECTORY: Lazy<PathBuf> = Lazy::new(resolve_base_directory);

/// Resolves the base directory for all Waypost data
fn resolve_base_directory() -> PathBuf {
    const APP_DIR: &str = "Waypost";

    if let Some(dir) = dirs::data_local_dir() {
        return dir.join(APP_DIR);
    }

    if let Some(dir) = dirs::data_dir() {
        return dir.join(APP_DIR);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(APP_DIR);
    }

    PathBuf::from(APP_DIR)
}

// =============================================================================
// DIRECTORY ACCESSORS
// =============================================================================

/// Returns the data directory path (database and config file)
pub fn get_data_directory() -> PathBuf {
    BASE_DIRECTORY.join("data")
}

/// Returns the logs directory path
pub fn get_logs_directory() -> PathBuf {
    BASE_DIRECTORY.join("logs")
}

// =============================================================================
// FILE ACCESSORS
// =============================================================================

/// Path to the main SQLite database
pub fn get_database_path() -> PathBuf {
    get_data_directory().join("waypost.db")
}

/// Path to the JSON config file
pub fn get_config_path() -> PathBuf {
    get_data_directory().join("config.json")
}

/// Ensure the full directory tree exists
///
/// Must be called before logger initialization so the log file can be created.
pub fn ensure_all_directories() -> std::io::Result<()> {
    fs::create_dir_all(get_data_directory())?;
    fs::create_dir_all(get_logs_directory())?;
    Ok(())
}
