use std::sync::Arc;

use waypost::{
    arguments::{self, patterns, print_debug_info, print_help},
    auth::Auth,
    config::Config,
    database::Database,
    logger::{self, LogTag},
    paths,
    places::{PlacesClient, PlacesService},
    webserver::{self, state::AppState},
};

/// Main entry point for Waypost
///
/// Handles:
/// - Special modes (--reset, --help)
/// - Normal mode: webserver on the configured port (default :8080)
#[tokio::main]
async fn main() {
    // Ensure all directories exist BEFORE logger initialization
    // (the logger needs the logs directory to create its file)
    if let Err(e) = paths::ensure_all_directories() {
        eprintln!("Failed to create required directories: {}", e);
        std::process::exit(1);
    }

    logger::init();

    if patterns::is_help_requested() {
        print_help();
        std::process::exit(0);
    }

    logger::info(LogTag::System, "Waypost starting up...");
    print_debug_info();

    // =========================================================================
    // SPECIAL MODES (execute and exit)
    // =========================================================================

    if arguments::is_reset_enabled() {
        run_reset_mode();
    }

    // =========================================================================
    // NORMAL EXECUTION
    // =========================================================================

    match run_server().await {
        Ok(()) => {
            logger::info(LogTag::System, "Waypost stopped");
        }
        Err(e) => {
            logger::error(LogTag::System, &format!("Waypost failed: {}", e));
            logger::flush();
            std::process::exit(1);
        }
    }

    logger::flush();
}

/// Delete the local database after confirmation, then exit
fn run_reset_mode() -> ! {
    logger::info(LogTag::System, "Reset mode enabled");

    let db_path = paths::get_database_path();
    println!("\nWARNING: This will DELETE all stored data:");
    println!("   - Profiles, check-ins, badges, venue cache ({})", db_path.display());

    if !arguments::is_force_enabled() {
        print!("\nType 'yes' to confirm: ");
        use std::io::{self, Write};
        let _ = io::stdout().flush();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() || input.trim().to_lowercase() != "yes" {
            logger::info(LogTag::System, "Reset cancelled");
            std::process::exit(0);
        }
    }

    match std::fs::remove_file(&db_path) {
        Ok(()) => {
            logger::info(LogTag::System, "Database deleted");
            std::process::exit(0);
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            logger::info(LogTag::System, "Nothing to delete");
            std::process::exit(0);
        }
        Err(e) => {
            logger::error(LogTag::System, &format!("Reset failed: {}", e));
            std::process::exit(1);
        }
    }
}

/// Load config, open the database, and run the webserver until shutdown
async fn run_server() -> Result<(), String> {
    let config_path = arguments::get_config_path_override()
        .unwrap_or_else(|| paths::get_config_path().to_string_lossy().to_string());

    let config = Config::load(&config_path).map_err(|e| format!("Config error: {}", e))?;
    logger::debug(
        LogTag::Config,
        &format!("Configuration loaded from {}", config_path),
    );

    let db_path = paths::get_data_directory().join(&config.database.filename);
    let db = Database::open(&db_path).map_err(|e| format!("Database error: {}", e))?;
    logger::info(
        LogTag::Database,
        &format!("Database ready at {}", db_path.display()),
    );

    // Drop stale sessions from previous runs
    match db.purge_expired_sessions() {
        Ok(0) => {}
        Ok(n) => logger::debug(LogTag::Auth, &format!("Purged {} expired sessions", n)),
        Err(e) => logger::warning(LogTag::Auth, &format!("Session purge failed: {}", e)),
    }

    let places_client =
        PlacesClient::new(&config.places).map_err(|e| format!("Places client error: {}", e))?;
    if config.places.api_key.is_empty() {
        logger::warning(
            LogTag::Places,
            "No places API key configured; nearby lookup is cache-only",
        );
    }

    let config = Arc::new(config);
    let auth = Auth::new(db.clone(), config.auth.session_ttl_days);
    let places = PlacesService::new(db.clone(), places_client);

    let state = Arc::new(AppState::new(db, config, auth, places));

    // Ctrl-C triggers graceful shutdown
    ctrlc::set_handler(|| {
        logger::info(LogTag::System, "Interrupt received, shutting down...");
        webserver::shutdown();
    })
    .map_err(|e| format!("Failed to install signal handler: {}", e))?;

    webserver::start_server(state).await
}
