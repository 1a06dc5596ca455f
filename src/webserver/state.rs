/// Shared application state for the webserver
///
/// Holds the database handle and core services that route handlers need.
use crate::auth::Auth;
use crate::config::Config;
use crate::database::Database;
use crate::places::{PlacesClient, PlacesService};
use std::sync::Arc;

pub struct AppState {
    pub db: Database,
    pub config: Arc<Config>,
    pub auth: Auth,
    pub places: PlacesService<PlacesClient>,
    pub startup_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(
        db: Database,
        config: Arc<Config>,
        auth: Auth,
        places: PlacesService<PlacesClient>,
    ) -> Self {
        Self {
            db,
            config,
            auth,
            places,
            startup_time: chrono::Utc::now(),
        }
    }

    /// Server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        (chrono::Utc::now() - self.startup_time)
            .num_seconds()
            .max(0) as u64
    }
}
