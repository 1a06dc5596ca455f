//! SQLite persistence for Waypost
//!
//! One connection behind a mutex, WAL journal mode, schema created on open.
//! Entity-specific operations live in sibling files as impl blocks on
//! [`Database`].

mod badges;
mod checkins;
pub mod models;
mod profiles;
mod sessions;
mod venues;

use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Shared handle to the SQLite database
#[derive(Clone)]
pub struct Database {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

/// Whether an error is a SQLite constraint violation (e.g. a UNIQUE clash)
pub fn is_unique_violation(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<rusqlite::Error>(),
        Some(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

/// Configure a connection for concurrency and durability
fn configure_connection(conn: &Connection) -> rusqlite::Result<()> {
    // Write-Ahead Logging for better concurrency
    conn.pragma_update(None, "journal_mode", "WAL")?;
    // Reasonable durability/perf tradeoff
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.pragma_update(None, "temp_store", "memory")?;
    // Wait on lock contention instead of failing immediately
    conn.busy_timeout(std::time::Duration::from_millis(30_000))?;
    Ok(())
}

impl Database {
    /// Open (or create) the database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        configure_connection(&conn)?;
        Self::init(conn)
    }

    /// In-memory database for tests
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS profiles (
                id TEXT PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                avatar_url TEXT,
                total_check_ins INTEGER NOT NULL DEFAULT 0,
                total_badges INTEGER NOT NULL DEFAULT 0,
                unique_venues INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS check_ins (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                venue_name TEXT NOT NULL,
                venue_type TEXT NOT NULL,
                location TEXT NOT NULL,
                check_in_time TEXT NOT NULL,
                notes TEXT
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_check_ins_user_venue
             ON check_ins (user_id, venue_name)",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS badges (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                venue_name TEXT NOT NULL,
                badge_type TEXT NOT NULL,
                earned_at TEXT NOT NULL,
                icon TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS venues (
                place_id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                address TEXT NOT NULL,
                types TEXT NOT NULL,
                latitude REAL NOT NULL,
                longitude REAL NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_venues_lat_lng
             ON venues (latitude, longitude)",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS sessions (
                token TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                created_at TEXT NOT NULL,
                expires_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}
