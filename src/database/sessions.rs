use crate::database::models::Session;
use crate::database::Database;
use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::params;

impl Database {
    /// Store a new session
    pub fn insert_session(&self, session: &Session) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO sessions (token, user_id, created_at, expires_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                session.token,
                session.user_id,
                session.created_at.to_rfc3339(),
                session.expires_at.to_rfc3339()
            ],
        )?;
        Ok(())
    }

    /// Look up a session by token
    pub fn get_session(&self, token: &str) -> Result<Option<Session>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT token, user_id, created_at, expires_at FROM sessions WHERE token = ?1",
        )?;
        let mut rows = stmt.query_map(params![token], |row| {
            let created_at: String = row.get(2)?;
            let expires_at: String = row.get(3)?;
            Ok(Session {
                token: row.get(0)?,
                user_id: row.get(1)?,
                created_at: created_at
                    .parse::<DateTime<Utc>>()
                    .unwrap_or_else(|_| Utc::now()),
                expires_at: expires_at
                    .parse::<DateTime<Utc>>()
                    .unwrap_or_else(|_| Utc::now()),
            })
        })?;
        match rows.next() {
            Some(session) => Ok(Some(session?)),
            None => Ok(None),
        }
    }

    /// Remove a session (logout)
    pub fn delete_session(&self, token: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM sessions WHERE token = ?1", params![token])?;
        Ok(())
    }

    /// Drop sessions past their expiry
    pub fn purge_expired_sessions(&self) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let removed = conn.execute(
            "DELETE FROM sessions WHERE expires_at < ?1",
            params![Utc::now().to_rfc3339()],
        )?;
        Ok(removed)
    }
}
