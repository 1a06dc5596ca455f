use crate::database::models::CheckIn;
use crate::database::Database;
use anyhow::Result;
use rusqlite::{params, Row};

fn check_in_from_row(row: &Row) -> rusqlite::Result<CheckIn> {
    Ok(CheckIn {
        id: row.get(0)?,
        user_id: row.get(1)?,
        venue_name: row.get(2)?,
        venue_type: row.get(3)?,
        location: row.get(4)?,
        check_in_time: row.get(5)?,
        notes: row.get(6)?,
    })
}

impl Database {
    /// Insert a check-in row (insert-only, never updated)
    pub fn insert_check_in(&self, check_in: &CheckIn) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO check_ins (id, user_id, venue_name, venue_type, location, check_in_time, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                check_in.id,
                check_in.user_id,
                check_in.venue_name,
                check_in.venue_type,
                check_in.location,
                check_in.check_in_time,
                check_in.notes
            ],
        )?;
        Ok(())
    }

    /// Count check-ins for a (user, venue) pair
    pub fn count_check_ins_at_venue(&self, user_id: &str, venue_name: &str) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM check_ins WHERE user_id = ?1 AND venue_name = ?2",
            params![user_id, venue_name],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Recent check-ins for a user, newest first
    pub fn get_check_ins_for_user(&self, user_id: &str, limit: u32) -> Result<Vec<CheckIn>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, user_id, venue_name, venue_type, location, check_in_time, notes
             FROM check_ins WHERE user_id = ?1
             ORDER BY check_in_time DESC LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![user_id, limit], check_in_from_row)?;

        let mut check_ins = Vec::new();
        for check_in in rows {
            check_ins.push(check_in?);
        }
        Ok(check_ins)
    }

    /// Total check-in rows for a user (not the denormalized counter)
    pub fn count_check_ins_for_user(&self, user_id: &str) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM check_ins WHERE user_id = ?1",
            params![user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
