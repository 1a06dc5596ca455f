use crate::database::models::Profile;
use crate::database::Database;
use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{params, Row};

fn profile_from_row(row: &Row) -> rusqlite::Result<Profile> {
    let created_at: String = row.get(6)?;
    Ok(Profile {
        id: row.get(0)?,
        username: row.get(1)?,
        avatar_url: row.get(2)?,
        total_check_ins: row.get(3)?,
        total_badges: row.get(4)?,
        unique_venues: row.get(5)?,
        created_at: created_at
            .parse::<DateTime<Utc>>()
            .unwrap_or_else(|_| Utc::now()),
    })
}

const PROFILE_COLUMNS: &str =
    "id, username, avatar_url, total_check_ins, total_badges, unique_venues, created_at";

impl Database {
    /// Create a profile row with zeroed counters
    pub fn create_profile(&self, id: &str, username: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO profiles (id, username, created_at) VALUES (?1, ?2, ?3)",
            params![id, username, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Fetch a profile by id
    pub fn get_profile(&self, id: &str) -> Result<Option<Profile>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM profiles WHERE id = ?1",
            PROFILE_COLUMNS
        ))?;
        let mut rows = stmt.query_map(params![id], profile_from_row)?;
        match rows.next() {
            Some(profile) => Ok(Some(profile?)),
            None => Ok(None),
        }
    }

    /// Fetch a profile by username
    pub fn get_profile_by_username(&self, username: &str) -> Result<Option<Profile>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM profiles WHERE username = ?1",
            PROFILE_COLUMNS
        ))?;
        let mut rows = stmt.query_map(params![username], profile_from_row)?;
        match rows.next() {
            Some(profile) => Ok(Some(profile?)),
            None => Ok(None),
        }
    }

    /// Bump check-in counters after a successful submission
    ///
    /// `first_visit` also bumps unique_venues. Single-statement increments,
    /// so concurrent check-ins cannot lose updates.
    pub fn bump_check_in_counters(&self, user_id: &str, first_visit: bool) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        if first_visit {
            conn.execute(
                "UPDATE profiles
                 SET total_check_ins = total_check_ins + 1,
                     unique_venues = unique_venues + 1
                 WHERE id = ?1",
                params![user_id],
            )?;
        } else {
            conn.execute(
                "UPDATE profiles SET total_check_ins = total_check_ins + 1 WHERE id = ?1",
                params![user_id],
            )?;
        }
        Ok(())
    }

    /// Bump the badge counter after an award
    pub fn bump_badge_counter(&self, user_id: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "UPDATE profiles SET total_badges = total_badges + 1 WHERE id = ?1",
            params![user_id],
        )?;
        Ok(())
    }

    /// Profiles ordered by total check-ins, most active first
    pub fn get_top_profiles(&self, limit: u32) -> Result<Vec<Profile>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM profiles ORDER BY total_check_ins DESC, username ASC LIMIT ?1",
            PROFILE_COLUMNS
        ))?;
        let rows = stmt.query_map(params![limit], profile_from_row)?;

        let mut profiles = Vec::new();
        for profile in rows {
            profiles.push(profile?);
        }
        Ok(profiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::is_unique_violation;

    #[test]
    fn test_duplicate_username_is_unique_violation() {
        let db = Database::open_in_memory().unwrap();
        db.create_profile("u1", "alice").unwrap();

        let err = db.create_profile("u2", "alice").unwrap_err();
        assert!(is_unique_violation(&err));

        // Other failures are not flagged as uniqueness clashes
        let other = anyhow::anyhow!("unrelated");
        assert!(!is_unique_violation(&other));
    }
}
