use crate::database::models::Badge;
use crate::database::Database;
use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{params, Row};

fn badge_from_row(row: &Row) -> rusqlite::Result<Badge> {
    let earned_at: String = row.get(4)?;
    Ok(Badge {
        id: row.get(0)?,
        user_id: row.get(1)?,
        venue_name: row.get(2)?,
        badge_type: row.get(3)?,
        earned_at: earned_at
            .parse::<DateTime<Utc>>()
            .unwrap_or_else(|_| Utc::now()),
        icon: row.get(5)?,
    })
}

impl Database {
    /// Insert a badge row
    pub fn insert_badge(&self, badge: &Badge) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO badges (id, user_id, venue_name, badge_type, earned_at, icon)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                badge.id,
                badge.user_id,
                badge.venue_name,
                badge.badge_type,
                badge.earned_at.to_rfc3339(),
                badge.icon
            ],
        )?;
        Ok(())
    }

    /// All badges for a user, newest first
    pub fn get_badges_for_user(&self, user_id: &str) -> Result<Vec<Badge>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, user_id, venue_name, badge_type, earned_at, icon
             FROM badges WHERE user_id = ?1 ORDER BY earned_at DESC",
        )?;
        let rows = stmt.query_map(params![user_id], badge_from_row)?;

        let mut badges = Vec::new();
        for badge in rows {
            badges.push(badge?);
        }
        Ok(badges)
    }

    /// Badges for a (user, venue, type) triple; used by award tests
    pub fn count_badges(&self, user_id: &str, venue_name: &str, badge_type: &str) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM badges
             WHERE user_id = ?1 AND venue_name = ?2 AND badge_type = ?3",
            params![user_id, venue_name, badge_type],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
