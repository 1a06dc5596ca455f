//! Leaderboard reader
//!
//! Orders the denormalized profile counters; rank is positional. The browser
//! client polls this on a fixed interval, the server keeps no poll state.

use crate::database::Database;
use anyhow::Result;
use serde::Serialize;

pub const DEFAULT_LIMIT: u32 = 50;

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub user_id: String,
    pub username: String,
    pub avatar_url: Option<String>,
    pub total_check_ins: i64,
    pub total_badges: i64,
    pub unique_venues: i64,
}

/// Top profiles by check-in count
pub fn top(db: &Database, limit: u32) -> Result<Vec<LeaderboardEntry>> {
    let profiles = db.get_top_profiles(limit)?;

    Ok(profiles
        .into_iter()
        .enumerate()
        .map(|(i, p)| LeaderboardEntry {
            rank: (i + 1) as u32,
            user_id: p.id,
            username: p.username,
            avatar_url: p.avatar_url,
            total_check_ins: p.total_check_ins,
            total_badges: p.total_badges,
            unique_venues: p.unique_venues,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkins::{submit_check_in, NewCheckIn};

    fn check_in(db: &Database, user_id: &str, venue: &str) {
        submit_check_in(
            db,
            &NewCheckIn {
                user_id: user_id.to_string(),
                venue_name: venue.to_string(),
                venue_type: "Cafe".to_string(),
                location: "1 Main St".to_string(),
                check_in_time: "2026-08-23T10:00:00Z".to_string(),
                notes: None,
            },
        )
        .unwrap();
    }

    #[test]
    fn test_ordering_and_ranks() {
        let db = Database::open_in_memory().unwrap();
        db.create_profile("u1", "alice").unwrap();
        db.create_profile("u2", "bob").unwrap();
        db.create_profile("u3", "carol").unwrap();

        check_in(&db, "u2", "Cafe X");
        check_in(&db, "u2", "Cafe X");
        check_in(&db, "u2", "Bar Y");
        check_in(&db, "u3", "Cafe X");

        let entries = top(&db, 10).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].username, "bob");
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[0].total_check_ins, 3);
        assert_eq!(entries[1].username, "carol");
        assert_eq!(entries[2].username, "alice");
        assert_eq!(entries[2].total_check_ins, 0);
    }

    #[test]
    fn test_limit_respected() {
        let db = Database::open_in_memory().unwrap();
        for i in 0..5 {
            db.create_profile(&format!("u{}", i), &format!("user{}", i))
                .unwrap();
        }
        assert_eq!(top(&db, 3).unwrap().len(), 3);
    }
}
