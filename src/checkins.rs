//! Check-in submission path
//!
//! Validate required fields, insert one row, then run the badge awarder and
//! counter bumps best-effort: their failures are logged, never propagated,
//! and never fail the submission. There is no server-side duplicate guard;
//! resubmitting creates a second row.

use crate::badges::{self, BadgeType};
use crate::database::models::CheckIn;
use crate::database::Database;
use crate::errors::WaypostError;
use crate::logger::{self, LogTag};
use serde::Deserialize;
use uuid::Uuid;

/// Incoming check-in submission
#[derive(Debug, Clone, Deserialize)]
pub struct NewCheckIn {
    pub user_id: String,
    pub venue_name: String,
    pub venue_type: String,
    pub location: String,
    pub check_in_time: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Result of a successful submission
#[derive(Debug, Clone)]
pub struct CheckInOutcome {
    pub check_in_id: String,
    pub badge_awarded: Option<BadgeType>,
}

/// Reject the submission if any required field is empty
fn validate(input: &NewCheckIn) -> Result<(), WaypostError> {
    let required = [
        ("user_id", &input.user_id),
        ("venue_name", &input.venue_name),
        ("venue_type", &input.venue_type),
        ("location", &input.location),
        ("check_in_time", &input.check_in_time),
    ];

    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(WaypostError::validation(field));
        }
    }
    Ok(())
}

/// Submit a check-in
///
/// Validation and the insert itself are hard failures; everything after the
/// row exists (badge award, profile counters) is best-effort.
pub fn submit_check_in(
    db: &Database,
    input: &NewCheckIn,
) -> Result<CheckInOutcome, WaypostError> {
    validate(input)?;

    // First visit determines the unique_venues bump; decided before insert
    let prior_count = db
        .count_check_ins_at_venue(&input.user_id, &input.venue_name)
        .map_err(|e| WaypostError::database("count check-ins", e))?;
    let first_visit = prior_count == 0;

    let check_in = CheckIn {
        id: Uuid::new_v4().to_string(),
        user_id: input.user_id.clone(),
        venue_name: input.venue_name.clone(),
        venue_type: input.venue_type.clone(),
        location: input.location.clone(),
        check_in_time: input.check_in_time.clone(),
        notes: input.notes.clone(),
    };

    db.insert_check_in(&check_in)
        .map_err(|e| WaypostError::database("insert check-in", e))?;

    logger::debug(
        LogTag::CheckIn,
        &format!(
            "Check-in {} stored for {} at {}",
            check_in.id, input.user_id, input.venue_name
        ),
    );

    // Best-effort: badge award failure must not fail the check-in
    let badge_awarded = match badges::award_for_check_in(db, &input.user_id, &input.venue_name) {
        Ok(awarded) => awarded,
        Err(e) => {
            logger::warning(
                LogTag::Badges,
                &format!("Badge award failed for {}: {}", input.user_id, e),
            );
            None
        }
    };

    // Best-effort: denormalized counters
    if let Err(e) = db.bump_check_in_counters(&input.user_id, first_visit) {
        logger::warning(
            LogTag::CheckIn,
            &format!("Counter update failed for {}: {}", input.user_id, e),
        );
    }

    Ok(CheckInOutcome {
        check_in_id: check_in.id,
        badge_awarded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_input(user_id: &str, venue: &str) -> NewCheckIn {
        NewCheckIn {
            user_id: user_id.to_string(),
            venue_name: venue.to_string(),
            venue_type: "Cafe".to_string(),
            location: "1 Main St".to_string(),
            check_in_time: "2026-08-23T10:00:00Z".to_string(),
            notes: None,
        }
    }

    fn setup() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.create_profile("user-1", "alice").unwrap();
        db
    }

    #[test]
    fn test_missing_required_field_persists_nothing() {
        let db = setup();
        let mut input = new_input("user-1", "Cafe X");
        input.venue_type = String::new();

        let result = submit_check_in(&db, &input);
        assert!(matches!(
            result,
            Err(WaypostError::Validation { ref field }) if field == "venue_type"
        ));
        assert_eq!(db.count_check_ins_for_user("user-1").unwrap(), 0);
    }

    #[test]
    fn test_whitespace_only_field_rejected() {
        let db = setup();
        let mut input = new_input("user-1", "Cafe X");
        input.location = "   ".to_string();

        assert!(submit_check_in(&db, &input).is_err());
        assert_eq!(db.count_check_ins_for_user("user-1").unwrap(), 0);
    }

    #[test]
    fn test_first_check_in_awards_first_visit() {
        let db = setup();
        let outcome = submit_check_in(&db, &new_input("user-1", "Cafe X")).unwrap();

        assert_eq!(outcome.badge_awarded, Some(BadgeType::FirstVisit));
        assert_eq!(db.count_check_ins_for_user("user-1").unwrap(), 1);
        assert_eq!(
            db.count_badges("user-1", "Cafe X", "first_visit").unwrap(),
            1
        );

        let profile = db.get_profile("user-1").unwrap().unwrap();
        assert_eq!(profile.total_check_ins, 1);
        assert_eq!(profile.total_badges, 1);
        assert_eq!(profile.unique_venues, 1);
    }

    #[test]
    fn test_badge_thresholds_across_repeat_visits() {
        let db = setup();
        let input = new_input("user-1", "Cafe X");

        let expected = [
            Some(BadgeType::FirstVisit),
            None,
            None,
            None,
            Some(BadgeType::Regular),
            None,
            None,
        ];

        for (i, want) in expected.iter().enumerate() {
            let outcome = submit_check_in(&db, &input).unwrap();
            assert_eq!(outcome.badge_awarded, *want, "check-in #{}", i + 1);
        }

        assert_eq!(db.count_badges("user-1", "Cafe X", "first_visit").unwrap(), 1);
        assert_eq!(db.count_badges("user-1", "Cafe X", "regular").unwrap(), 1);

        // unique_venues only counted once across the seven visits
        let profile = db.get_profile("user-1").unwrap().unwrap();
        assert_eq!(profile.total_check_ins, 7);
        assert_eq!(profile.unique_venues, 1);
    }

    #[test]
    fn test_no_duplicate_guard() {
        let db = setup();
        let input = new_input("user-1", "Cafe X");
        submit_check_in(&db, &input).unwrap();
        submit_check_in(&db, &input).unwrap();
        assert_eq!(db.count_check_ins_for_user("user-1").unwrap(), 2);
    }
}
