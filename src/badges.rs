//! Badge awarder
//!
//! Evaluated after the check-in row exists, so the count includes the
//! just-inserted row. Exactly two thresholds: the 1st check-in at a venue
//! awards `first_visit`, the 5th awards `regular`. Nothing else awards.

use crate::database::models::Badge;
use crate::database::Database;
use crate::logger::{self, LogTag};
use anyhow::Result;
use chrono::Utc;
use uuid::Uuid;

/// Check-in count that awards `first_visit`
pub const FIRST_VISIT_THRESHOLD: i64 = 1;
/// Check-in count that awards `regular`
pub const REGULAR_THRESHOLD: i64 = 5;

/// Badge kinds the awarder can grant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeType {
    FirstVisit,
    Regular,
}

impl BadgeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeType::FirstVisit => "first_visit",
            BadgeType::Regular => "regular",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            BadgeType::FirstVisit => "🌟",
            BadgeType::Regular => "🏆",
        }
    }

    /// Badge earned at exactly this check-in count, if any
    pub fn for_count(count: i64) -> Option<Self> {
        match count {
            FIRST_VISIT_THRESHOLD => Some(BadgeType::FirstVisit),
            REGULAR_THRESHOLD => Some(BadgeType::Regular),
            _ => None,
        }
    }
}

impl std::fmt::Display for BadgeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Award a badge for the latest check-in at a venue, if a threshold was hit
///
/// Returns the awarded badge type, or None when the count is off-threshold.
/// Inserts the badge row and bumps the profile badge counter.
pub fn award_for_check_in(
    db: &Database,
    user_id: &str,
    venue_name: &str,
) -> Result<Option<BadgeType>> {
    let count = db.count_check_ins_at_venue(user_id, venue_name)?;

    let badge_type = match BadgeType::for_count(count) {
        Some(t) => t,
        None => return Ok(None),
    };

    let badge = Badge {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        venue_name: venue_name.to_string(),
        badge_type: badge_type.as_str().to_string(),
        earned_at: Utc::now(),
        icon: badge_type.icon().to_string(),
    };

    db.insert_badge(&badge)?;
    db.bump_badge_counter(user_id)?;

    logger::info(
        LogTag::Badges,
        &format!(
            "Awarded '{}' to {} for check-in #{} at {}",
            badge_type, user_id, count, venue_name
        ),
    );

    Ok(Some(badge_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_mapping() {
        assert_eq!(BadgeType::for_count(1), Some(BadgeType::FirstVisit));
        assert_eq!(BadgeType::for_count(5), Some(BadgeType::Regular));
        for count in [0, 2, 3, 4, 6, 7, 100] {
            assert_eq!(BadgeType::for_count(count), None, "count {}", count);
        }
    }
}
