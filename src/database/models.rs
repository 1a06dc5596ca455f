use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user profile with denormalized activity counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub username: String,
    pub avatar_url: Option<String>,
    pub total_check_ins: i64,
    pub total_badges: i64,
    pub unique_venues: i64,
    pub created_at: DateTime<Utc>,
}

/// A user-submitted record asserting presence at a venue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckIn {
    pub id: String,
    pub user_id: String,
    pub venue_name: String,
    pub venue_type: String,
    pub location: String,
    pub check_in_time: String,
    pub notes: Option<String>,
}

/// A derived achievement granted at a check-in-count threshold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub user_id: String,
    pub venue_name: String,
    pub badge_type: String,
    pub earned_at: DateTime<Utc>,
    pub icon: String,
}

/// A cached place sourced from the external places API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub place_id: String,
    pub name: String,
    pub address: String,
    pub types: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// An authenticated session
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
