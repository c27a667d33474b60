use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Opaque user identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct Coordinates {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl From<Coordinates> for geo::Point<f64> {
    fn from(value: Coordinates) -> Self {
        geo::Point::new(value.longitude, value.latitude)
    }
}

/// A registered user as seen by the matching engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "firstName", default)]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default)]
    pub last_name: Option<String>,
    /// Institution the user belongs to
    #[serde(default)]
    pub university: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(rename = "showLocation", default)]
    pub show_location: bool,
}

impl User {
    /// First and last name joined with a space, missing parts treated as empty
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_string()
    }

    /// Coordinates usable for scoring, if the user shares them
    pub fn visible_coordinates(&self) -> Option<Coordinates> {
        self.coordinates.filter(|_| self.show_location)
    }
}

/// Optional secondary attributes attached to a user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    /// Free-text place name the coordinates were geocoded from
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(rename = "showLocation", default)]
    pub show_location: bool,
}

impl Profile {
    pub fn visible_coordinates(&self) -> Option<Coordinates> {
        self.coordinates.filter(|_| self.show_location)
    }
}

/// A skill a user offers, seeks, or both
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillEntry {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "skillName")]
    pub skill_name: String,
    #[serde(rename = "skillLevel", default)]
    pub skill_level: Option<String>,
    #[serde(default)]
    pub offering: bool,
    #[serde(default)]
    pub seeking: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestEntry {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "interestName")]
    pub interest_name: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// Directed like/dislike decision from swiper to swipee
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Swipe {
    #[serde(rename = "swiperId", default)]
    pub swiper_id: Option<UserId>,
    #[serde(rename = "swipeeId", default)]
    pub swipee_id: Option<UserId>,
    #[serde(rename = "isLike", default)]
    pub is_like: bool,
    #[serde(rename = "swipedAt")]
    pub swiped_at: DateTime<Utc>,
}

/// Mutual match between two users; orientation carries no meaning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    #[serde(rename = "user1Id", default)]
    pub user1_id: Option<UserId>,
    #[serde(rename = "user2Id", default)]
    pub user2_id: Option<UserId>,
    #[serde(rename = "matchedAt")]
    pub matched_at: DateTime<Utc>,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
}

impl Match {
    /// The other side of this match when `user_id` is one of its sides
    pub fn counterpart_of(&self, user_id: UserId) -> Option<UserId> {
        match (self.user1_id, self.user2_id) {
            (Some(a), Some(b)) if a == user_id => Some(b),
            (Some(a), Some(b)) if b == user_id => Some(a),
            _ => None,
        }
    }

    pub fn involves(&self, a: UserId, b: UserId) -> bool {
        matches!(
            (self.user1_id, self.user2_id),
            (Some(x), Some(y)) if (x == a && y == b) || (x == b && y == a)
        )
    }
}

fn default_true() -> bool { true }

/// Scored recommendation returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub university: Option<String>,
    pub major: Option<String>,
    pub year: Option<String>,
    pub bio: Option<String>,
    #[serde(rename = "distanceKm")]
    pub distance_km: Option<f64>,
    #[serde(rename = "compatibilityScore")]
    pub compatibility_score: f64,
    #[serde(rename = "sharedInterests")]
    pub shared_interests: Vec<String>,
    #[serde(rename = "complementarySkills")]
    pub complementary_skills: Vec<String>,
    pub reasons: Vec<String>,
}

/// Additive scoring constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub shared_interest: f64,
    pub complementary_skill: f64,
    pub same_university: f64,
    pub same_major: f64,
    pub same_year: f64,
    /// Proximity bonus at zero distance
    pub proximity_max: f64,
    /// Kilometres that cost one proximity point
    pub proximity_km_per_point: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            shared_interest: 8.0,
            complementary_skill: 15.0,
            same_university: 5.0,
            same_major: 5.0,
            same_year: 3.0,
            proximity_max: 25.0,
            proximity_km_per_point: 5.0,
        }
    }
}
