//! SkillSwap Match - recommendation engine for the SkillSwap campus matching app
//!
//! This library scores and ranks candidate users for a seeker from shared
//! interests, complementary skills, shared campus attributes and proximity,
//! and excludes anyone the seeker has already swiped on or matched with.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{CandidateSource, MatchError, Matcher, distance::haversine_distance};
pub use crate::models::{Recommendation, RecommendationsResponse, ScoringWeights, User, UserId};
pub use crate::services::InMemoryStore;
