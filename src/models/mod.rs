// Model exports
pub mod domain;
pub mod responses;

pub use domain::{
    Coordinates, InterestEntry, Match, Profile, Recommendation, ScoringWeights, SkillEntry, Swipe,
    User, UserId,
};
pub use responses::{ErrorResponse, MatchesResponse, RecommendationsResponse};
