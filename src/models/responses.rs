use serde::{Deserialize, Serialize};
use crate::models::domain::{Recommendation, UserId};

/// Output of the `recommend` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    #[serde(rename = "seekerId")]
    pub seeker_id: UserId,
    pub recommendations: Vec<Recommendation>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
}

impl RecommendationsResponse {
    pub fn new(seeker_id: UserId, recommendations: Vec<Recommendation>) -> Self {
        let total_results = recommendations.len();
        Self {
            seeker_id,
            recommendations,
            total_results,
        }
    }
}

/// Output of the `matches` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchesResponse {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    pub matches: Vec<UserId>,
    pub count: usize,
}

/// Error body printed when a command fails
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
