use thiserror::Error;
use tracing::{debug, info};

use crate::core::{
    exclusion::{build_exclusion_set, is_eligible},
    filters::SignalIndex,
    scoring::{calculate_compatibility, Participant},
};
use crate::models::{
    InterestEntry, Match, Profile, Recommendation, ScoringWeights, SkillEntry, Swipe, User, UserId,
};

/// Smallest number of recommendations a request can ask for
pub const MIN_LIMIT: i64 = 1;
/// Largest number of recommendations a request can ask for
pub const MAX_LIMIT: i64 = 50;

/// Errors raised while computing recommendations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("Seeker not found: {0}")]
    SeekerNotFound(UserId),
}

/// Read-only view of the data the engine ranks over
///
/// Implementors hand out a consistent snapshot; nothing here is mutated
/// during a recommendation run.
pub trait CandidateSource {
    fn user(&self, user_id: UserId) -> Option<&User>;

    /// Every user in the candidate pool, in enumeration order
    fn users(&self) -> &[User];

    fn profile(&self, user_id: UserId) -> Option<&Profile>;

    fn skills(&self) -> &[SkillEntry];

    fn interests(&self) -> &[InterestEntry];

    /// Swipes made by `swiper_id`
    fn swipes_by(&self, swiper_id: UserId) -> Vec<&Swipe>;

    fn matches(&self) -> &[Match];
}

/// Clamp a raw requested limit into `[MIN_LIMIT, MAX_LIMIT]`
#[inline]
pub fn clamp_limit(limit: i64) -> usize {
    limit.clamp(MIN_LIMIT, MAX_LIMIT) as usize
}

/// Recommendation orchestrator
///
/// # Pipeline Stages
/// 1. Resolve the seeker and their profile
/// 2. Index skills and interests per user
/// 3. Build the exclusion set
/// 4. Score every eligible candidate, dropping non-positive scores
/// 5. Rank by score and truncate to the clamped limit
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Recommend candidates for a seeker, best first
    ///
    /// # Arguments
    /// * `source` - Snapshot of users, profiles, signals and relationships
    /// * `seeker_id` - The user recommendations are computed for
    /// * `limit` - Requested number of results, clamped to `[1, 50]`
    ///
    /// # Returns
    /// At most `clamp_limit(limit)` recommendations sorted by score descending.
    /// Candidates with equal scores keep their enumeration order.
    pub fn recommend<S: CandidateSource + ?Sized>(
        &self,
        source: &S,
        seeker_id: UserId,
        limit: i64,
    ) -> Result<Vec<Recommendation>, MatchError> {
        let seeker_user = source
            .user(seeker_id)
            .ok_or(MatchError::SeekerNotFound(seeker_id))?;
        let seeker = Participant::new(seeker_user, source.profile(seeker_id));
        let limit = clamp_limit(limit);

        info!("Finding recommendations for user: {}, limit: {}", seeker_id, limit);

        let signals = SignalIndex::build(source.skills(), source.interests());
        let excluded = build_exclusion_set(seeker_id, source.swipes_by(seeker_id), source.matches());

        debug!("Excluding {} users for seeker {}", excluded.len(), seeker_id);

        let pool = source.users();
        let mut recommendations: Vec<Recommendation> = pool
            .iter()
            .filter(|candidate| is_eligible(candidate.user_id, &excluded))
            .filter_map(|candidate| {
                let recommendation = calculate_compatibility(
                    seeker,
                    Participant::new(candidate, source.profile(candidate.user_id)),
                    &signals,
                    &self.weights,
                );
                if recommendation.is_none() {
                    debug!("Dropping candidate {}: nothing in common", candidate.user_id);
                }
                recommendation
            })
            .collect();

        let scored = recommendations.len();

        // Stable sort keeps enumeration order among equal scores
        recommendations.sort_by(|a, b| b.compatibility_score.total_cmp(&a.compatibility_score));
        recommendations.truncate(limit);

        info!(
            "Returning {} recommendations for user {} ({} scored from {} candidates)",
            recommendations.len(),
            seeker_id,
            scored,
            pool.len()
        );

        Ok(recommendations)
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
