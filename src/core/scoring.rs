use crate::core::distance::resolve_distance;
use crate::core::filters::{complementary_skills, shared_interests, SignalIndex};
use crate::models::{Profile, Recommendation, ScoringWeights, User};

/// A user together with their optional profile
#[derive(Debug, Clone, Copy)]
pub struct Participant<'a> {
    pub user: &'a User,
    pub profile: Option<&'a Profile>,
}

impl<'a> Participant<'a> {
    pub fn new(user: &'a User, profile: Option<&'a Profile>) -> Self {
        Self { user, profile }
    }
}

/// Score a candidate for the seeker
///
/// Scoring formula (additive, each term also adds a reason):
/// score = (
///     shared_interest * shared interests +
///     complementary_skill * complementary skills +
///     same_university +                      # candidate's university equals seeker's
///     same_major + same_year +               # both profiles present
///     max(0, proximity_max - km / km_per_point)  # both locations known
/// )
///
/// Returns `None` when the total is not positive.
pub fn calculate_compatibility(
    seeker: Participant<'_>,
    candidate: Participant<'_>,
    signals: &SignalIndex<'_>,
    weights: &ScoringWeights,
) -> Option<Recommendation> {
    let seeker_id = seeker.user.user_id;
    let candidate_id = candidate.user.user_id;

    let shared = shared_interests(
        signals.interests_of(seeker_id),
        signals.interests_of(candidate_id),
    );
    let complementary = complementary_skills(
        signals.skills_of(seeker_id),
        signals.skills_of(candidate_id),
    );

    let mut score = 0.0;
    let mut reasons = Vec::new();

    if !shared.is_empty() {
        score += shared.len() as f64 * weights.shared_interest;
        reasons.push(format!("Shared interests: {}", shared.join(", ")));
    }

    if !complementary.is_empty() {
        score += complementary.len() as f64 * weights.complementary_skill;
        reasons.push(format!("Complementary skills: {}", complementary.join(", ")));
    }

    if same_text(candidate.user.university.as_deref(), seeker.user.university.as_deref()) {
        score += weights.same_university;
        reasons.push("Same university".to_string());
    }

    if let (Some(candidate_profile), Some(seeker_profile)) = (candidate.profile, seeker.profile) {
        if same_text(candidate_profile.major.as_deref(), seeker_profile.major.as_deref()) {
            score += weights.same_major;
            reasons.push("Same major".to_string());
        }
        if same_text(candidate_profile.year.as_deref(), seeker_profile.year.as_deref()) {
            score += weights.same_year;
            reasons.push("Same academic year".to_string());
        }
    }

    let distance_km = resolve_distance(seeker.user, seeker.profile, candidate.user, candidate.profile);
    if let Some(km) = distance_km {
        score += proximity_score(km, weights);
        reasons.push(format!("Nearby (~{:.1} km)", km));
    }

    if score <= 0.0 {
        return None;
    }

    Some(Recommendation {
        user_id: candidate_id,
        full_name: candidate.user.full_name(),
        university: candidate.user.university.clone(),
        major: candidate.profile.and_then(|p| p.major.clone()),
        year: candidate.profile.and_then(|p| p.year.clone()),
        bio: candidate.profile.and_then(|p| p.bio.clone()),
        distance_km,
        compatibility_score: score,
        shared_interests: shared,
        complementary_skills: complementary,
        reasons,
    })
}

/// Proximity bonus, linear decay that never goes negative
#[inline]
pub fn proximity_score(distance_km: f64, weights: &ScoringWeights) -> f64 {
    (weights.proximity_max - distance_km / weights.proximity_km_per_point).max(0.0)
}

/// Case-insensitive equality; a missing value never matches
#[inline]
fn same_text(candidate: Option<&str>, seeker: Option<&str>) -> bool {
    match (candidate, seeker) {
        (Some(a), Some(b)) => a.to_lowercase() == b.to_lowercase(),
        _ => false,
    }
}
