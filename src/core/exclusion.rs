use std::collections::HashSet;

use crate::models::{Match, Swipe, UserId};

/// Build the set of user ids that must never be recommended to `seeker_id`
///
/// Contains the seeker, everyone the seeker has swiped on (like or pass, a
/// decision is final), and every counterpart of a match involving the seeker.
/// Records with a missing side are skipped.
pub fn build_exclusion_set<'a, S, M>(seeker_id: UserId, swipes: S, matches: M) -> HashSet<UserId>
where
    S: IntoIterator<Item = &'a Swipe>,
    M: IntoIterator<Item = &'a Match>,
{
    let swiped = swipes
        .into_iter()
        .filter(|swipe| swipe.swiper_id == Some(seeker_id))
        .filter_map(|swipe| swipe.swipee_id);

    let matched = matches
        .into_iter()
        .filter_map(|m| m.counterpart_of(seeker_id));

    std::iter::once(seeker_id).chain(swiped).chain(matched).collect()
}

/// True when the candidate may appear in recommendations
#[inline]
pub fn is_eligible(candidate_id: UserId, excluded: &HashSet<UserId>) -> bool {
    !excluded.contains(&candidate_id)
}
