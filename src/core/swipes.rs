use crate::models::{Match, Swipe, UserId};

/// Pair that should become a match after a swipe, as (swiper, swipee)
///
/// Fires only for a like, when some earlier swipe from the swipee back to the
/// swiper is also a like, and when the two are not already matched in either
/// orientation.
pub fn mutual_match(new_swipe: &Swipe, swipes: &[Swipe], matches: &[Match]) -> Option<(UserId, UserId)> {
    if !new_swipe.is_like {
        return None;
    }

    let swiper = new_swipe.swiper_id?;
    let swipee = new_swipe.swipee_id?;

    let liked_back = swipes
        .iter()
        .any(|s| s.swiper_id == Some(swipee) && s.swipee_id == Some(swiper) && s.is_like);
    if !liked_back {
        return None;
    }

    if matches.iter().any(|m| m.involves(swiper, swipee)) {
        return None;
    }

    Some((swiper, swipee))
}
