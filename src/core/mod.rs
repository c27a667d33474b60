// Core algorithm exports
pub mod distance;
pub mod exclusion;
pub mod filters;
pub mod matcher;
pub mod scoring;
pub mod swipes;

pub use distance::{haversine_distance, resolve_coordinates, resolve_distance};
pub use exclusion::build_exclusion_set;
pub use filters::{complementary_skills, shared_interests, SignalIndex};
pub use matcher::{clamp_limit, CandidateSource, MatchError, Matcher, MAX_LIMIT, MIN_LIMIT};
pub use scoring::{calculate_compatibility, Participant};
pub use swipes::mutual_match;
