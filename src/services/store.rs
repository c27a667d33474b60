use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use validator::Validate;

use crate::core::{mutual_match, CandidateSource};
use crate::models::{
    Coordinates, InterestEntry, Match, Profile, SkillEntry, Swipe, User, UserId,
};

/// Errors that can occur when loading or saving a snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate user: {0}")]
    DuplicateUser(UserId),

    #[error("Duplicate profile for user: {0}")]
    DuplicateProfile(UserId),

    #[error("Invalid coordinates for user {user_id}: {source}")]
    InvalidCoordinates {
        user_id: UserId,
        #[source]
        source: validator::ValidationErrors,
    },
}

/// Errors that can occur when recording relationship changes
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Unknown user: {0}")]
    UnknownUser(UserId),

    #[error("User {0} cannot swipe on themselves")]
    SelfSwipe(UserId),
}

/// Everything the engine reads, as stored on disk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub profiles: Vec<Profile>,
    pub skills: Vec<SkillEntry>,
    pub interests: Vec<InterestEntry>,
    pub swipes: Vec<Swipe>,
    pub matches: Vec<Match>,
}

/// Result of recording a swipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeOutcome {
    pub swipe: Swipe,
    #[serde(rename = "newMatch")]
    pub new_match: Option<Match>,
}

/// In-memory store over a snapshot
///
/// Users and profiles are indexed by id on construction; all other
/// collections are scanned as needed.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    snapshot: Snapshot,
    user_index: HashMap<UserId, usize>,
    profile_index: HashMap<UserId, usize>,
}

impl InMemoryStore {
    /// Load a snapshot from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        let raw = fs::read_to_string(path.as_ref())?;
        tracing::info!("Loaded snapshot from {}", path.as_ref().display());
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_str(raw)?;
        Self::from_snapshot(snapshot)
    }

    /// Validate and index a snapshot
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, SnapshotError> {
        let mut user_index = HashMap::with_capacity(snapshot.users.len());
        for (position, user) in snapshot.users.iter().enumerate() {
            validate_coordinates(user.user_id, user.coordinates.as_ref())?;
            if user_index.insert(user.user_id, position).is_some() {
                return Err(SnapshotError::DuplicateUser(user.user_id));
            }
        }

        let mut profile_index = HashMap::with_capacity(snapshot.profiles.len());
        for (position, profile) in snapshot.profiles.iter().enumerate() {
            validate_coordinates(profile.user_id, profile.coordinates.as_ref())?;
            if !user_index.contains_key(&profile.user_id) {
                tracing::warn!("Profile references unknown user {}", profile.user_id);
            }
            if profile_index.insert(profile.user_id, position).is_some() {
                return Err(SnapshotError::DuplicateProfile(profile.user_id));
            }
        }

        let dangling_skills = snapshot
            .skills
            .iter()
            .filter(|s| !user_index.contains_key(&s.user_id))
            .count();
        let dangling_interests = snapshot
            .interests
            .iter()
            .filter(|i| !user_index.contains_key(&i.user_id))
            .count();
        if dangling_skills > 0 || dangling_interests > 0 {
            tracing::warn!(
                "Snapshot has {} skills and {} interests for unknown users",
                dangling_skills,
                dangling_interests
            );
        }

        tracing::debug!(
            "Indexed {} users, {} profiles, {} swipes, {} matches",
            user_index.len(),
            profile_index.len(),
            snapshot.swipes.len(),
            snapshot.matches.len()
        );

        Ok(Self {
            snapshot,
            user_index,
            profile_index,
        })
    }

    /// Write the snapshot back as pretty-printed JSON
    ///
    /// The JSON goes to a sibling `.tmp` file first and is renamed over
    /// `path`, so an interrupted write never truncates the existing snapshot.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&self.snapshot)?;

        let mut staging = path.as_os_str().to_owned();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);

        fs::write(&staging, json)?;
        if let Err(e) = fs::rename(&staging, path) {
            let _ = fs::remove_file(&staging);
            return Err(e.into());
        }

        tracing::info!("Saved snapshot to {}", path.display());
        Ok(())
    }

    /// Record a swipe and create a match when the like is mutual
    pub fn record_swipe(
        &mut self,
        swiper_id: UserId,
        swipee_id: UserId,
        is_like: bool,
        swiped_at: DateTime<Utc>,
    ) -> Result<SwipeOutcome, StoreError> {
        for id in [swiper_id, swipee_id] {
            if !self.user_index.contains_key(&id) {
                return Err(StoreError::UnknownUser(id));
            }
        }
        if swiper_id == swipee_id {
            return Err(StoreError::SelfSwipe(swiper_id));
        }

        let swipe = Swipe {
            swiper_id: Some(swiper_id),
            swipee_id: Some(swipee_id),
            is_like,
            swiped_at,
        };

        let new_match = mutual_match(&swipe, &self.snapshot.swipes, &self.snapshot.matches).map(
            |(user1, user2)| Match {
                user1_id: Some(user1),
                user2_id: Some(user2),
                matched_at: swiped_at,
                is_active: true,
            },
        );

        self.snapshot.swipes.push(swipe.clone());
        if let Some(m) = &new_match {
            tracing::info!("New match between {} and {}", swiper_id, swipee_id);
            self.snapshot.matches.push(m.clone());
        }

        Ok(SwipeOutcome { swipe, new_match })
    }

    /// Counterparts of every match involving `user_id`
    pub fn matches_for(&self, user_id: UserId) -> Vec<UserId> {
        self.snapshot
            .matches
            .iter()
            .filter_map(|m| m.counterpart_of(user_id))
            .collect()
    }
}

fn validate_coordinates(user_id: UserId, coordinates: Option<&Coordinates>) -> Result<(), SnapshotError> {
    match coordinates {
        Some(c) => c
            .validate()
            .map_err(|source| SnapshotError::InvalidCoordinates { user_id, source }),
        None => Ok(()),
    }
}

impl CandidateSource for InMemoryStore {
    fn user(&self, user_id: UserId) -> Option<&User> {
        self.user_index
            .get(&user_id)
            .map(|&position| &self.snapshot.users[position])
    }

    fn users(&self) -> &[User] {
        &self.snapshot.users
    }

    fn profile(&self, user_id: UserId) -> Option<&Profile> {
        self.profile_index
            .get(&user_id)
            .map(|&position| &self.snapshot.profiles[position])
    }

    fn skills(&self) -> &[SkillEntry] {
        &self.snapshot.skills
    }

    fn interests(&self) -> &[InterestEntry] {
        &self.snapshot.interests
    }

    fn swipes_by(&self, swiper_id: UserId) -> Vec<&Swipe> {
        self.snapshot
            .swipes
            .iter()
            .filter(|s| s.swiper_id == Some(swiper_id))
            .collect()
    }

    fn matches(&self) -> &[Match] {
        &self.snapshot.matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "users": [
            {"userId": 1, "firstName": "Alice", "university": "Tech"},
            {"userId": 2, "firstName": "Bob", "university": "Tech",
             "coordinates": {"latitude": 40.7, "longitude": -74.0}, "showLocation": true}
        ],
        "profiles": [{"userId": 2, "major": "Math"}],
        "skills": [{"userId": 2, "skillName": "Rust", "offering": true}],
        "swipes": [{"swiperId": 1, "swipeeId": null, "swipedAt": "2024-01-01T00:00:00Z"}]
    }"#;

    #[test]
    fn test_load_from_json() {
        let store = InMemoryStore::from_json(SNAPSHOT).unwrap();

        assert_eq!(store.users().len(), 2);
        assert_eq!(store.user(UserId(1)).unwrap().full_name(), "Alice");
        assert!(store.profile(UserId(1)).is_none());
        assert_eq!(store.profile(UserId(2)).unwrap().major.as_deref(), Some("Math"));
        assert!(store.skills()[0].offering);
        assert!(!store.skills()[0].seeking);
        assert_eq!(store.swipes_by(UserId(1)).len(), 1);
        assert!(store.matches().is_empty());
    }

    #[test]
    fn test_duplicate_user_rejected() {
        let raw = r#"{"users": [{"userId": 1}, {"userId": 1}]}"#;
        let err = InMemoryStore::from_json(raw).unwrap_err();
        assert!(matches!(err, SnapshotError::DuplicateUser(UserId(1))));
    }

    #[test]
    fn test_duplicate_profile_rejected() {
        let raw = r#"{"users": [{"userId": 1}], "profiles": [{"userId": 1}, {"userId": 1}]}"#;
        let err = InMemoryStore::from_json(raw).unwrap_err();
        assert!(matches!(err, SnapshotError::DuplicateProfile(UserId(1))));
    }

    #[test]
    fn test_out_of_range_coordinates_rejected() {
        let raw = r#"{"users": [{"userId": 3, "coordinates": {"latitude": 123.0, "longitude": 0.0}}]}"#;
        let err = InMemoryStore::from_json(raw).unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidCoordinates { user_id: UserId(3), .. }));
    }

    #[test]
    fn test_record_swipe_creates_match_on_mutual_like() {
        let mut store = InMemoryStore::from_json(SNAPSHOT).unwrap();
        let now = Utc::now();

        let first = store.record_swipe(UserId(1), UserId(2), true, now).unwrap();
        assert!(first.new_match.is_none());

        let second = store.record_swipe(UserId(2), UserId(1), true, now).unwrap();
        let created = second.new_match.unwrap();
        assert_eq!(created.user1_id, Some(UserId(2)));
        assert_eq!(created.user2_id, Some(UserId(1)));

        assert_eq!(store.matches_for(UserId(1)), vec![UserId(2)]);
        assert_eq!(store.matches_for(UserId(2)), vec![UserId(1)]);

        // A repeat like does not duplicate the match
        let third = store.record_swipe(UserId(1), UserId(2), true, now).unwrap();
        assert!(third.new_match.is_none());
        assert_eq!(store.matches().len(), 1);
    }

    #[test]
    fn test_save_replaces_snapshot_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        fs::write(&path, "stale").unwrap();

        let mut store = InMemoryStore::from_json(SNAPSHOT).unwrap();
        store.record_swipe(UserId(2), UserId(1), false, Utc::now()).unwrap();
        store.save(&path).unwrap();

        let reloaded = InMemoryStore::load(&path).unwrap();
        assert_eq!(reloaded.users().len(), 2);
        assert_eq!(reloaded.swipes_by(UserId(2)).len(), 1);
        assert!(!dir.path().join("snapshot.json.tmp").exists());
    }

    #[test]
    fn test_record_swipe_rejects_bad_users() {
        let mut store = InMemoryStore::from_json(SNAPSHOT).unwrap();
        let now = Utc::now();

        assert_eq!(
            store.record_swipe(UserId(1), UserId(9), true, now).unwrap_err(),
            StoreError::UnknownUser(UserId(9))
        );
        assert_eq!(
            store.record_swipe(UserId(1), UserId(1), true, now).unwrap_err(),
            StoreError::SelfSwipe(UserId(1))
        );
    }
}
