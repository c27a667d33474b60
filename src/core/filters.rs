use std::collections::{BTreeSet, HashMap, HashSet};

use crate::models::{InterestEntry, SkillEntry, UserId};

/// Skills and interests grouped by owner, built once per request
#[derive(Debug, Default)]
pub struct SignalIndex<'a> {
    skills: HashMap<UserId, Vec<&'a SkillEntry>>,
    interests: HashMap<UserId, Vec<&'a InterestEntry>>,
}

impl<'a> SignalIndex<'a> {
    pub fn build(skills: &'a [SkillEntry], interests: &'a [InterestEntry]) -> Self {
        let skills = skills.iter().fold(HashMap::new(), |mut acc: HashMap<_, Vec<_>>, skill| {
            acc.entry(skill.user_id).or_default().push(skill);
            acc
        });
        let interests = interests
            .iter()
            .fold(HashMap::new(), |mut acc: HashMap<_, Vec<_>>, interest| {
                acc.entry(interest.user_id).or_default().push(interest);
                acc
            });

        Self { skills, interests }
    }

    /// Skill entries of a user; empty when the user has none
    pub fn skills_of(&self, user_id: UserId) -> &[&'a SkillEntry] {
        self.skills.get(&user_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn interests_of(&self, user_id: UserId) -> &[&'a InterestEntry] {
        self.interests.get(&user_id).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[inline]
fn has_value(name: &str) -> bool {
    !name.trim().is_empty()
}

/// Interest names both users share, ignoring case
///
/// Names come from the seeker's side, in the seeker's order, each at most once.
pub fn shared_interests(seeker: &[&InterestEntry], candidate: &[&InterestEntry]) -> Vec<String> {
    if seeker.is_empty() || candidate.is_empty() {
        return Vec::new();
    }

    let candidate_names: HashSet<String> = candidate
        .iter()
        .map(|interest| interest.interest_name.as_str())
        .filter(|name| has_value(name))
        .map(str::to_lowercase)
        .collect();

    let mut seen = HashSet::new();
    seeker
        .iter()
        .map(|interest| interest.interest_name.as_str())
        .filter(|name| has_value(name))
        .filter(|name| candidate_names.contains(&name.to_lowercase()))
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Lower-cased names of skills whose `flag` is set
fn skill_set(skills: &[&SkillEntry], flag: impl Fn(&SkillEntry) -> bool) -> HashSet<String> {
    skills
        .iter()
        .filter(|skill| has_value(&skill.skill_name) && flag(**skill))
        .map(|skill| skill.skill_name.to_lowercase())
        .collect()
}

/// Skills one side offers that the other side seeks
///
/// Returns `"<skill> (they offer)"` when the candidate offers what the seeker
/// seeks and `"<skill> (they need)"` when the candidate seeks what the seeker
/// offers. Both variants can appear for the same skill. Output is sorted.
pub fn complementary_skills(seeker: &[&SkillEntry], candidate: &[&SkillEntry]) -> Vec<String> {
    if seeker.is_empty() || candidate.is_empty() {
        return Vec::new();
    }

    let seeker_offers = skill_set(seeker, |s| s.offering);
    let seeker_seeks = skill_set(seeker, |s| s.seeking);
    let candidate_offers = skill_set(candidate, |s| s.offering);
    let candidate_seeks = skill_set(candidate, |s| s.seeking);

    let they_offer = candidate_offers
        .iter()
        .filter(|skill| seeker_seeks.contains(*skill))
        .map(|skill| format!("{} (they offer)", skill));
    let they_need = candidate_seeks
        .iter()
        .filter(|skill| seeker_offers.contains(*skill))
        .map(|skill| format!("{} (they need)", skill));

    they_offer
        .chain(they_need)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(user: i64, name: &str, offering: bool, seeking: bool) -> SkillEntry {
        SkillEntry {
            user_id: UserId(user),
            skill_name: name.to_string(),
            skill_level: None,
            offering,
            seeking,
        }
    }

    fn interest(user: i64, name: &str) -> InterestEntry {
        InterestEntry {
            user_id: UserId(user),
            interest_name: name.to_string(),
            category: None,
        }
    }

    #[test]
    fn test_shared_interests_case_insensitive() {
        let mine = [interest(1, "Hackathons"), interest(1, "Chess"), interest(1, "Climbing")];
        let theirs = [interest(2, "hackathons"), interest(2, "CLIMBING")];
        let mine: Vec<_> = mine.iter().collect();
        let theirs: Vec<_> = theirs.iter().collect();

        assert_eq!(shared_interests(&mine, &theirs), vec!["Hackathons", "Climbing"]);
    }

    #[test]
    fn test_shared_interests_skip_blank_and_duplicates() {
        let mine = [interest(1, "  "), interest(1, "Chess"), interest(1, "Chess")];
        let theirs = [interest(2, "  "), interest(2, "chess")];
        let mine: Vec<_> = mine.iter().collect();
        let theirs: Vec<_> = theirs.iter().collect();

        assert_eq!(shared_interests(&mine, &theirs), vec!["Chess"]);
    }

    #[test]
    fn test_shared_interests_absent_side() {
        let mine = [interest(1, "Chess")];
        let mine: Vec<_> = mine.iter().collect();

        assert!(shared_interests(&mine, &[]).is_empty());
        assert!(shared_interests(&[], &mine).is_empty());
    }

    #[test]
    fn test_complementary_skills_both_directions() {
        let seeker = [skill(1, "JavaScript", true, false), skill(1, "Product Design", false, true)];
        let candidate = [skill(2, "Product Design", true, false), skill(2, "javascript", false, true)];
        let seeker: Vec<_> = seeker.iter().collect();
        let candidate: Vec<_> = candidate.iter().collect();

        assert_eq!(
            complementary_skills(&seeker, &candidate),
            vec!["javascript (they need)", "product design (they offer)"]
        );
    }

    #[test]
    fn test_same_skill_can_match_twice() {
        let seeker = [skill(1, "Rust", true, true)];
        let candidate = [skill(2, "Rust", true, true)];
        let seeker: Vec<_> = seeker.iter().collect();
        let candidate: Vec<_> = candidate.iter().collect();

        assert_eq!(
            complementary_skills(&seeker, &candidate),
            vec!["rust (they need)", "rust (they offer)"]
        );
    }

    #[test]
    fn test_flags_off_never_match() {
        let seeker = [skill(1, "Rust", false, false), skill(1, "", true, true)];
        let candidate = [skill(2, "Rust", true, true), skill(2, "", true, true)];
        let seeker: Vec<_> = seeker.iter().collect();
        let candidate: Vec<_> = candidate.iter().collect();

        assert!(complementary_skills(&seeker, &candidate).is_empty());
    }

    #[test]
    fn test_signal_index_groups_by_user() {
        let skills = vec![
            skill(1, "Rust", true, false),
            skill(2, "Go", true, false),
            skill(1, "SQL", false, true),
        ];
        let interests = vec![interest(2, "Chess")];
        let index = SignalIndex::build(&skills, &interests);

        assert_eq!(index.skills_of(UserId(1)).len(), 2);
        assert_eq!(index.skills_of(UserId(2)).len(), 1);
        assert!(index.interests_of(UserId(1)).is_empty());
        assert_eq!(index.interests_of(UserId(2))[0].interest_name, "Chess");
    }
}
