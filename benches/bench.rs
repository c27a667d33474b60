// Criterion benchmarks for SkillSwap Match

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use skillswap_match::core::{complementary_skills, distance::haversine_distance, Matcher};
use skillswap_match::models::{Coordinates, InterestEntry, SkillEntry, Swipe, User, UserId};
use skillswap_match::services::{InMemoryStore, Snapshot};

const SKILLS: [&str; 6] = ["Rust", "Guitar", "Calculus", "Spanish", "Photography", "Design"];
const INTERESTS: [&str; 5] = ["Chess", "Hiking", "Hackathons", "Jazz", "Film"];
const UNIVERSITIES: [&str; 3] = ["State University", "Tech Institute", "City College"];

fn create_user(id: i64, lat: f64, lon: f64) -> User {
    User {
        user_id: UserId(id),
        first_name: Some(format!("User{}", id)),
        last_name: Some("Bench".to_string()),
        university: Some(UNIVERSITIES[id as usize % UNIVERSITIES.len()].to_string()),
        coordinates: Some(Coordinates::new(lat, lon)),
        show_location: id % 4 != 0,
    }
}

fn create_skills(id: i64) -> Vec<SkillEntry> {
    let offered = SKILLS[id as usize % SKILLS.len()];
    let sought = SKILLS[(id as usize + 1) % SKILLS.len()];
    vec![
        SkillEntry {
            user_id: UserId(id),
            skill_name: offered.to_string(),
            skill_level: None,
            offering: true,
            seeking: false,
        },
        SkillEntry {
            user_id: UserId(id),
            skill_name: sought.to_string(),
            skill_level: None,
            offering: false,
            seeking: true,
        },
    ]
}

fn create_snapshot(candidate_count: i64) -> Snapshot {
    let users: Vec<User> = (0..=candidate_count)
        .map(|i| {
            let offset = (i as f64 * 0.001) % 0.5;
            create_user(i, 40.7128 + offset, -74.0060 + offset)
        })
        .collect();
    let skills = (0..=candidate_count).flat_map(create_skills).collect();
    let interests = (0..=candidate_count)
        .map(|i| InterestEntry {
            user_id: UserId(i),
            interest_name: INTERESTS[i as usize % INTERESTS.len()].to_string(),
            category: None,
        })
        .collect();
    let swipes = (1..=candidate_count)
        .step_by(10)
        .map(|i| Swipe {
            swiper_id: Some(UserId(0)),
            swipee_id: Some(UserId(i)),
            is_like: i % 20 == 1,
            swiped_at: Utc::now(),
        })
        .collect();

    Snapshot {
        users,
        skills,
        interests,
        swipes,
        ..Default::default()
    }
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(40.7128),
                black_box(-74.0060),
                black_box(40.72),
                black_box(-74.01),
            )
        });
    });
}

fn bench_complementary_skills(c: &mut Criterion) {
    let seeker = create_skills(1);
    let candidate = create_skills(2);
    let seeker: Vec<_> = seeker.iter().collect();
    let candidate: Vec<_> = candidate.iter().collect();

    c.bench_function("complementary_skills", |b| {
        b.iter(|| complementary_skills(black_box(&seeker), black_box(&candidate)));
    });
}

fn bench_recommend(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();

    let mut group = c.benchmark_group("recommend");

    for candidate_count in [10, 100, 1000].iter() {
        let store = InMemoryStore::from_snapshot(create_snapshot(*candidate_count))
            .expect("bench snapshot should be valid");

        group.bench_with_input(
            BenchmarkId::new("recommend", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| matcher.recommend(black_box(&store), black_box(UserId(0)), black_box(20)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_complementary_skills,
    bench_recommend
);

criterion_main!(benches);
