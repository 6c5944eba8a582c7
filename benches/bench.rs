// Criterion benchmarks for CareMatch

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use carematch::core::{distance_miles, score_answers, Matcher, ZipDistanceIndex};
use carematch::models::{
    AnswerValue, AssessmentAnswers, CareRecommendation, Community, Coordinates,
};
use std::collections::HashMap;

fn create_community(id: usize) -> Community {
    let care_types = match id % 3 {
        0 => vec!["Memory Care".to_string()],
        1 => vec!["Assisted Living".to_string()],
        _ => vec!["Assisted Living".to_string(), "Memory Care".to_string()],
    };

    Community {
        id: id.to_string(),
        name: format!("Community {}", id),
        care_types,
        amenities: (0..(id % 8)).map(|i| format!("amenity-{}", i)).collect(),
        rating: if id % 4 == 0 { None } else { Some(3.0 + (id % 20) as f64 / 10.0) },
        coordinates: Some(Coordinates {
            lat: 41.3 + (id % 40) as f64 * 0.01,
            lng: -81.9 + (id % 50) as f64 * 0.01,
        }),
        zip: None,
    }
}

fn create_answers() -> AssessmentAnswers {
    let mut answers = HashMap::new();
    answers.insert(
        "memory-concerns".to_string(),
        AnswerValue::Single("frequent".to_string()),
    );
    answers.insert(
        "daily-living".to_string(),
        AnswerValue::Single("regular-help".to_string()),
    );
    answers.insert(
        "safety-concerns".to_string(),
        AnswerValue::Multiple(vec!["wandering".to_string(), "falls".to_string()]),
    );
    answers.insert(
        "community-priorities".to_string(),
        AnswerValue::Single("amenities".to_string()),
    );
    answers
}

fn bench_distance(c: &mut Criterion) {
    c.bench_function("distance_miles", |b| {
        b.iter(|| {
            distance_miles(
                black_box(Coordinates { lat: 41.4744, lng: -81.7399 }),
                black_box(Coordinates { lat: 41.1765, lng: -81.4343 }),
            )
        });
    });
}

fn bench_zip_lookup(c: &mut Criterion) {
    let index = ZipDistanceIndex::new();
    c.bench_function("zip_lookup", |b| {
        b.iter(|| index.lookup(black_box("44107")));
    });
}

fn bench_scoring(c: &mut Criterion) {
    let answers = create_answers();
    c.bench_function("score_answers", |b| {
        b.iter(|| score_answers(black_box(&answers)));
    });
}

fn bench_matching(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let answers = create_answers();

    let mut group = c.benchmark_group("match_communities");
    for pool_size in [50, 500, 5000] {
        let candidates: Vec<Community> = (0..pool_size).map(create_community).collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(pool_size),
            &candidates,
            |b, candidates| {
                b.iter(|| {
                    matcher.match_communities(
                        CareRecommendation::MemoryCare,
                        Some(&answers),
                        candidates.clone(),
                        3,
                    )
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_distance,
    bench_zip_lookup,
    bench_scoring,
    bench_matching
);
criterion_main!(benches);
