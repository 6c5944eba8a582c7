// Integration tests for CareMatch

use carematch::core::{band_profile, recommend, score_answers, Matcher, ZipDistanceIndex};
use carematch::models::{
    AnswerValue, AssessmentAnswers, CareRecommendation, Community, Coordinates,
};
use carematch::services::{DirectoryClient, DirectoryCollections};
use std::collections::HashMap;

fn community(id: &str, care_types: &[&str], rating: Option<f64>) -> Community {
    Community {
        id: id.to_string(),
        name: format!("Community {}", id),
        care_types: care_types.iter().map(|s| s.to_string()).collect(),
        amenities: vec!["dining".to_string(), "transportation".to_string()],
        rating,
        coordinates: Some(Coordinates {
            lat: 41.48,
            lng: -81.80,
        }),
        zip: Some("44107".to_string()),
    }
}

fn memory_care_answers() -> AssessmentAnswers {
    let mut answers = HashMap::new();
    answers.insert(
        "memory-concerns".to_string(),
        AnswerValue::Single("diagnosed".to_string()),
    );
    answers.insert(
        "safety-concerns".to_string(),
        AnswerValue::Multiple(vec!["wandering".to_string()]),
    );
    answers.insert(
        "community-priorities".to_string(),
        AnswerValue::Single("memory-care-programs".to_string()),
    );
    answers
}

#[test]
fn test_end_to_end_memory_care_pipeline() {
    // Answers -> score -> band -> matches, the full request flow
    let answers = memory_care_answers();

    let score = score_answers(&answers);
    assert_eq!(score, 8);

    let recommendation = recommend(score);
    assert_eq!(recommendation, CareRecommendation::MemoryCare);

    let band = band_profile(recommendation);
    assert_eq!(band.title, "Memory Care");

    let candidates = vec![
        community("al-1", &["Assisted Living"], Some(4.9)),
        community("mc-1", &["Memory Care"], Some(4.2)),
        community("mc-2", &["Assisted Living", "Memory Care"], Some(4.7)),
        community("il-1", &["Independent Living"], None),
    ];

    let matcher = Matcher::with_default_weights();
    let result = matcher.match_communities(recommendation, Some(&answers), candidates, 3);

    // Only the two memory care communities survive the hard filter
    assert_eq!(result.matches.len(), 2);
    assert_eq!(result.total_candidates, 4);
    assert!(result
        .matches
        .iter()
        .all(|m| m.community.offers_memory_care()));

    // Higher rated memory care community ranks first
    assert_eq!(result.matches[0].community.id, "mc-2");

    // Every match carries a justification
    for m in &result.matches {
        assert!(!m.reasons.is_empty() && m.reasons.len() <= 2);
        assert_eq!(m.reasons[0], "Specialized memory care program");
    }
}

#[test]
fn test_top_three_truncation_with_large_pool() {
    let matcher = Matcher::with_default_weights();
    let candidates: Vec<Community> = (0..10)
        .map(|i| community(&format!("al-{}", i), &["Assisted Living"], Some(4.0)))
        .collect();

    let result = matcher.match_communities(
        CareRecommendation::AssistedLiving,
        Some(&HashMap::new()),
        candidates,
        3,
    );

    assert_eq!(result.matches.len(), 3);
    assert_eq!(result.total_candidates, 10);
}

#[test]
fn test_unknown_zip_does_not_break_ranking() {
    let index = ZipDistanceIndex::new();
    let c = community("a", &["Assisted Living"], None);

    // Invalid zip: distance is unavailable, not an error
    assert!(index.distance_to_community("00000", &c).is_none());

    // And the matcher still works on the same pool
    let matcher = Matcher::with_default_weights();
    let result = matcher.match_communities(
        CareRecommendation::AssistedLiving,
        Some(&HashMap::new()),
        vec![c],
        3,
    );
    assert_eq!(result.matches.len(), 1);
}

#[test]
fn test_sorted_distances_for_known_zip() {
    let index = ZipDistanceIndex::new();

    let mut near = community("near", &["Assisted Living"], None);
    near.coordinates = Some(Coordinates { lat: 41.4824, lng: -81.7982 });
    let mut far = community("far", &["Assisted Living"], None);
    far.coordinates = Some(Coordinates { lat: 41.1765, lng: -81.4343 });
    let mut unknown = community("unknown", &["Assisted Living"], None);
    unknown.coordinates = None;

    let results = index.sort_by_distance(vec![far, unknown, near], "44102");

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].0.id, "near");
    assert_eq!(results[1].0.id, "far");
}

#[test]
fn test_mild_answers_recommend_assisted_living() {
    let mut answers: AssessmentAnswers = HashMap::new();
    answers.insert(
        "memory-concerns".to_string(),
        AnswerValue::Single("occasional".to_string()),
    );
    answers.insert(
        "daily-living".to_string(),
        AnswerValue::Single("some-help".to_string()),
    );

    let score = score_answers(&answers);
    assert_eq!(score, 2);
    assert_eq!(recommend(score), CareRecommendation::AssistedLiving);
}

#[tokio::test]
async fn test_directory_client_fetches_and_normalizes() {
    let mut server = mockito::Server::new_async().await;

    let body = serde_json::json!({
        "total": 3,
        "documents": [
            {
                "$id": "c1",
                "name": "Lakeside Manor",
                "careTypes": ["Memory Care"],
                "amenities": ["dining"],
                "rating": 4.5,
                "latitude": 41.48,
                "longitude": -81.80,
                "zip": "44107"
            },
            {
                "$id": "c2",
                "name": "Bare Minimum Commons"
            },
            {
                "name": "Missing Id Manor"
            }
        ]
    });

    let mock = server
        .mock(
            "GET",
            mockito::Matcher::Regex(r"^/databases/db/collections/communities/documents.*".to_string()),
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let client = DirectoryClient::new(
        server.url(),
        "test_key".to_string(),
        "test_project".to_string(),
        "db".to_string(),
        DirectoryCollections {
            communities: "communities".to_string(),
        },
    )
    .unwrap();

    let communities = client.list_communities(50).await.unwrap();

    mock.assert_async().await;

    // The malformed document is dropped, the sparse one is defaulted
    assert_eq!(communities.len(), 2);
    assert_eq!(communities[0].id, "c1");
    assert_eq!(communities[0].rating, Some(4.5));
    assert!(communities[1].care_types.is_empty());
    assert!(communities[1].rating.is_none());
}

#[tokio::test]
async fn test_directory_client_propagates_api_errors() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock(
            "GET",
            mockito::Matcher::Regex(r"^/databases/.*".to_string()),
        )
        .with_status(500)
        .create_async()
        .await;

    let client = DirectoryClient::new(
        server.url(),
        "test_key".to_string(),
        "test_project".to_string(),
        "db".to_string(),
        DirectoryCollections {
            communities: "communities".to_string(),
        },
    )
    .unwrap();

    assert!(client.list_communities(50).await.is_err());
}
