use crate::models::domain::{Community, MatchedCommunity, RecommendationBand};
use serde::{Deserialize, Serialize};

/// Response for the evaluate endpoint: score, band, and top matches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateResponse {
    pub score: i32,
    pub recommendation: RecommendationBand,
    pub matches: Vec<MatchedCommunity>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Response for the explicit match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCommunitiesResponse {
    pub matches: Vec<MatchedCommunity>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// A community with its distance from the queried zip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyCommunity {
    #[serde(flatten)]
    pub community: Community,
    #[serde(rename = "distanceMiles")]
    pub distance_miles: f64,
}

/// Response for the nearby-communities endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyResponse {
    pub zip: String,
    pub communities: Vec<NearbyCommunity>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
