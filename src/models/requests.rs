use crate::models::{AssessmentAnswers, CareRecommendation};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Contact details submitted with a completed assessment; when present, the
/// evaluation is recorded as a lead
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LeadContact {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Request to evaluate an assessment and match communities
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EvaluateRequest {
    #[serde(default)]
    pub answers: AssessmentAnswers,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    #[validate(nested)]
    pub contact: Option<LeadContact>,
    #[serde(rename = "sessionId", default)]
    pub session_id: Option<String>,
}

/// Request to match communities against an explicit recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCommunitiesRequest {
    pub recommendation: CareRecommendation,
    #[serde(default)]
    pub answers: Option<AssessmentAnswers>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// Query parameters for the nearby-communities endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct NearbyQuery {
    pub zip: String,
    #[serde(rename = "maxMiles", default = "default_max_miles")]
    pub max_miles: f64,
    #[serde(default = "default_nearby_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    crate::core::DEFAULT_MATCH_LIMIT
}

fn default_max_miles() -> f64 {
    25.0
}

fn default_nearby_limit() -> usize {
    10
}
