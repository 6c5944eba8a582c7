use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Care type labels as they appear in the content directory
pub const MEMORY_CARE: &str = "Memory Care";
pub const ASSISTED_LIVING: &str = "Assisted Living";

/// Geographic coordinates (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Community record from the content directory
///
/// Only `id`, `name`, and `care_types` are guaranteed by the directory;
/// everything else defaults when absent so the matching core never has to
/// deal with partial records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Community {
    pub id: String,
    pub name: String,
    #[serde(rename = "careTypes", default)]
    pub care_types: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub zip: Option<String>,
}

impl Community {
    pub fn has_care_type(&self, care_type: &str) -> bool {
        self.care_types.iter().any(|c| c == care_type)
    }

    pub fn offers_memory_care(&self) -> bool {
        self.has_care_type(MEMORY_CARE)
    }

    pub fn offers_assisted_living(&self) -> bool {
        self.has_care_type(ASSISTED_LIVING)
    }
}

/// A submitted answer: one option value for single-select questions, a set
/// of option values for multi-select questions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Single(String),
    Multiple(Vec<String>),
}

/// Question id -> selected option value(s). Missing keys mean unanswered.
pub type AssessmentAnswers = HashMap<String, AnswerValue>;

/// Whether a question accepts one option or several
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Single,
    Multiple,
}

/// One selectable option in the assessment, with its point contribution
#[derive(Debug, Clone)]
pub struct AssessmentOption {
    pub value: &'static str,
    pub label: &'static str,
    pub points: i32,
    pub description: Option<&'static str>,
}

/// Fixed assessment question definition
#[derive(Debug, Clone)]
pub struct AssessmentQuestion {
    pub id: &'static str,
    pub kind: QuestionKind,
    pub prompt: &'static str,
    pub options: Vec<AssessmentOption>,
}

/// Discrete care recommendation derived from the assessment score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CareRecommendation {
    AssistedLiving,
    MemoryCare,
    Both,
}

/// Display package for a recommendation band
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationBand {
    pub recommendation: CareRecommendation,
    pub title: String,
    pub description: String,
    #[serde(rename = "costRange")]
    pub cost_range: String,
    pub reasons: Vec<String>,
}

/// Ranking preference flags derived from the `community-priorities` answer
///
/// The source answer is single-select, so at most one flag is set at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreferenceFlags {
    pub prioritize_memory_care: bool,
    pub prioritize_amenities: bool,
    pub prioritize_location: bool,
    pub prioritize_activities: bool,
    pub prioritize_value: bool,
}

/// Ranking weights
///
/// Signals are additive and deliberately unnormalized; these are tuning
/// knobs, not a calibrated model.
#[derive(Debug, Clone, Copy)]
pub struct RankWeights {
    /// Community offers the band's primary care type
    pub primary_care_type: f64,
    /// Memory-care preference flag set and community offers it
    pub memory_care_preference: f64,
    /// Per-amenity bonus under the amenities flag
    pub amenity: f64,
    /// Coordinates present under the location flag
    pub location_presence: f64,
    /// Multiplier on the community's star rating
    pub rating: f64,
}

impl Default for RankWeights {
    fn default() -> Self {
        Self {
            primary_care_type: 100.0,
            memory_care_preference: 50.0,
            amenity: 2.0,
            location_presence: 20.0,
            rating: 10.0,
        }
    }
}

/// A ranked community with its justification, ephemeral per request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedCommunity {
    #[serde(flatten)]
    pub community: Community,
    #[serde(rename = "rankScore")]
    pub rank_score: f64,
    #[serde(rename = "distanceMiles")]
    pub distance_miles: Option<f64>,
    pub reasons: Vec<String>,
}

/// Caller-owned assessment progress, persisted by the session store
///
/// The core stays stateless; this is the explicit replacement for the
/// client-side store the web frontend kept in localStorage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentSession {
    #[serde(rename = "currentQuestionIndex")]
    pub current_question_index: usize,
    #[serde(default)]
    pub answers: AssessmentAnswers,
    #[serde(rename = "isComplete", default)]
    pub is_complete: bool,
    #[serde(default)]
    pub score: Option<i32>,
    #[serde(default)]
    pub recommendation: Option<CareRecommendation>,
}
