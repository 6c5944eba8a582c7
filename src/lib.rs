//! CareMatch - assessment scoring and community matching for a
//! senior-living directory
//!
//! The core answers "given a family's situation and location, which
//! senior-care communities should be recommended, in what order, and why":
//! a zip-to-coordinate distance index, a questionnaire scorer that maps
//! answers to a care-level recommendation, and a community matcher that
//! filters and ranks the candidate pool.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    band_profile, distance_miles, recommend, score_answers, Matcher, ZipDistanceIndex,
};
pub use crate::models::{
    AssessmentAnswers, CareRecommendation, Community, MatchedCommunity, RankWeights,
    RecommendationBand,
};
