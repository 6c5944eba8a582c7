// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod questions;
pub mod scoring;

pub use distance::{distance_miles, ZipDistanceIndex};
pub use filters::{eligible_for_band, extract_preferences, has_primary_care_type};
pub use matcher::{MatchResult, Matcher, DEFAULT_MATCH_LIMIT};
pub use questions::{question_by_id, questions, PRIORITIES_QUESTION_ID};
pub use scoring::{band_profile, recommend, score_answers};
