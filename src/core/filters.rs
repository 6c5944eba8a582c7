use crate::core::questions::PRIORITIES_QUESTION_ID;
use crate::models::{AnswerValue, AssessmentAnswers, CareRecommendation, Community, PreferenceFlags};

/// Hard filter: does a community belong in the candidate set for this
/// recommendation?
///
/// The assisted living band deliberately excludes communities that also
/// offer memory care, steering residents without memory care needs toward
/// generalist listings.
#[inline]
pub fn eligible_for_band(community: &Community, recommendation: CareRecommendation) -> bool {
    match recommendation {
        CareRecommendation::MemoryCare => community.offers_memory_care(),
        CareRecommendation::AssistedLiving => {
            community.offers_assisted_living() && !community.offers_memory_care()
        }
        CareRecommendation::Both => {
            community.offers_memory_care() || community.offers_assisted_living()
        }
    }
}

/// Does the community offer the band's primary care type?
///
/// Used for the dominant ranking bonus; for the combined band either type
/// counts.
#[inline]
pub fn has_primary_care_type(community: &Community, recommendation: CareRecommendation) -> bool {
    match recommendation {
        CareRecommendation::MemoryCare => community.offers_memory_care(),
        CareRecommendation::AssistedLiving => community.offers_assisted_living(),
        CareRecommendation::Both => {
            community.offers_memory_care() || community.offers_assisted_living()
        }
    }
}

/// Derive ranking preference flags from the priorities answer
///
/// The priorities question is single-select, so at most one flag comes back
/// set. Unknown or missing answers yield all-false flags.
pub fn extract_preferences(answers: &AssessmentAnswers) -> PreferenceFlags {
    let mut flags = PreferenceFlags::default();

    let Some(AnswerValue::Single(value)) = answers.get(PRIORITIES_QUESTION_ID) else {
        return flags;
    };

    match value.as_str() {
        "memory-care-programs" => flags.prioritize_memory_care = true,
        "amenities" => flags.prioritize_amenities = true,
        "location" => flags.prioritize_location = true,
        "activities" => flags.prioritize_activities = true,
        "value" => flags.prioritize_value = true,
        _ => {}
    }

    flags
}
