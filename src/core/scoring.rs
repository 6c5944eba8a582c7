use crate::core::questions::questions;
use crate::models::{
    AnswerValue, AssessmentAnswers, AssessmentQuestion, CareRecommendation, QuestionKind,
    RecommendationBand,
};

/// Total score at or above this recommends dedicated memory care
pub const MEMORY_CARE_THRESHOLD: i32 = 7;

/// Total score at or above this (but below the memory care threshold)
/// recommends considering both care levels
pub const COMBINED_CARE_THRESHOLD: i32 = 3;

/// Sum the point values of the selected options across the questionnaire
///
/// Pure accumulation: unanswered questions and option values that don't
/// exist in the question definition contribute 0. The latter is deliberate
/// leniency so a stale client with outdated option lists degrades instead
/// of erroring.
pub fn score_answers(answers: &AssessmentAnswers) -> i32 {
    questions()
        .iter()
        .map(|q| question_points(q, answers.get(q.id)))
        .sum()
}

fn question_points(question: &AssessmentQuestion, answer: Option<&AnswerValue>) -> i32 {
    let Some(answer) = answer else {
        return 0;
    };

    match (question.kind, answer) {
        (QuestionKind::Single, AnswerValue::Single(value)) => option_points(question, value),
        (QuestionKind::Multiple, AnswerValue::Multiple(values)) => values
            .iter()
            .map(|value| option_points(question, value))
            .sum(),
        // Shape drift from stale clients: take what we can, drop the rest
        (QuestionKind::Single, AnswerValue::Multiple(values)) => values
            .first()
            .map(|value| option_points(question, value))
            .unwrap_or(0),
        (QuestionKind::Multiple, AnswerValue::Single(value)) => option_points(question, value),
    }
}

#[inline]
fn option_points(question: &AssessmentQuestion, value: &str) -> i32 {
    question
        .options
        .iter()
        .find(|o| o.value == value)
        .map(|o| o.points)
        .unwrap_or(0)
}

/// Map a total score onto a care recommendation
///
/// Boundaries: 7 is the memory care floor, 3 is the floor for considering
/// both levels, anything below is assisted living. Score 0 (including an
/// empty assessment) lands on assisted living by design.
pub fn recommend(score: i32) -> CareRecommendation {
    if score >= MEMORY_CARE_THRESHOLD {
        CareRecommendation::MemoryCare
    } else if score >= COMBINED_CARE_THRESHOLD {
        CareRecommendation::Both
    } else {
        CareRecommendation::AssistedLiving
    }
}

/// Display package for a recommendation, suitable for direct rendering
pub fn band_profile(recommendation: CareRecommendation) -> RecommendationBand {
    match recommendation {
        CareRecommendation::AssistedLiving => RecommendationBand {
            recommendation,
            title: "Assisted Living".to_string(),
            description: "Support with daily activities in a residential setting while \
                          maintaining as much independence as possible."
                .to_string(),
            cost_range: "$3,500 - $5,200 per month".to_string(),
            reasons: vec![
                "Daily living support without intensive memory care".to_string(),
                "Social environment with activities and dining".to_string(),
                "Flexibility to add services as needs change".to_string(),
            ],
        },
        CareRecommendation::MemoryCare => RecommendationBand {
            recommendation,
            title: "Memory Care".to_string(),
            description: "A secured neighborhood with staff trained in dementia care and \
                          programming built around cognitive support."
                .to_string(),
            cost_range: "$5,500 - $7,500 per month".to_string(),
            reasons: vec![
                "Secured environment reduces wandering risk".to_string(),
                "Staff trained specifically in dementia and Alzheimer's care".to_string(),
                "Structured daily routines designed for cognitive support".to_string(),
            ],
        },
        CareRecommendation::Both => RecommendationBand {
            recommendation,
            title: "Assisted Living or Memory Care".to_string(),
            description: "Needs fall between care levels; touring communities that offer \
                          both makes it easier to transition later without moving again."
                .to_string(),
            cost_range: "$4,000 - $7,000 per month".to_string(),
            reasons: vec![
                "Current needs may be met by assisted living".to_string(),
                "Early memory concerns suggest planning for memory care".to_string(),
                "Communities offering both levels avoid a second move".to_string(),
            ],
        },
    }
}
