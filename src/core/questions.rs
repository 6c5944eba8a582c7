use crate::models::{AssessmentOption, AssessmentQuestion, QuestionKind};
use std::sync::OnceLock;

/// Question id whose answer drives ranking preference flags
pub const PRIORITIES_QUESTION_ID: &str = "community-priorities";

/// The fixed assessment questionnaire, built once per process
///
/// Point values feed the care-level thresholds in `scoring`; the priorities
/// question carries no points and only influences ranking.
pub fn questions() -> &'static [AssessmentQuestion] {
    static QUESTIONS: OnceLock<Vec<AssessmentQuestion>> = OnceLock::new();
    QUESTIONS.get_or_init(build_questions)
}

/// Look up a question definition by id
pub fn question_by_id(id: &str) -> Option<&'static AssessmentQuestion> {
    questions().iter().find(|q| q.id == id)
}

fn build_questions() -> Vec<AssessmentQuestion> {
    vec![
        AssessmentQuestion {
            id: "memory-concerns",
            kind: QuestionKind::Single,
            prompt: "How often does your loved one experience memory loss or confusion?",
            options: vec![
                option("none", "Rarely or never", 0, None),
                option("occasional", "Occasionally forgets names or appointments", 1, None),
                option(
                    "frequent",
                    "Frequently confused about time, place, or familiar people",
                    3,
                    None,
                ),
                option(
                    "diagnosed",
                    "Diagnosed with dementia or Alzheimer's",
                    5,
                    Some("A physician has made a formal diagnosis"),
                ),
            ],
        },
        AssessmentQuestion {
            id: "daily-living",
            kind: QuestionKind::Single,
            prompt: "How much help is needed with daily activities like bathing, dressing, or meals?",
            options: vec![
                option("independent", "Fully independent", 0, None),
                option("some-help", "Needs occasional reminders or light help", 1, None),
                option("regular-help", "Needs regular hands-on assistance", 2, None),
                option("full-support", "Needs help with most daily activities", 3, None),
            ],
        },
        AssessmentQuestion {
            id: "safety-concerns",
            kind: QuestionKind::Multiple,
            prompt: "Which of these safety concerns apply? Select all that apply.",
            options: vec![
                option(
                    "wandering",
                    "Wandering or getting lost",
                    3,
                    Some("A strong indicator that a secured environment is needed"),
                ),
                option("falls", "Recent falls or balance problems", 1, None),
                option("medication", "Trouble managing medications", 1, None),
                option("isolation", "Social isolation or loneliness", 1, None),
            ],
        },
        AssessmentQuestion {
            id: "caregiver-strain",
            kind: QuestionKind::Single,
            prompt: "How is the current caregiving arrangement working?",
            options: vec![
                option("manageable", "Manageable for now", 0, None),
                option("stretched", "Getting difficult to sustain", 1, None),
                option("overwhelmed", "Overwhelming, help is needed soon", 2, None),
            ],
        },
        AssessmentQuestion {
            id: PRIORITIES_QUESTION_ID,
            kind: QuestionKind::Single,
            prompt: "What matters most when choosing a community?",
            options: vec![
                option("memory-care-programs", "Specialized memory care programs", 0, None),
                option("amenities", "Amenities and services", 0, None),
                option("location", "Location close to family", 0, None),
                option("activities", "Activities and social life", 0, None),
                option("value", "Overall value and cost", 0, None),
            ],
        },
    ]
}

fn option(
    value: &'static str,
    label: &'static str,
    points: i32,
    description: Option<&'static str>,
) -> AssessmentOption {
    AssessmentOption {
        value,
        label,
        points,
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_questionnaire_shape() {
        let qs = questions();
        assert_eq!(qs.len(), 5);
        assert!(qs.iter().all(|q| !q.options.is_empty()));
    }

    #[test]
    fn test_no_negative_points() {
        for q in questions() {
            for o in &q.options {
                assert!(o.points >= 0, "option {} has negative points", o.value);
            }
        }
    }

    #[test]
    fn test_priorities_question_is_neutral() {
        let q = question_by_id(PRIORITIES_QUESTION_ID).unwrap();
        assert!(q.options.iter().all(|o| o.points == 0));
    }

    #[test]
    fn test_question_lookup() {
        assert!(question_by_id("memory-concerns").is_some());
        assert!(question_by_id("does-not-exist").is_none());
    }
}
