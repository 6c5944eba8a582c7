// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AnswerValue, AssessmentAnswers, AssessmentOption, AssessmentQuestion, AssessmentSession,
    CareRecommendation, Community, Coordinates, MatchedCommunity, PreferenceFlags, QuestionKind,
    RankWeights, RecommendationBand, ASSISTED_LIVING, MEMORY_CARE,
};
pub use requests::{EvaluateRequest, LeadContact, MatchCommunitiesRequest, NearbyQuery};
pub use responses::{
    ErrorResponse, EvaluateResponse, HealthResponse, MatchCommunitiesResponse, NearbyCommunity,
    NearbyResponse,
};
