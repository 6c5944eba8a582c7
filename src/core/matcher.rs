use crate::core::filters::{eligible_for_band, extract_preferences, has_primary_care_type};
use crate::models::{
    AssessmentAnswers, CareRecommendation, Community, MatchedCommunity, PreferenceFlags,
    RankWeights,
};

/// Default number of communities returned per match request
pub const DEFAULT_MATCH_LIMIT: usize = 3;

/// At most this many justification phrases per result
const MAX_REASONS: usize = 2;

/// Amenity count above which a community is called out for its amenities
const AMENITY_RICH_THRESHOLD: usize = 5;

/// Result of one matching request
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<MatchedCommunity>,
    pub total_candidates: usize,
}

/// Community matching orchestrator
///
/// # Pipeline
/// 1. Hard filter by the recommendation's care type rules
/// 2. Rank: preference-weighted when raw answers are available, otherwise a
///    stable default ordering
/// 3. Truncate to the requested limit
/// 4. Attach justification phrases
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: RankWeights,
}

impl Matcher {
    pub fn new(weights: RankWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: RankWeights::default(),
        }
    }

    /// Filter and rank candidates for a recommendation
    ///
    /// `answers` enables preference-weighted ranking; without it the
    /// candidate order is preserved apart from a stable memory-care-first
    /// partition for the memory care band. Sorting is stable throughout, so
    /// ties keep candidate order.
    pub fn match_communities(
        &self,
        recommendation: CareRecommendation,
        answers: Option<&AssessmentAnswers>,
        candidates: Vec<Community>,
        limit: usize,
    ) -> MatchResult {
        let total_candidates = candidates.len();

        let mut eligible: Vec<Community> = candidates
            .into_iter()
            .filter(|c| eligible_for_band(c, recommendation))
            .collect();

        let preferences = answers.map(extract_preferences);

        match preferences {
            Some(flags) => {
                let mut scored: Vec<(Community, f64)> = eligible
                    .into_iter()
                    .map(|c| {
                        let score = self.rank_score(&c, recommendation, flags);
                        (c, score)
                    })
                    .collect();

                scored.sort_by(|a, b| {
                    b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal)
                });
                scored.truncate(limit);

                let matches = scored
                    .into_iter()
                    .map(|(community, rank_score)| {
                        let reasons = justification(&community, recommendation, flags);
                        MatchedCommunity {
                            community,
                            rank_score,
                            distance_miles: None,
                            reasons,
                        }
                    })
                    .collect();

                MatchResult {
                    matches,
                    total_candidates,
                }
            }
            None => {
                if recommendation == CareRecommendation::MemoryCare {
                    eligible = partition_memory_care_first(eligible);
                }
                eligible.truncate(limit);

                let flags = PreferenceFlags::default();
                let matches = eligible
                    .into_iter()
                    .map(|community| {
                        let reasons = justification(&community, recommendation, flags);
                        MatchedCommunity {
                            community,
                            rank_score: 0.0,
                            distance_miles: None,
                            reasons,
                        }
                    })
                    .collect();

                MatchResult {
                    matches,
                    total_candidates,
                }
            }
        }
    }

    /// Additive ranking signals; missing data (no rating, no coordinates)
    /// contributes nothing rather than penalizing
    fn rank_score(
        &self,
        community: &Community,
        recommendation: CareRecommendation,
        preferences: PreferenceFlags,
    ) -> f64 {
        let w = &self.weights;
        let mut score = 0.0;

        if has_primary_care_type(community, recommendation) {
            score += w.primary_care_type;
        }

        if preferences.prioritize_memory_care && community.offers_memory_care() {
            score += w.memory_care_preference;
        }

        if preferences.prioritize_amenities {
            score += w.amenity * community.amenities.len() as f64;
        }

        // Presence of coordinates, not actual proximity. True distance
        // ranking lives in ZipDistanceIndex and is surfaced separately.
        if preferences.prioritize_location && community.coordinates.is_some() {
            score += w.location_presence;
        }

        if let Some(rating) = community.rating {
            score += w.rating * rating;
        }

        score
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Stable partition: memory care communities first, candidate order
/// preserved within each half
fn partition_memory_care_first(communities: Vec<Community>) -> Vec<Community> {
    let (mut with_mc, without_mc): (Vec<Community>, Vec<Community>) = communities
        .into_iter()
        .partition(|c| c.offers_memory_care());
    with_mc.extend(without_mc);
    with_mc
}

/// Up to two short phrases explaining why a community was returned
fn justification(
    community: &Community,
    recommendation: CareRecommendation,
    preferences: PreferenceFlags,
) -> Vec<String> {
    let mut reasons = Vec::new();

    if recommendation == CareRecommendation::MemoryCare && community.offers_memory_care() {
        reasons.push("Specialized memory care program".to_string());
    }

    if community.amenities.len() > AMENITY_RICH_THRESHOLD {
        reasons.push("Excellent amenities and services".to_string());
    }

    if preferences.prioritize_activities {
        reasons.push("Robust activity programs".to_string());
    }

    if preferences.prioritize_location && community.coordinates.is_some() {
        reasons.push("Convenient location in Greater Cleveland".to_string());
    }

    if reasons.is_empty() {
        reasons.push("Highly rated community".to_string());
        reasons.push("Strong care programs".to_string());
    }

    reasons.truncate(MAX_REASONS);
    reasons
}
