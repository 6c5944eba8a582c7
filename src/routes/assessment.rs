use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{band_profile, recommend, score_answers, Matcher, ZipDistanceIndex};
use crate::models::{
    AssessmentSession, ErrorResponse, EvaluateRequest, EvaluateResponse, HealthResponse,
    MatchCommunitiesRequest, MatchCommunitiesResponse, MatchedCommunity, NearbyCommunity,
    NearbyQuery, NearbyResponse,
};
use crate::services::{DirectoryClient, LeadStore, SessionStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<DirectoryClient>,
    pub leads: Arc<LeadStore>,
    pub sessions: Arc<SessionStore>,
    pub matcher: Matcher,
    pub zip_index: Arc<ZipDistanceIndex>,
    pub max_limit: usize,
    pub candidate_pool_size: usize,
}

/// Configure all assessment-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/assessment/evaluate", web::post().to(evaluate))
        .route("/communities/match", web::post().to(match_communities))
        .route("/communities/nearby", web::get().to(nearby_communities))
        .route("/assessment/session/{id}", web::put().to(save_session))
        .route("/assessment/session/{id}", web::get().to(load_session))
        .route("/assessment/session/{id}", web::delete().to(clear_session));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = state.leads.health_check().await.unwrap_or(false);

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Evaluate an assessment and return the recommendation plus top matches
///
/// POST /api/v1/assessment/evaluate
///
/// Request body:
/// ```json
/// {
///   "answers": { "memory-concerns": "frequent", "safety-concerns": ["falls"] },
///   "zip": "44107",
///   "limit": 3,
///   "contact": { "name": "...", "email": "..." },
///   "sessionId": "..."
/// }
/// ```
async fn evaluate(
    state: web::Data<AppState>,
    req: web::Json<EvaluateRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for evaluate request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let score = score_answers(&req.answers);
    let recommendation = recommend(score);
    let band = band_profile(recommendation);
    let limit = req.limit.min(state.max_limit);

    tracing::info!(
        "Assessment scored {} -> {:?}, matching up to {} communities",
        score,
        recommendation,
        limit
    );

    let candidates = match state
        .directory
        .list_communities(state.candidate_pool_size)
        .await
    {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to fetch candidate communities: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch communities".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let result =
        state
            .matcher
            .match_communities(recommendation, Some(&req.answers), candidates, limit);

    let matches = attach_distances(result.matches, req.zip.as_deref(), &state.zip_index);

    // Lead capture is best-effort: the visitor still gets their results if
    // the write fails
    if let Some(contact) = &req.contact {
        if let Err(e) = state
            .leads
            .record_lead(
                &contact.name,
                &contact.email,
                contact.phone.as_deref(),
                req.zip.as_deref(),
                score,
                recommendation,
            )
            .await
        {
            tracing::warn!("Failed to record lead: {}", e);
        }
    }

    // Same for the session result snapshot
    if let Some(session_id) = &req.session_id {
        let session = AssessmentSession {
            current_question_index: crate::core::questions().len(),
            answers: req.answers.clone(),
            is_complete: true,
            score: Some(score),
            recommendation: Some(recommendation),
        };
        if let Err(e) = state.sessions.save(session_id, &session).await {
            tracing::warn!("Failed to save session {}: {}", session_id, e);
        }
    }

    tracing::info!(
        "Returning {} matches (from {} candidates)",
        matches.len(),
        result.total_candidates
    );

    HttpResponse::Ok().json(EvaluateResponse {
        score,
        recommendation: band,
        matches,
        total_candidates: result.total_candidates,
    })
}

/// Match communities against an explicit recommendation
///
/// POST /api/v1/communities/match
async fn match_communities(
    state: web::Data<AppState>,
    req: web::Json<MatchCommunitiesRequest>,
) -> impl Responder {
    let limit = req.limit.min(state.max_limit);

    let candidates = match state
        .directory
        .list_communities(state.candidate_pool_size)
        .await
    {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to fetch candidate communities: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch communities".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let result =
        state
            .matcher
            .match_communities(req.recommendation, req.answers.as_ref(), candidates, limit);

    let matches = attach_distances(result.matches, req.zip.as_deref(), &state.zip_index);

    HttpResponse::Ok().json(MatchCommunitiesResponse {
        matches,
        total_candidates: result.total_candidates,
    })
}

/// Distance-sorted communities around a zip
///
/// GET /api/v1/communities/nearby?zip=44107&maxMiles=25&limit=10
///
/// An unknown or unmapped zip yields an empty list, not an error; distance
/// data simply isn't available for it.
async fn nearby_communities(
    state: web::Data<AppState>,
    query: web::Query<NearbyQuery>,
) -> impl Responder {
    let candidates = match state
        .directory
        .list_communities(state.candidate_pool_size)
        .await
    {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to fetch candidate communities: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch communities".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let results = state
        .zip_index
        .nearby(candidates, &query.zip, query.max_miles, query.limit);

    let communities = results
        .into_iter()
        .map(|(community, distance_miles)| NearbyCommunity {
            community,
            distance_miles,
        })
        .collect();

    HttpResponse::Ok().json(NearbyResponse {
        zip: query.zip.clone(),
        communities,
    })
}

/// Save assessment progress
///
/// PUT /api/v1/assessment/session/{id}
async fn save_session(
    state: web::Data<AppState>,
    path: web::Path<String>,
    session: web::Json<AssessmentSession>,
) -> impl Responder {
    let session_id = path.into_inner();

    match state.sessions.save(&session_id, &session).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "saved": true })),
        Err(e) => {
            tracing::error!("Failed to save session {}: {}", session_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to save session".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Load assessment progress
///
/// GET /api/v1/assessment/session/{id}
async fn load_session(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let session_id = path.into_inner();

    match state.sessions.load(&session_id).await {
        Ok(Some(session)) => HttpResponse::Ok().json(session),
        Ok(None) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Session not found".to_string(),
            message: format!("No session with id {}", session_id),
            status_code: 404,
        }),
        Err(e) => {
            tracing::error!("Failed to load session {}: {}", session_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load session".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Clear assessment progress
///
/// DELETE /api/v1/assessment/session/{id}
async fn clear_session(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let session_id = path.into_inner();

    match state.sessions.clear(&session_id).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "cleared": true })),
        Err(e) => {
            tracing::error!("Failed to clear session {}: {}", session_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to clear session".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Fill in distances for matched communities when the requester supplied a
/// zip; missing distance data stays `None` and never reorders results
fn attach_distances(
    mut matches: Vec<MatchedCommunity>,
    zip: Option<&str>,
    index: &ZipDistanceIndex,
) -> Vec<MatchedCommunity> {
    if let Some(zip) = zip {
        for m in &mut matches {
            m.distance_miles = index.distance_to_community(zip, &m.community);
        }
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Community, Coordinates};

    fn matched(id: &str, coordinates: Option<Coordinates>) -> MatchedCommunity {
        MatchedCommunity {
            community: Community {
                id: id.to_string(),
                name: format!("Community {}", id),
                care_types: vec!["Assisted Living".to_string()],
                amenities: vec![],
                rating: None,
                coordinates,
                zip: None,
            },
            rank_score: 0.0,
            distance_miles: None,
            reasons: vec![],
        }
    }

    #[test]
    fn test_attach_distances_preserves_order() {
        let index = ZipDistanceIndex::new();
        let matches = vec![
            matched("far", Some(Coordinates { lat: 41.1765, lng: -81.4343 })),
            matched("near", Some(Coordinates { lat: 41.4824, lng: -81.7982 })),
            matched("none", None),
        ];

        let result = attach_distances(matches, Some("44102"), &index);

        let ids: Vec<&str> = result.iter().map(|m| m.community.id.as_str()).collect();
        assert_eq!(ids, vec!["far", "near", "none"]);
        assert!(result[0].distance_miles.unwrap() > result[1].distance_miles.unwrap());
        assert!(result[2].distance_miles.is_none());
    }

    #[test]
    fn test_attach_distances_unknown_zip_degrades() {
        let index = ZipDistanceIndex::new();
        let matches = vec![matched("a", Some(Coordinates { lat: 41.48, lng: -81.80 }))];

        let result = attach_distances(matches, Some("00000"), &index);
        assert!(result[0].distance_miles.is_none());
    }

    #[test]
    fn test_attach_distances_without_zip() {
        let index = ZipDistanceIndex::new();
        let matches = vec![matched("a", Some(Coordinates { lat: 41.48, lng: -81.80 }))];

        let result = attach_distances(matches, None, &index);
        assert!(result[0].distance_miles.is_none());
    }
}
