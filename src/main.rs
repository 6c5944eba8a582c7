mod config;
mod core;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use crate::config::Settings;
use crate::core::{Matcher, ZipDistanceIndex, DEFAULT_MATCH_LIMIT};
use crate::models::RankWeights;
use crate::routes::assessment::AppState;
use crate::services::{DirectoryClient, DirectoryCollections, LeadStore, SessionStore};
use std::sync::Arc;
use tracing::{error, info};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST),
        )
        .content_type("application/json")
        .body(serde_json::to_string(self).unwrap_or_default())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(
    err: error::JsonPayloadError,
    req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(
    err: error::QueryPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting CareMatch matching service...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Initialize the content directory client
    let collections = DirectoryCollections {
        communities: settings.collection.communities,
    };

    let directory = Arc::new(
        DirectoryClient::new(
            settings.directory.endpoint,
            settings.directory.api_key,
            settings.directory.project_id,
            settings.directory.database_id,
            collections,
        )
        .unwrap_or_else(|e| {
            error!("Failed to create directory client: {}", e);
            panic!("Directory client error: {}", e);
        }),
    );

    info!("Directory client initialized");

    // Initialize the session store
    let session_ttl = settings.cache.session_ttl_secs.unwrap_or(1800);
    let l1_cache_size = settings.cache.l1_cache_size.unwrap_or(1000);

    let sessions = match SessionStore::new(
        &settings.cache.redis_url,
        l1_cache_size,
        session_ttl,
    )
    .await
    {
        Ok(s) => {
            info!(
                "Session store initialized (L1: {} entries, TTL: {}s)",
                l1_cache_size, session_ttl
            );
            Arc::new(s)
        }
        Err(e) => {
            error!("Failed to connect to Redis ({}), cannot continue", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                "Redis connection required",
            ));
        }
    };

    // Initialize the lead store
    let leads = Arc::new(
        LeadStore::from_settings(
            &settings.database.url,
            settings.database.max_connections,
            settings.database.min_connections,
        )
        .await
        .unwrap_or_else(|e| {
            error!("Failed to connect to PostgreSQL: {}", e);
            panic!("PostgreSQL connection error: {}", e);
        }),
    );

    info!("Lead store initialized");

    // Initialize matcher with configured weights
    let weights = RankWeights {
        primary_care_type: settings.ranking.weights.primary_care_type,
        memory_care_preference: settings.ranking.weights.memory_care_preference,
        amenity: settings.ranking.weights.amenity,
        location_presence: settings.ranking.weights.location_presence,
        rating: settings.ranking.weights.rating,
    };

    let matcher = Matcher::new(weights);

    info!("Matcher initialized with weights: {:?}", weights);

    let zip_index = Arc::new(ZipDistanceIndex::new());

    // Build application state
    let app_state = AppState {
        directory,
        leads,
        sessions,
        matcher,
        zip_index,
        max_limit: settings.matching.max_limit.unwrap_or(DEFAULT_MATCH_LIMIT * 4),
        candidate_pool_size: settings.matching.candidate_pool_size.unwrap_or(200),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
