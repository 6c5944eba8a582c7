use crate::models::{Community, Coordinates};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with the content directory
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Content directory API client
///
/// The community catalog lives in a managed backend-as-a-service. This
/// client fetches candidate communities and normalizes the loosely-typed
/// documents at the boundary: missing amenities become an empty list,
/// missing ratings and coordinates become `None`. The matching core never
/// sees a partial record.
pub struct DirectoryClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: DirectoryCollections,
}

/// Collection IDs in the directory backend
#[derive(Debug, Clone)]
pub struct DirectoryCollections {
    pub communities: String,
}

impl DirectoryClient {
    /// Create a new directory client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: DirectoryCollections,
    ) -> Result<Self, DirectoryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
        })
    }

    /// Fetch the community candidate pool
    ///
    /// Documents that can't be normalized (missing id or name) are dropped
    /// with a warning rather than failing the whole fetch.
    pub async fn list_communities(&self, limit: usize) -> Result<Vec<Community>, DirectoryError> {
        let queries = vec![format!("limit({})", limit)];
        let queries_json = serde_json::to_string(&queries)
            .map_err(|e| DirectoryError::InvalidResponse(e.to_string()))?;
        let encoded_queries = urlencoding::encode(&queries_json);

        let url = format!(
            "{}/databases/{}/collections/{}/documents?query={}",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.collections.communities,
            encoded_queries
        );

        tracing::debug!("Fetching communities from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DirectoryError::ApiError(format!(
                "Failed to fetch communities: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| DirectoryError::InvalidResponse("Missing documents array".into()))?;

        let communities: Vec<Community> = documents
            .iter()
            .filter_map(|doc| {
                let data = doc.get("data").unwrap_or(doc);
                match normalize_community(data) {
                    Some(c) => Some(c),
                    None => {
                        tracing::warn!("Skipping community document without id/name");
                        None
                    }
                }
            })
            .collect();

        tracing::debug!("Fetched {} communities", communities.len());

        Ok(communities)
    }

    /// Get a single community by document ID
    pub async fn get_community(&self, id: &str) -> Result<Community, DirectoryError> {
        let url = format!(
            "{}/databases/{}/collections/{}/documents/{}",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.collections.communities,
            id
        );

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DirectoryError::NotFound(format!("Community {}", id)));
        }

        if !response.status().is_success() {
            return Err(DirectoryError::ApiError(format!(
                "Failed to fetch community {}: {}",
                id,
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        let data = json.get("data").unwrap_or(&json);

        normalize_community(data)
            .ok_or_else(|| DirectoryError::InvalidResponse(format!("Malformed community {}", id)))
    }
}

/// Normalize one directory document into a typed `Community`
///
/// `id` and `name` are required; everything else defaults. Ratings outside
/// 0..=5 are treated as absent.
fn normalize_community(data: &Value) -> Option<Community> {
    let id = data
        .get("$id")
        .or_else(|| data.get("id"))
        .and_then(|v| v.as_str())?
        .to_string();
    let name = data.get("name").and_then(|v| v.as_str())?.to_string();

    let care_types = string_array(data.get("careTypes"));
    let amenities = string_array(data.get("amenities"));

    let rating = data
        .get("rating")
        .and_then(|v| v.as_f64())
        .filter(|r| (0.0..=5.0).contains(r));

    let coordinates = match (
        data.get("latitude").and_then(|v| v.as_f64()),
        data.get("longitude").and_then(|v| v.as_f64()),
    ) {
        (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
        _ => data
            .get("coordinates")
            .and_then(|v| serde_json::from_value(v.clone()).ok()),
    };

    let zip = data
        .get("zip")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    Some(Community {
        id,
        name,
        care_types,
        amenities,
        rating,
        coordinates,
        zip,
    })
}

fn string_array(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|i| i.as_str().map(|s| s.to_string()))
                .collect()
        })
        .unwrap_or_default()
}
