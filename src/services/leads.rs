use crate::models::CareRecommendation;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when interacting with the lead store
#[derive(Debug, Error)]
pub enum LeadStoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// A completed assessment captured as a sales lead
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentLead {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub zip: Option<String>,
    pub score: i32,
    pub recommendation: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// PostgreSQL store for assessment leads
///
/// The matching core persists nothing; this store is the durable side of
/// the lead-generation flow, written to after an evaluation when the
/// visitor left contact details.
pub struct LeadStore {
    pool: PgPool,
}

impl LeadStore {
    /// Create a new lead store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, LeadStoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new lead store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, LeadStoreError> {
        tracing::info!("Connecting to PostgreSQL lead store");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Record a completed assessment as a lead
    ///
    /// Re-submissions from the same email are kept as separate rows; the
    /// sales side wants the full history, not the latest state.
    pub async fn record_lead(
        &self,
        name: &str,
        email: &str,
        phone: Option<&str>,
        zip: Option<&str>,
        score: i32,
        recommendation: CareRecommendation,
    ) -> Result<Uuid, LeadStoreError> {
        if name.is_empty() || email.is_empty() {
            return Err(LeadStoreError::InvalidInput(
                "lead requires a name and email".to_string(),
            ));
        }

        let id = Uuid::new_v4();
        let recommendation_label = recommendation_label(recommendation);

        let query = r#"
            INSERT INTO assessment_leads (id, name, email, phone, zip, score, recommendation, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
        "#;

        sqlx::query(query)
            .bind(id)
            .bind(name)
            .bind(email)
            .bind(phone)
            .bind(zip)
            .bind(score)
            .bind(recommendation_label)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Recorded lead {} ({}, score {})", id, recommendation_label, score);

        Ok(id)
    }

    /// Most recent leads, newest first (admin/debugging)
    pub async fn recent_leads(&self, limit: usize) -> Result<Vec<AssessmentLead>, LeadStoreError> {
        let query = r#"
            SELECT id, name, email, phone, zip, score, recommendation, created_at
            FROM assessment_leads
            ORDER BY created_at DESC
            LIMIT $1
        "#;

        let rows = sqlx::query(query)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        let leads = rows
            .iter()
            .map(|row| AssessmentLead {
                id: row.get("id"),
                name: row.get("name"),
                email: row.get("email"),
                phone: row.get("phone"),
                zip: row.get("zip"),
                score: row.get("score"),
                recommendation: row.get("recommendation"),
                created_at: row.get("created_at"),
            })
            .collect();

        Ok(leads)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, LeadStoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn recommendation_label(recommendation: CareRecommendation) -> &'static str {
    match recommendation {
        CareRecommendation::AssistedLiving => "assisted_living",
        CareRecommendation::MemoryCare => "memory_care",
        CareRecommendation::Both => "both",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_labels() {
        assert_eq!(
            recommendation_label(CareRecommendation::AssistedLiving),
            "assisted_living"
        );
        assert_eq!(
            recommendation_label(CareRecommendation::MemoryCare),
            "memory_care"
        );
        assert_eq!(recommendation_label(CareRecommendation::Both), "both");
    }
}
