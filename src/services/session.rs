use crate::models::AssessmentSession;
use redis::aio::ConnectionManager;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur with session store operations
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Two-tier assessment session store
///
/// Holds in-progress assessment state (question index, answers, result)
/// keyed by a client-generated session id. L1 is an in-process moka cache,
/// L2 is Redis so sessions survive restarts and are shared across
/// instances. Entries expire after the configured TTL; an abandoned
/// assessment simply disappears.
pub struct SessionStore {
    redis: Arc<tokio::sync::Mutex<ConnectionManager>>,
    l1_cache: moka::future::Cache<String, Vec<u8>>,
    ttl_secs: u64,
}

impl SessionStore {
    /// Create a new session store
    pub async fn new(
        redis_url: &str,
        l1_size: u64,
        ttl_secs: u64,
    ) -> Result<Self, SessionStoreError> {
        let client = redis::Client::open(redis_url)?;
        let redis = redis::aio::ConnectionManager::new(client).await?;

        let l1_cache = moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Ok(Self {
            redis: Arc::new(tokio::sync::Mutex::new(redis)),
            l1_cache,
            ttl_secs,
        })
    }

    /// Persist a session under its id (both tiers)
    pub async fn save(
        &self,
        session_id: &str,
        session: &AssessmentSession,
    ) -> Result<(), SessionStoreError> {
        let key = session_key(session_id);
        let json = serde_json::to_string(session)?;

        let bytes = json.as_bytes().to_vec();
        self.l1_cache.insert(key.clone(), bytes).await;

        let mut conn = self.redis.lock().await;
        redis::cmd("SETEX")
            .arg(&key)
            .arg(self.ttl_secs)
            .arg(json)
            .query_async::<()>(&mut *conn)
            .await?;
        drop(conn);

        tracing::trace!("Session saved: {}", key);
        Ok(())
    }

    /// Load a session by id; `None` when absent or expired
    pub async fn load(
        &self,
        session_id: &str,
    ) -> Result<Option<AssessmentSession>, SessionStoreError> {
        let key = session_key(session_id);

        // L1 first
        if let Some(bytes) = self.l1_cache.get(&key).await {
            tracing::trace!("Session L1 hit: {}", key);
            return Ok(Some(serde_json::from_slice(&bytes)?));
        }

        // Fall back to Redis
        let mut conn = self.redis.lock().await;
        let value: Option<String> = redis::cmd("GET")
            .arg(&key)
            .query_async(&mut *conn)
            .await?;
        drop(conn);

        if let Some(json) = value {
            tracing::trace!("Session L2 hit: {}", key);
            let bytes = json.as_bytes().to_vec();
            self.l1_cache.insert(key, bytes).await;
            return Ok(Some(serde_json::from_str(&json)?));
        }

        Ok(None)
    }

    /// Remove a session from both tiers
    pub async fn clear(&self, session_id: &str) -> Result<(), SessionStoreError> {
        let key = session_key(session_id);

        self.l1_cache.invalidate(&key).await;

        let mut conn = self.redis.lock().await;
        redis::cmd("DEL")
            .arg(&key)
            .query_async::<()>(&mut *conn)
            .await?;

        tracing::trace!("Session cleared: {}", key);
        Ok(())
    }
}

fn session_key(session_id: &str) -> String {
    format!("session:{}", session_id)
}
