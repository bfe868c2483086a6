//! Redis cache implementation.
//!
//! Provides the response cache for list endpoints and the fixed-window
//! rate-limit counters. Response-cache entries are keyed by a
//! structured `(entity, params)` tuple and invalidated per entity on
//! any mutation, never by matching request URLs.

use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};
use serde::{de::DeserializeOwned, Serialize};

use crate::config::{Config, CACHE_PREFIX_RATE_LIMIT, CACHE_PREFIX_RESPONSE};
use crate::errors::{AppError, AppResult};

/// Redis cache wrapper with connection pooling.
#[derive(Clone)]
pub struct Cache {
    connection: ConnectionManager,
    default_ttl: u64,
}

impl Cache {
    /// Create a new cache instance and connect to Redis.
    ///
    /// # Panics
    /// Panics if Redis connection fails.
    pub async fn connect(config: &Config) -> Self {
        let client =
            Client::open(config.redis_url.as_str()).expect("Failed to create Redis client");

        let connection = ConnectionManager::new(client)
            .await
            .expect("Failed to connect to Redis");

        tracing::info!("Redis cache connected");

        Self {
            connection,
            default_ttl: config.cache_ttl_seconds,
        }
    }

    /// Try to connect to Redis, returning an error instead of panicking.
    pub async fn try_connect(config: &Config) -> Result<Self, RedisError> {
        let client = Client::open(config.redis_url.as_str())?;
        let connection = ConnectionManager::new(client).await?;

        Ok(Self {
            connection,
            default_ttl: config.cache_ttl_seconds,
        })
    }

    // =========================================================================
    // Generic Cache Operations
    // =========================================================================

    /// Get a value from cache.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(key).await.map_err(cache_error)?;

        match value {
            Some(json) => match serde_json::from_str(&json) {
                Ok(parsed) => Ok(Some(parsed)),
                Err(e) => {
                    // A stale shape is a cache miss, not an error
                    tracing::warn!(key = %key, error = %e, "Dropping undecodable cache entry");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Set a value in cache with default TTL.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        self.set_with_ttl(key, value, self.default_ttl).await
    }

    /// Set a value in cache with custom TTL (in seconds).
    pub async fn set_with_ttl<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::internal(format!("Cache serialization error: {}", e)))?;

        conn.set_ex::<_, _, ()>(key, json, ttl_seconds)
            .await
            .map_err(cache_error)?;

        Ok(())
    }

    /// Delete a value from cache.
    pub async fn delete(&self, key: &str) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: () = conn.del(key).await.map_err(cache_error)?;
        Ok(())
    }

    /// Check if a key exists in cache.
    pub async fn exists(&self, key: &str) -> AppResult<bool> {
        let mut conn = self.connection.clone();
        let exists: bool = conn.exists(key).await.map_err(cache_error)?;
        Ok(exists)
    }

    /// Delete all keys matching a pattern.
    /// Uses UNLINK for non-blocking async deletion in Redis.
    pub async fn delete_pattern(&self, pattern: &str) -> AppResult<u64> {
        let mut conn = self.connection.clone();
        let keys: Vec<String> = conn.keys(pattern).await.map_err(cache_error)?;

        if keys.is_empty() {
            return Ok(0);
        }

        let count = keys.len() as u64;

        let deleted: i64 = redis::cmd("UNLINK")
            .arg(&keys)
            .query_async(&mut conn)
            .await
            .unwrap_or(0);

        // Fall back to DEL on servers without UNLINK
        if deleted == 0 {
            let _: i64 = conn.del(&keys).await.map_err(cache_error)?;
        }

        Ok(count)
    }

    // =========================================================================
    // Response Cache Operations
    // =========================================================================

    /// Structured response-cache key: `cache:{entity}:{params}`.
    pub fn response_key(entity: &str, params: &str) -> String {
        format!("{}{}:{}", CACHE_PREFIX_RESPONSE, entity, params)
    }

    /// Get a cached list response for an entity + filter tuple.
    pub async fn get_response<T: DeserializeOwned>(
        &self,
        entity: &str,
        params: &str,
    ) -> AppResult<Option<T>> {
        self.get(&Self::response_key(entity, params)).await
    }

    /// Cache a list response for an entity + filter tuple.
    pub async fn set_response<T: Serialize>(
        &self,
        entity: &str,
        params: &str,
        value: &T,
    ) -> AppResult<()> {
        self.set(&Self::response_key(entity, params), value).await
    }

    /// Drop every cached response for an entity after a mutation.
    pub async fn invalidate_entity(&self, entity: &str) -> AppResult<u64> {
        let pattern = format!("{}{}:*", CACHE_PREFIX_RESPONSE, entity);
        let dropped = self.delete_pattern(&pattern).await?;
        if dropped > 0 {
            tracing::debug!(entity = %entity, dropped = dropped, "Cache invalidated");
        }
        Ok(dropped)
    }

    // =========================================================================
    // Rate Limiting Operations
    // =========================================================================

    /// Check and increment rate limit counter.
    /// Returns (current_count, is_allowed) tuple.
    pub async fn check_rate_limit(
        &self,
        identifier: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<(u64, bool)> {
        let key = format!("{}{}", CACHE_PREFIX_RATE_LIMIT, identifier);
        let mut conn = self.connection.clone();

        let exists: bool = conn.exists(&key).await.map_err(cache_error)?;

        if !exists {
            // First request in window
            let _: () = conn
                .set_ex(&key, 1i64, window_seconds)
                .await
                .map_err(cache_error)?;
            return Ok((1, true));
        }

        let count: i64 = conn.incr(&key, 1).await.map_err(cache_error)?;
        let count = count as u64;
        let allowed = count <= max_requests;

        Ok((count, allowed))
    }
}

/// Convert Redis error to AppError.
fn cache_error(e: RedisError) -> AppError {
    tracing::error!("Redis error: {}", e);
    AppError::internal(format!("Cache error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_key_is_structured() {
        assert_eq!(
            Cache::response_key("recycling_items", "cat:Paper:p1:l10"),
            "cache:recycling_items:cat:Paper:p1:l10"
        );
    }

    #[test]
    fn test_key_prefixes() {
        assert_eq!(CACHE_PREFIX_RESPONSE, "cache:");
        assert_eq!(CACHE_PREFIX_RATE_LIMIT, "rate_limit:");
    }
}
