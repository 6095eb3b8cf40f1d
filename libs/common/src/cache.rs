//! Redis-backed storage area
//!
//! This module stores every key of a storage area as a field of one Redis
//! hash named after the origin, so a whole area can be dropped with a single
//! `DEL` and several clients on the same origin observe the same session.

use async_trait::async_trait;
use redis::{AsyncCommands, Client};
use tracing::info;

use crate::error::{StorageError, StorageResult};
use crate::storage::{Entries, StorageArea};

/// Configuration for Redis connection
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis connection URL (e.g., "redis://localhost:6379")
    pub url: String,
    /// Origin the storage area belongs to
    pub origin: String,
}

impl RedisConfig {
    /// Create a new RedisConfig from environment variables
    ///
    /// # Environment Variables
    /// - `REDIS_URL`: Redis connection URL (default: "redis://localhost:6379")
    /// - `LEAVE_ORIGIN`: Origin the session is scoped to (default: "localhost")
    pub fn from_env() -> StorageResult<Self> {
        let url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
        let origin = std::env::var("LEAVE_ORIGIN").unwrap_or_else(|_| "localhost".to_string());

        if origin.trim().is_empty() {
            return Err(StorageError::Configuration(
                "LEAVE_ORIGIN must not be empty".to_string(),
            ));
        }

        Ok(RedisConfig { url, origin })
    }

    /// Name of the hash holding this origin's keys
    pub fn namespace(&self) -> String {
        format!("session:{}", self.origin)
    }
}

/// Storage area kept in a Redis hash
pub struct RedisStorage {
    client: Client,
    namespace: String,
}

impl RedisStorage {
    /// Initialize a new Redis storage area
    pub async fn new(config: &RedisConfig) -> StorageResult<Self> {
        let client = Client::open(config.url.clone())?;
        info!(
            "Redis storage initialized with URL: {} (namespace {})",
            config.url,
            config.namespace()
        );
        Ok(RedisStorage {
            client,
            namespace: config.namespace(),
        })
    }

    /// Get a connection from the client
    async fn get_connection(&self) -> StorageResult<redis::aio::MultiplexedConnection> {
        let conn = self.client.get_multiplexed_async_connection().await?;
        Ok(conn)
    }

    /// Check if Redis is reachable
    pub async fn health_check(&self) -> StorageResult<bool> {
        let mut conn = self.get_connection().await?;
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(pong == "PONG")
    }
}

#[async_trait]
impl StorageArea for RedisStorage {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let mut conn = self.get_connection().await?;
        let value: Option<String> = conn.hget(&self.namespace, key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut conn = self.get_connection().await?;
        let _: () = conn.hset(&self.namespace, key, value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        let mut conn = self.get_connection().await?;
        let _: () = conn.hdel(&self.namespace, key).await?;
        Ok(())
    }

    async fn clear(&self) -> StorageResult<()> {
        let mut conn = self.get_connection().await?;
        let _: () = conn.del(&self.namespace).await?;
        Ok(())
    }

    async fn entries(&self) -> StorageResult<Entries> {
        let mut conn = self.get_connection().await?;
        let entries: Entries = conn.hgetall(&self.namespace).await?;
        Ok(entries)
    }

    async fn merge(&self, values: Entries) -> StorageResult<()> {
        if values.is_empty() {
            return Ok(());
        }
        let items: Vec<(String, String)> = values.into_iter().collect();
        let mut conn = self.get_connection().await?;
        let _: () = conn.hset_multiple(&self.namespace, &items).await?;
        Ok(())
    }

    async fn replace_all(&self, values: Entries) -> StorageResult<()> {
        let items: Vec<(String, String)> = values.into_iter().collect();
        let mut pipe = redis::pipe();
        pipe.atomic().del(&self.namespace).ignore();
        if !items.is_empty() {
            pipe.hset_multiple(&self.namespace, &items).ignore();
        }

        let mut conn = self.get_connection().await?;
        let _: () = pipe.query_async(&mut conn).await?;
        Ok(())
    }
}
