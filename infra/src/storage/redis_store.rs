//! Redis-backed verification-handle store
//!
//! Stores the handle as a plain string under a single configurable key.
//! Writes overwrite unconditionally; reads return the last written value or
//! absent. Redis persistence is what carries the handle across process
//! restarts.

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands};
use tracing::{debug, error, info};

use sg_core::domain::VerificationHandle;
use sg_core::services::flow::HandleStoreTrait;

use crate::storage::DEFAULT_HANDLE_KEY;
use crate::InfrastructureError;

/// Handle store configuration
#[derive(Debug, Clone)]
pub struct HandleStoreConfig {
    /// Redis connection URL
    pub url: String,
    /// Key under which the handle is stored
    pub key: String,
}

impl HandleStoreConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let url = std::env::var("REDIS_URL")
            .map_err(|_| InfrastructureError::Config("REDIS_URL not set".to_string()))?;

        Ok(Self {
            url,
            key: std::env::var("SIGNIN_HANDLE_KEY")
                .unwrap_or_else(|_| DEFAULT_HANDLE_KEY.to_string()),
        })
    }
}

/// Redis-backed store for the in-flight verification handle
#[derive(Clone)]
pub struct RedisHandleStore {
    connection: MultiplexedConnection,
    key: String,
}

impl RedisHandleStore {
    /// Connect to Redis and create the store
    pub async fn new(config: HandleStoreConfig) -> Result<Self, InfrastructureError> {
        let client = redis::Client::open(config.url.as_str()).map_err(|e| {
            error!(error = %e, "Failed to parse Redis URL");
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection = client.get_multiplexed_async_connection().await?;

        info!(key = %config.key, "Redis handle store connected");

        Ok(Self {
            connection,
            key: config.key,
        })
    }

    /// Connect using environment configuration
    pub async fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(HandleStoreConfig::from_env()?).await
    }
}

#[async_trait]
impl HandleStoreTrait for RedisHandleStore {
    async fn put_handle(&self, handle: &VerificationHandle) -> Result<(), String> {
        let mut connection = self.connection.clone();
        connection
            .set::<_, _, ()>(&self.key, handle.as_str())
            .await
            .map_err(|e| {
                error!(error = %e, event = "handle_store_write_failed", "Failed to store handle");
                e.to_string()
            })?;

        debug!(key = %self.key, event = "handle_stored", "Verification handle stored");
        Ok(())
    }

    async fn get_handle(&self) -> Result<Option<VerificationHandle>, String> {
        let mut connection = self.connection.clone();
        let stored: Option<String> = connection.get(&self.key).await.map_err(|e| {
            error!(error = %e, event = "handle_store_read_failed", "Failed to read handle");
            e.to_string()
        })?;

        debug!(
            key = %self.key,
            present = stored.is_some(),
            event = "handle_read",
            "Verification handle read"
        );
        Ok(stored.map(VerificationHandle::new))
    }
}
