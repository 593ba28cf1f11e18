use std::time::Duration;

use once_cell::sync::Lazy;
use redis::aio::ConnectionManager;
use redis::{Client, Script};
use tracing::{debug, error, info, instrument};

use crate::config::RedisConfig;
use crate::util::rate_limiter::WindowHit;

/// KEYS[1] counter, ARGV[1] window in ms, ARGV[2] limit.
/// Returns {count, ms left, 1 when this hit was counted}.
static WINDOW_SCRIPT: Lazy<Script> = Lazy::new(|| {
    Script::new(
        r"
redis.call('SET', KEYS[1], 0, 'NX', 'PX', ARGV[1])
local count = tonumber(redis.call('GET', KEYS[1]))
local counted = 0
if count < tonumber(ARGV[2]) then
    count = redis.call('INCR', KEYS[1])
    counted = 1
end
return {count, redis.call('PTTL', KEYS[1]), counted}
",
    )
});

/// Redis-backed counter store shared by every instance of the site.
#[derive(Clone)]
pub struct RedisService {
    connection_manager: ConnectionManager,
    config: RedisConfig,
}

impl RedisService {
    /// Create a new Redis service and verify the connection with PING
    #[instrument(skip(config), fields(host = %config.host, port = config.port, db = config.database))]
    pub async fn new(config: RedisConfig) -> Result<Self, RedisError> {
        info!("Initializing Redis service");

        config.validate().map_err(|e| {
            error!("Redis configuration validation failed: {}", e);
            RedisError::ConfigError(e.to_string())
        })?;

        let client = Client::open(config.connection_url()).map_err(|e| {
            error!("Failed to create Redis client: {}", e);
            RedisError::ConnectionError(format!("Client creation failed: {}", e))
        })?;

        let connect = ConnectionManager::new(client);
        let timeout = config.timeout();
        let connection_manager = tokio::time::timeout(timeout, connect)
            .await
            .map_err(|_| RedisError::ConnectionError("Connection timed out".to_string()))?
            .map_err(|e| {
                error!("Failed to create Redis connection manager: {}", e);
                RedisError::ConnectionError(format!("Connection manager creation failed: {}", e))
            })?;

        let service = Self { connection_manager, config };
        service.ping().await?;

        info!("Redis service initialized successfully");
        Ok(service)
    }

    #[instrument(skip(self))]
    pub async fn ping(&self) -> Result<(), RedisError> {
        let mut conn = self.connection_manager.clone();
        let result: String = redis::cmd("PING").query_async(&mut conn).await.map_err(|e| {
            error!("Redis ping failed: {}", e);
            RedisError::OperationError(format!("Ping failed: {}", e))
        })?;

        if result == "PONG" {
            debug!("Redis ping successful");
            Ok(())
        } else {
            Err(RedisError::OperationError(format!("Unexpected ping response: {}", result)))
        }
    }

    /// Counts one hit against a fixed window unless `limit` hits are
    /// already in it. The first hit creates the key with the window as
    /// its expiry. Runs as one script so concurrent instances agree.
    #[instrument(skip(self), fields(key = %key))]
    pub async fn hit_window(&self, key: &str, window: Duration, limit: u64) -> Result<WindowHit, RedisError> {
        let key = self.config.counter_key(key);
        let window_ms = u64::try_from(window.as_millis()).unwrap_or(u64::MAX);
        let mut conn = self.connection_manager.clone();
        let (count, ttl_ms, counted): (i64, i64, i64) = WINDOW_SCRIPT
            .key(&key)
            .arg(window_ms)
            .arg(limit)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| {
                error!("Rate limit counter update failed for '{}': {}", key, e);
                RedisError::OperationError(format!("Counter update failed: {}", e))
            })?;

        debug!("Window counter '{}' at {} with {}ms left", key, count, ttl_ms);
        let reset_in = u64::try_from(ttl_ms).map(Duration::from_millis).unwrap_or(window);
        Ok(WindowHit { count: count.max(0) as u64, reset_in, counted: counted == 1 })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RedisError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Operation error: {0}")]
    OperationError(String),
}
