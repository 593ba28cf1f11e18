use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tracing::debug;

use crate::util::redis::{RedisError, RedisService};

/// Outcome of one request against a fixed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowHit {
    /// Hits counted in the window, this one included when `counted`
    pub count: u64,
    pub reset_in: Duration,
    /// False once the window was already full; blocked requests are not counted
    pub counted: bool,
}

/// Where fixed-window counters are kept.
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Counts one hit for `key` unless `limit` hits are already recorded.
    async fn hit(&self, key: &str, window: Duration, limit: u64) -> Result<WindowHit, RedisError>;
}

/// Process-local counters, used when Redis is not configured.
#[derive(Default)]
pub struct InMemoryRateLimitStore {
    windows: DashMap<String, (u64, Instant)>,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn evict_expired(&self, now: Instant) {
        self.windows.retain(|_, (_, expires)| *expires > now);
    }
}

#[async_trait]
impl RateLimitStore for InMemoryRateLimitStore {
    async fn hit(&self, key: &str, window: Duration, limit: u64) -> Result<WindowHit, RedisError> {
        let now = Instant::now();
        // New clients sweep out windows that have ended; must run before the entry lock is taken
        if !self.windows.contains_key(key) {
            self.evict_expired(now);
        }

        let mut entry = self.windows.entry(key.to_string()).or_insert((0, now + window));
        if entry.1 <= now {
            *entry = (0, now + window);
        }
        let counted = entry.0 < limit;
        if counted {
            entry.0 += 1;
        }
        Ok(WindowHit { count: entry.0, reset_in: entry.1.saturating_duration_since(now), counted })
    }
}

#[async_trait]
impl RateLimitStore for RedisService {
    async fn hit(&self, key: &str, window: Duration, limit: u64) -> Result<WindowHit, RedisError> {
        self.hit_window(key, window, limit).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: u64,
    pub remaining: u64,
    /// Whole seconds until the window ends, rounded up
    pub retry_after_secs: u64,
    /// End of the window as a Unix timestamp in milliseconds
    pub reset_at_ms: i64,
}

/// A named limit ("quote", "contact") applied per client key.
#[derive(Clone)]
pub struct RateLimiter {
    pub name: &'static str,
    pub max_requests: u64,
    pub window: Duration,
    store: Arc<dyn RateLimitStore>,
}

impl RateLimiter {
    pub fn new(name: &'static str, max_requests: u64, window: Duration, store: Arc<dyn RateLimitStore>) -> Self {
        RateLimiter { name, max_requests, window, store }
    }

    pub async fn check(&self, client: &str) -> Result<RateLimitDecision, RedisError> {
        let key = format!("ratelimit:{}:{}", self.name, client);
        let hit = self.store.hit(&key, self.window, self.max_requests).await?;
        debug!(limiter = self.name, client, count = hit.count, counted = hit.counted, "rate limit checked");

        let reset_in = hit.reset_in;
        let retry_after_secs = reset_in.as_secs() + u64::from(reset_in.subsec_nanos() > 0);
        let reset_at_ms = Utc::now().timestamp_millis() + i64::try_from(reset_in.as_millis()).unwrap_or(i64::MAX);
        Ok(RateLimitDecision {
            allowed: hit.counted,
            limit: self.max_requests,
            remaining: self.max_requests.saturating_sub(hit.count),
            retry_after_secs,
            reset_at_ms,
        })
    }
}
