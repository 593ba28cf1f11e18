use std::time::Duration;

use crate::config::{parsed_var, ConfigError};

/// Per-IP submission limits for the public form endpoints.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub quote_max_requests: u64,
    pub contact_max_requests: u64,
    pub window_secs: u64,
}

impl RateLimitConfig {
    /// Load limits from RATE_LIMIT_QUOTE_MAX, RATE_LIMIT_CONTACT_MAX and
    /// RATE_LIMIT_WINDOW_SECS, falling back to 10 / 5 per hour.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = RateLimitConfig::default();
        let config = RateLimitConfig {
            quote_max_requests: parsed_var("RATE_LIMIT_QUOTE_MAX", defaults.quote_max_requests)?,
            contact_max_requests: parsed_var("RATE_LIMIT_CONTACT_MAX", defaults.contact_max_requests)?,
            window_secs: parsed_var("RATE_LIMIT_WINDOW_SECS", defaults.window_secs)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quote_max_requests == 0 || self.contact_max_requests == 0 {
            return Err(ConfigError::ValidationError("Rate limits must be greater than 0".to_string()));
        }
        if self.window_secs == 0 {
            return Err(ConfigError::ValidationError("Rate limit window must be greater than 0".to_string()));
        }
        Ok(())
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        RateLimitConfig {
            quote_max_requests: 10,
            contact_max_requests: 5,
            window_secs: 60 * 60,
        }
    }
}
