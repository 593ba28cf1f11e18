pub mod app_conf;
pub mod mongo_conf;
pub mod redis_conf;
pub mod email_conf;
pub mod rate_limit_conf;
pub mod seed_conf;

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use tracing::warn;

pub use app_conf::AppConfig;
pub use mongo_conf::MongoConfig;
pub use redis_conf::RedisConfig;
pub use email_conf::EmailConfig;
pub use rate_limit_conf::RateLimitConfig;
pub use seed_conf::SeedConfig;

/// Common configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// A variable that must be present and non-blank.
pub(crate) fn required_var(key: &str) -> Result<String, ConfigError> {
    optional_var(key).ok_or_else(|| ConfigError::EnvVarNotFound(key.to_string()))
}

/// Blank values count as unset.
pub(crate) fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parses `key` when set, otherwise warns and returns `default`.
pub(crate) fn parsed_var<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Display,
{
    match optional_var(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue(format!("Invalid {} value: {}", key, raw))),
        None => {
            warn!("{} not set, using default: {}", key, default);
            Ok(default)
        }
    }
}
