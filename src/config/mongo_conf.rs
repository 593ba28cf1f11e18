use std::time::Duration;

use mongodb::options::{ClientOptions, Credential, ResolverConfig};
use tracing::info;

use crate::config::{optional_var, parsed_var, required_var, ConfigError};

/// Connection settings for the store holding locations, catalog and quotes.
#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub pool_size: u32,
    /// Applies to both connecting and server selection
    pub timeout_secs: u64,
}

impl MongoConfig {
    /// MONGO_URI and MONGO_DATABASE are required. MONGO_USERNAME,
    /// MONGO_PASSWORD, MONGO_POOL_SIZE (10) and MONGO_CONNECTION_TIMEOUT
    /// (5 seconds) are optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = MongoConfig::default();
        let config = MongoConfig {
            uri: required_var("MONGO_URI")?,
            database: required_var("MONGO_DATABASE")?,
            username: optional_var("MONGO_USERNAME"),
            password: optional_var("MONGO_PASSWORD"),
            pool_size: parsed_var("MONGO_POOL_SIZE", defaults.pool_size)?,
            timeout_secs: parsed_var("MONGO_CONNECTION_TIMEOUT", defaults.timeout_secs)?,
        };
        config.validate()?;
        info!(database = %config.database, pool_size = config.pool_size, "MongoDB configuration loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.uri.starts_with("mongodb://") && !self.uri.starts_with("mongodb+srv://") {
            return Err(ConfigError::ValidationError(
                "MONGO_URI must start with mongodb:// or mongodb+srv://".to_string(),
            ));
        }
        if self.database.is_empty() {
            return Err(ConfigError::ValidationError("MongoDB database cannot be empty".to_string()));
        }
        if self.pool_size == 0 || self.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "MongoDB pool size and timeout must be greater than 0".to_string(),
            ));
        }
        if self.username.is_some() != self.password.is_some() {
            return Err(ConfigError::ValidationError(
                "MONGO_USERNAME and MONGO_PASSWORD must be set together".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Explicit credentials, when both halves are configured.
    pub fn credential(&self) -> Option<Credential> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(
                Credential::builder()
                    .username(username.clone())
                    .password(password.clone())
                    .build(),
            ),
            _ => None,
        }
    }

    /// Parses the URI and layers the pool, timeout and credential settings on top.
    pub async fn client_options(&self) -> mongodb::error::Result<ClientOptions> {
        let mut options = ClientOptions::parse_with_resolver_config(&self.uri, ResolverConfig::cloudflare()).await?;
        options.app_name = Some("DumpsterSite".to_string());
        options.max_pool_size = Some(self.pool_size);
        options.connect_timeout = Some(self.timeout());
        options.server_selection_timeout = Some(self.timeout());
        if let Some(credential) = self.credential() {
            options.credential = Some(credential);
        }
        Ok(options)
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "dumpster_site".to_string(),
            username: None,
            password: None,
            pool_size: 10,
            timeout_secs: 5,
        }
    }
}
