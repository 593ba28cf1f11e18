use std::env;
use std::path::PathBuf;

use crate::config::ConfigError;

/// Where the seed dataset lives and how many cities are upserted at once.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub data_dir: PathBuf,
    pub batch_size: usize,
}

impl SeedConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_dir = env::var("SEED_DATA_DIR").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from("data"));
        let batch_size = match env::var("SEED_BATCH_SIZE") {
            Ok(raw) => raw
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidValue("Invalid SEED_BATCH_SIZE value".to_string()))?,
            Err(_) => 50,
        };
        let config = SeedConfig { data_dir, batch_size };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::ValidationError("Seed batch size must be greater than 0".to_string()));
        }
        Ok(())
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        SeedConfig { data_dir: PathBuf::from("data"), batch_size: 50 }
    }
}
