use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// How the SMTP connection is secured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmtpSecurity {
    None,
    StartTls,
    Tls,
}

impl FromStr for SmtpSecurity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "plain" => Ok(SmtpSecurity::None),
            "starttls" => Ok(SmtpSecurity::StartTls),
            "tls" | "ssl" => Ok(SmtpSecurity::Tls),
            other => Err(ConfigError::InvalidValue(format!("Unknown SMTP_SECURITY value: {}", other))),
        }
    }
}

/// SMTP settings for lead confirmation emails. Email is optional: the
/// quote flow runs without it when SMTP_HOST is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub security: SmtpSecurity,
    /// From email address
    pub from_email: String,
    /// From name (display name)
    pub from_name: String,
    /// Office inbox that receives a copy of every new lead
    pub notify_email: Option<String>,
    pub connection_timeout_secs: u64,
}

impl EmailConfig {
    /// Create EmailConfig from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading email configuration from environment variables");

        let smtp_host = env::var("SMTP_HOST")
            .map_err(|_| {
                debug!("SMTP_HOST environment variable not found");
                ConfigError::EnvVarNotFound("SMTP_HOST".to_string())
            })?;

        let smtp_port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| {
                warn!("SMTP_PORT not set, defaulting to 587");
                "587".to_string()
            })
            .parse::<u16>()
            .map_err(|_| {
                error!("Invalid SMTP_PORT value");
                ConfigError::InvalidValue("Invalid SMTP_PORT value".to_string())
            })?;

        let smtp_username = env::var("SMTP_USERNAME").ok().filter(|u| !u.is_empty());
        let smtp_password = env::var("SMTP_PASSWORD").ok().filter(|p| !p.is_empty());
        debug!("SMTP credentials provided: {}", smtp_username.is_some() && smtp_password.is_some());

        let security = env::var("SMTP_SECURITY")
            .unwrap_or_else(|_| "starttls".to_string())
            .parse::<SmtpSecurity>()?;

        let from_email = env::var("SMTP_FROM_EMAIL")
            .map_err(|_| {
                error!("SMTP_FROM_EMAIL environment variable not found");
                ConfigError::EnvVarNotFound("SMTP_FROM_EMAIL".to_string())
            })?;

        let from_name = env::var("SMTP_FROM_NAME").unwrap_or_else(|_| "DumpsterRentalPro".to_string());
        let notify_email = env::var("QUOTE_NOTIFY_EMAIL").ok().filter(|e| !e.is_empty());

        let connection_timeout_secs = env::var("SMTP_CONNECTION_TIMEOUT")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .unwrap_or(30);

        let config = EmailConfig {
            smtp_host,
            smtp_port,
            smtp_username,
            smtp_password,
            security,
            from_email,
            from_name,
            notify_email,
            connection_timeout_secs,
        };

        config.validate()?;
        info!("Email configuration loaded successfully");
        Ok(config)
    }

    /// Create EmailConfig for testing
    pub fn from_test_env() -> Self {
        EmailConfig {
            smtp_host: "localhost".to_string(),
            smtp_port: 1025,
            smtp_username: None,
            smtp_password: None,
            security: SmtpSecurity::None,
            from_email: "quotes@example.com".to_string(),
            from_name: "Test Dumpsters".to_string(),
            notify_email: None,
            connection_timeout_secs: 10,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.smtp_host.is_empty() {
            error!("SMTP host is empty");
            return Err(ConfigError::ValidationError("SMTP host cannot be empty".to_string()));
        }

        if self.smtp_port == 0 {
            error!("SMTP port is 0");
            return Err(ConfigError::ValidationError("SMTP port cannot be 0".to_string()));
        }

        if self.smtp_username.is_some() != self.smtp_password.is_some() {
            error!("SMTP username and password must be set together");
            return Err(ConfigError::ValidationError(
                "SMTP_USERNAME and SMTP_PASSWORD must be set together".to_string(),
            ));
        }

        for (name, address) in [("from", Some(&self.from_email)), ("notify", self.notify_email.as_ref())] {
            if let Some(address) = address {
                if !address.contains('@') {
                    error!("Invalid {} email format", name);
                    return Err(ConfigError::ValidationError(format!("Invalid {} email format", name)));
                }
            }
        }

        if self.connection_timeout_secs == 0 {
            return Err(ConfigError::ValidationError("Connection timeout cannot be 0".to_string()));
        }

        Ok(())
    }

    /// Get SMTP server URL
    pub fn get_smtp_url(&self) -> String {
        format!("{}:{}", self.smtp_host, self.smtp_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_valid_config() {
        let config = EmailConfig::from_test_env();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_host() {
        let mut config = EmailConfig::from_test_env();
        config.smtp_host = "".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_username_without_password() {
        let mut config = EmailConfig::from_test_env();
        config.smtp_username = Some("mailer".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_invalid_notify_email() {
        let mut config = EmailConfig::from_test_env();
        config.notify_email = Some("office".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_security_parsing() {
        assert_eq!("STARTTLS".parse::<SmtpSecurity>().unwrap(), SmtpSecurity::StartTls);
        assert_eq!("ssl".parse::<SmtpSecurity>().unwrap(), SmtpSecurity::Tls);
        assert!("carrier-pigeon".parse::<SmtpSecurity>().is_err());
    }

    #[test]
    fn test_get_smtp_url() {
        let config = EmailConfig::from_test_env();
        assert_eq!(config.get_smtp_url(), "localhost:1025");
    }
}
