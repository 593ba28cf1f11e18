use std::env;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Brand name interpolated into page copy and titles
    pub site_name: String,
    /// Absolute base URL used for canonical links and the sitemap
    pub site_url: String,
    pub allowed_origins: Vec<String>,
    /// Bearer token guarding the quote listing; open when unset
    pub admin_api_token: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);
        let site_name = env::var("SITE_NAME").unwrap_or_else(|_| "DumpsterRentalPro".to_string());
        let site_url = env::var("SITE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| "https://dumpsterrentalpro.com".to_string());
        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_else(|_| vec!["http://localhost:3000".to_string()]);
        debug!("Allowed origins: {:?}", allowed_origins);

        let admin_api_token = env::var("ADMIN_API_TOKEN").ok().filter(|t| !t.trim().is_empty());
        if admin_api_token.is_none() {
            warn!("ADMIN_API_TOKEN not set, quote listing is not protected");
        }

        AppConfig { host, port, site_name, site_url, allowed_origins, admin_api_token }
    }

    /// Create AppConfig for testing
    pub fn from_test_env() -> Self {
        AppConfig {
            site_url: "http://localhost:8080".to_string(),
            ..AppConfig::default()
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            site_name: "DumpsterRentalPro".to_string(),
            site_url: "https://dumpsterrentalpro.com".to_string(),
            allowed_origins: vec!["http://localhost:3000".to_string()],
            admin_api_token: None,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect();
    if origins.is_empty() {
        vec!["http://localhost:3000".to_string()]
    } else {
        origins
    }
}
