use axum::{http::{header, HeaderValue, Method}, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::config::{AppConfig, EmailConfig, MongoConfig, RateLimitConfig, RedisConfig};
use crate::handler::page_handler::PageState;
use crate::middlewares::admin_middleware::AdminAuthState;
use crate::repository::catalog_repo::{CatalogRepository, MongoCatalogRepository};
use crate::repository::location_repo::{LocationRepository, MongoLocationRepository};
use crate::repository::mongo;
use crate::repository::quote_repo::{MongoQuoteRepository, QuoteRepository};
use crate::router::contact_router::contact_router;
use crate::router::page_router::page_router;
use crate::router::quote_router::quote_router;
use crate::router::tools_router::tools_router;
use crate::service::location_service::LocationServiceImpl;
use crate::service::quote_service::{QuoteNotifier, QuoteServiceImpl};
use crate::util::availability::{AvailabilityChecker, SimulatedAvailability};
use crate::util::email::SmtpEmailService;
use crate::util::rate_limiter::{InMemoryRateLimitStore, RateLimitStore, RateLimiter};
use crate::util::redis::RedisService;
use crate::view::layout::SiteInfo;

pub type AppResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Everything the routers hand to their handlers.
#[derive(Clone)]
pub struct AppState {
    pub quote_service: Arc<QuoteServiceImpl>,
    pub location_service: Arc<LocationServiceImpl>,
    pub availability: Arc<dyn AvailabilityChecker>,
    pub quote_limiter: Arc<RateLimiter>,
    pub contact_limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Wires services over the given repositories.
    pub fn new(
        quote_repo: Arc<dyn QuoteRepository>,
        location_repo: Arc<dyn LocationRepository>,
        catalog_repo: Arc<dyn CatalogRepository>,
        notifier: Option<Arc<dyn QuoteNotifier>>,
        rate_limits: &RateLimitConfig,
        store: Arc<dyn RateLimitStore>,
    ) -> Self {
        let quote_service = Arc::new(QuoteServiceImpl::new(quote_repo, location_repo.clone(), notifier));
        let location_service = Arc::new(LocationServiceImpl::new(location_repo, catalog_repo));
        AppState {
            quote_service,
            location_service,
            availability: Arc::new(SimulatedAvailability),
            quote_limiter: Arc::new(RateLimiter::new(
                "quote",
                rate_limits.quote_max_requests,
                rate_limits.window(),
                store.clone(),
            )),
            contact_limiter: Arc::new(RateLimiter::new(
                "contact",
                rate_limits.contact_max_requests,
                rate_limits.window(),
                store,
            )),
        }
    }
}

/// Composes every feature router with CORS and request tracing.
pub fn create_router(config: &AppConfig, state: &AppState) -> Router {
    let page_state = Arc::new(PageState {
        service: state.location_service.clone(),
        site: SiteInfo::from(config),
    });
    let admin_auth_state = Arc::new(AdminAuthState { api_token: config.admin_api_token.clone() });

    Router::new()
        .merge(quote_router(state.quote_service.clone(), state.quote_limiter.clone(), admin_auth_state))
        .merge(contact_router(state.contact_limiter.clone()))
        .merge(tools_router(state.availability.clone()))
        .merge(page_router(page_state))
        .layer(cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(86400))
}

/// Redis counters when configured and reachable, process memory otherwise.
pub async fn rate_limit_store() -> Arc<dyn RateLimitStore> {
    let config = match RedisConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            info!("Redis not configured ({}), rate limits are kept in memory", e);
            return Arc::new(InMemoryRateLimitStore::new());
        }
    };
    match RedisService::new(config).await {
        Ok(redis) => Arc::new(redis),
        Err(e) => {
            warn!("Redis unavailable ({}), rate limits are kept in memory", e);
            Arc::new(InMemoryRateLimitStore::new())
        }
    }
}

/// SMTP confirmations when configured.
pub fn quote_notifier(site_name: &str) -> Option<Arc<dyn QuoteNotifier>> {
    let config = match EmailConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            info!("Email not configured ({}), quote confirmations are disabled", e);
            return None;
        }
    };
    match SmtpEmailService::new(config, site_name.to_string()) {
        Ok(service) => Some(Arc::new(service)),
        Err(e) => {
            warn!("Email service could not be created ({}), quote confirmations are disabled", e);
            None
        }
    }
}

pub struct App {
    config: AppConfig,
    router: Router,
    pub state: AppState,
}

impl App {
    pub async fn new() -> AppResult<Self> {
        let config = AppConfig::from_env();
        let mongo_config = MongoConfig::from_env()?;
        let rate_limits = RateLimitConfig::from_env()?;

        let db = mongo::connect(&mongo_config).await?;
        mongo::ensure_indexes(&db).await?;

        let state = AppState::new(
            Arc::new(MongoQuoteRepository::new(&db)),
            Arc::new(MongoLocationRepository::new(&db)),
            Arc::new(MongoCatalogRepository::new(&db)),
            quote_notifier(&config.site_name),
            &rate_limits,
            rate_limit_store().await,
        );
        let router = create_router(&config, &state);

        Ok(App { config, router, state })
    }

    pub async fn start(self) -> AppResult<()> {
        let addr = SocketAddr::new(self.config.host.parse()?, self.config.port);
        info!("Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}
