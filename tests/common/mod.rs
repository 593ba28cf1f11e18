#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{body::{to_bytes, Body}, http::Request, response::Response, Router};
use bson::oid::ObjectId;
use serde_json::Value;
use tower::ServiceExt;

use dumpster_site::app::app::{create_router, AppState};
use dumpster_site::config::{AppConfig, RateLimitConfig};
use dumpster_site::model::{city::City, dumpster_size::DumpsterSize, quote::Quote, service_type::ServiceType, state::State};
use dumpster_site::repository::catalog_repo::CatalogRepository;
use dumpster_site::repository::location_repo::LocationRepository;
use dumpster_site::repository::mongo::UpsertOutcome;
use dumpster_site::repository::quote_repo::{prepare_new_quote, QuoteRepository};
use dumpster_site::repository::repository_error::{RepositoryError, RepositoryResult};
use dumpster_site::service::quote_service::QuoteNotifier;
use dumpster_site::service::seed_service::{SeedDataset, SeedService, SeedServiceImpl};
use dumpster_site::util::rate_limiter::InMemoryRateLimitStore;

/// Initialize tracing for tests
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

fn outcome<T: PartialEq>(existing: &mut T, incoming: T) -> UpsertOutcome {
    if *existing == incoming {
        UpsertOutcome::Unchanged
    } else {
        *existing = incoming;
        UpsertOutcome::Updated
    }
}

#[derive(Default)]
pub struct InMemoryLocationRepository {
    pub states: Mutex<Vec<State>>,
    pub cities: Mutex<Vec<City>>,
}

#[async_trait]
impl LocationRepository for InMemoryLocationRepository {
    async fn upsert_state(&self, state: &State) -> RepositoryResult<(UpsertOutcome, ObjectId)> {
        let mut states = self.states.lock().unwrap();
        if let Some(existing) = states.iter_mut().find(|s| s.slug == state.slug) {
            let id = existing.id.unwrap();
            let result = outcome(existing, State { id: Some(id), ..state.clone() });
            return Ok((result, id));
        }
        let id = ObjectId::new();
        states.push(State { id: Some(id), ..state.clone() });
        Ok((UpsertOutcome::Inserted, id))
    }

    async fn upsert_city(&self, city: &City) -> RepositoryResult<UpsertOutcome> {
        let mut cities = self.cities.lock().unwrap();
        if let Some(existing) = cities.iter_mut().find(|c| c.state_id == city.state_id && c.slug == city.slug) {
            let id = existing.id;
            return Ok(outcome(existing, City { id, ..city.clone() }));
        }
        cities.push(City { id: Some(ObjectId::new()), ..city.clone() });
        Ok(UpsertOutcome::Inserted)
    }

    async fn find_state_by_slug(&self, slug: &str) -> RepositoryResult<Option<State>> {
        Ok(self.states.lock().unwrap().iter().find(|s| s.slug == slug).cloned())
    }

    async fn find_state_by_abbreviation(&self, abbreviation: &str) -> RepositoryResult<Option<State>> {
        Ok(self.states.lock().unwrap().iter().find(|s| s.abbreviation == abbreviation).cloned())
    }

    async fn find_state_by_id(&self, id: ObjectId) -> RepositoryResult<Option<State>> {
        Ok(self.states.lock().unwrap().iter().find(|s| s.id == Some(id)).cloned())
    }

    async fn find_city(&self, state_id: ObjectId, slug: &str) -> RepositoryResult<Option<City>> {
        Ok(self
            .cities
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.state_id == state_id && c.slug == slug)
            .cloned())
    }

    async fn find_city_by_id(&self, id: ObjectId) -> RepositoryResult<Option<City>> {
        Ok(self.cities.lock().unwrap().iter().find(|c| c.id == Some(id)).cloned())
    }

    async fn list_states(&self) -> RepositoryResult<Vec<State>> {
        let mut states = self.states.lock().unwrap().clone();
        states.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(states)
    }

    async fn list_cities_by_state(&self, state_id: ObjectId, limit: Option<i64>) -> RepositoryResult<Vec<City>> {
        let mut cities: Vec<City> =
            self.cities.lock().unwrap().iter().filter(|c| c.state_id == state_id).cloned().collect();
        cities.sort_by(|a, b| b.population.cmp(&a.population));
        if let Some(limit) = limit {
            cities.truncate(limit as usize);
        }
        Ok(cities)
    }

    async fn list_cities(&self, limit: i64) -> RepositoryResult<Vec<City>> {
        Ok(self.cities.lock().unwrap().iter().take(limit as usize).cloned().collect())
    }

    async fn count_cities(&self) -> RepositoryResult<u64> {
        Ok(self.cities.lock().unwrap().len() as u64)
    }
}

#[derive(Default)]
pub struct InMemoryCatalogRepository {
    pub sizes: Mutex<Vec<DumpsterSize>>,
    pub services: Mutex<Vec<ServiceType>>,
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn upsert_size(&self, size: &DumpsterSize) -> RepositoryResult<UpsertOutcome> {
        let mut sizes = self.sizes.lock().unwrap();
        if let Some(existing) = sizes.iter_mut().find(|s| s.slug == size.slug) {
            let id = existing.id;
            return Ok(outcome(existing, DumpsterSize { id, ..size.clone() }));
        }
        sizes.push(DumpsterSize { id: Some(ObjectId::new()), ..size.clone() });
        Ok(UpsertOutcome::Inserted)
    }

    async fn upsert_service(&self, service: &ServiceType) -> RepositoryResult<UpsertOutcome> {
        let mut services = self.services.lock().unwrap();
        if let Some(existing) = services.iter_mut().find(|s| s.slug == service.slug) {
            let id = existing.id;
            return Ok(outcome(existing, ServiceType { id, ..service.clone() }));
        }
        services.push(ServiceType { id: Some(ObjectId::new()), ..service.clone() });
        Ok(UpsertOutcome::Inserted)
    }

    async fn find_size_by_slug(&self, slug: &str) -> RepositoryResult<Option<DumpsterSize>> {
        Ok(self.sizes.lock().unwrap().iter().find(|s| s.slug == slug).cloned())
    }

    async fn find_service_by_slug(&self, slug: &str) -> RepositoryResult<Option<ServiceType>> {
        Ok(self.services.lock().unwrap().iter().find(|s| s.slug == slug).cloned())
    }

    async fn list_sizes(&self) -> RepositoryResult<Vec<DumpsterSize>> {
        let mut sizes = self.sizes.lock().unwrap().clone();
        sizes.sort_by_key(|s| s.size);
        Ok(sizes)
    }

    async fn list_services(&self) -> RepositoryResult<Vec<ServiceType>> {
        Ok(self.services.lock().unwrap().clone())
    }
}

#[derive(Default)]
pub struct InMemoryQuoteRepository {
    pub quotes: Mutex<Vec<Quote>>,
}

impl InMemoryQuoteRepository {
    pub fn all(&self) -> Vec<Quote> {
        self.quotes.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuoteRepository for InMemoryQuoteRepository {
    async fn create(&self, quote: Quote) -> RepositoryResult<Quote> {
        let quote = prepare_new_quote(quote);
        self.quotes.lock().unwrap().push(quote.clone());
        Ok(quote)
    }

    async fn list(&self, status: Option<&str>, offset: u64, limit: u64) -> RepositoryResult<Vec<Quote>> {
        // Newest first; later inserts win ties on the same millisecond
        let mut quotes: Vec<Quote> = self
            .quotes
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|q| status.map_or(true, |s| q.status == s))
            .cloned()
            .collect();
        quotes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(quotes.into_iter().skip(offset as usize).take(limit as usize).collect())
    }

    async fn count(&self, status: Option<&str>) -> RepositoryResult<u64> {
        Ok(self
            .quotes
            .lock()
            .unwrap()
            .iter()
            .filter(|q| status.map_or(true, |s| q.status == s))
            .count() as u64)
    }
}

/// Store that behaves like an unreachable database.
pub struct UnreachableQuoteRepository;

#[async_trait]
impl QuoteRepository for UnreachableQuoteRepository {
    async fn create(&self, _quote: Quote) -> RepositoryResult<Quote> {
        Err(RepositoryError::ConnectionError("server selection timeout".to_string()))
    }

    async fn list(&self, _status: Option<&str>, _offset: u64, _limit: u64) -> RepositoryResult<Vec<Quote>> {
        Err(RepositoryError::ConnectionError("server selection timeout".to_string()))
    }

    async fn count(&self, _status: Option<&str>) -> RepositoryResult<u64> {
        Err(RepositoryError::ConnectionError("server selection timeout".to_string()))
    }
}

/// Records every confirmation instead of sending it.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent_to: Mutex<Vec<String>>,
    pub fail: bool,
}

#[async_trait]
impl QuoteNotifier for RecordingNotifier {
    async fn quote_received(&self, quote: &Quote) -> Result<(), String> {
        self.sent_to.lock().unwrap().push(quote.email.clone());
        if self.fail {
            Err("SMTP connection refused".to_string())
        } else {
            Ok(())
        }
    }
}

pub fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Repositories filled from the bundled `data/` directory.
pub async fn seeded_repositories() -> (Arc<InMemoryLocationRepository>, Arc<InMemoryCatalogRepository>) {
    let locations = Arc::new(InMemoryLocationRepository::default());
    let catalog = Arc::new(InMemoryCatalogRepository::default());
    let dataset = SeedDataset::load(&data_dir()).expect("bundled dataset loads");
    SeedServiceImpl::new(locations.clone(), catalog.clone(), 10)
        .run(&dataset)
        .await
        .expect("seeding succeeds");
    (locations, catalog)
}

pub struct TestApp {
    pub router: Router,
    pub quotes: Arc<InMemoryQuoteRepository>,
    pub locations: Arc<InMemoryLocationRepository>,
    pub notifier: Arc<RecordingNotifier>,
}

pub async fn setup_app_with(config: AppConfig, notifier: RecordingNotifier) -> TestApp {
    init_tracing();
    let (locations, catalog) = seeded_repositories().await;
    let quotes = Arc::new(InMemoryQuoteRepository::default());
    let notifier = Arc::new(notifier);
    let state = AppState::new(
        quotes.clone(),
        locations.clone(),
        catalog,
        Some(notifier.clone() as Arc<dyn QuoteNotifier>),
        &RateLimitConfig::default(),
        Arc::new(InMemoryRateLimitStore::new()),
    );
    TestApp { router: create_router(&config, &state), quotes, locations, notifier }
}

pub async fn setup_app() -> TestApp {
    setup_app_with(AppConfig::from_test_env(), RecordingNotifier::default()).await
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-forwarded-for", "203.0.113.10")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

pub async fn send(app: &Router, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.unwrap()
}

pub async fn body_text(resp: Response) -> String {
    let bytes = to_bytes(resp.into_body(), 4 * 1024 * 1024).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(resp: Response) -> Value {
    serde_json::from_str(&body_text(resp).await).unwrap()
}

pub fn valid_quote() -> Value {
    serde_json::json!({
        "name": "Jane Doe",
        "email": "jane@x.com",
        "phone": "5551234567",
        "zipCode": "90001",
        "dumpsterSize": "20",
        "projectType": "Home Renovation",
        "serviceType": "Residential",
        "rentalDuration": "7",
        "deliveryDate": "2099-01-01",
        "address": "1 Main St"
    })
}
