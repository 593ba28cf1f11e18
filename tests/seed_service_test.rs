mod common;

use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;

use common::*;
use dumpster_site::dto::location_dto::{CityRecord, StateRecord};
use dumpster_site::model::{city::City, state::State};
use dumpster_site::repository::location_repo::LocationRepository;
use dumpster_site::repository::mongo::UpsertOutcome;
use dumpster_site::repository::repository_error::{RepositoryError, RepositoryResult};
use dumpster_site::service::seed_service::{SeedDataset, SeedService, SeedServiceImpl};
use dumpster_site::util::error::ServiceError;

fn state_record(name: &str, abbreviation: &str) -> StateRecord {
    StateRecord {
        name: name.to_string(),
        abbreviation: abbreviation.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        population: 1_000_000,
    }
}

fn city_record(name: &str, state_slug: Option<&str>, state_abbr: Option<&str>) -> CityRecord {
    CityRecord {
        name: name.to_string(),
        slug: None,
        state_slug: state_slug.map(str::to_string),
        state_abbr: state_abbr.map(str::to_string),
        population: 100_000,
        zip_codes: vec!["00000".to_string()],
        latitude: 40.0,
        longitude: -100.0,
    }
}

#[tokio::test]
async fn test_bundled_dataset_seeds_every_record() {
    init_tracing();
    let dataset = SeedDataset::load(&data_dir()).unwrap();
    let locations = Arc::new(InMemoryLocationRepository::default());
    let catalog = Arc::new(InMemoryCatalogRepository::default());
    let seeder = SeedServiceImpl::new(locations.clone(), catalog.clone(), 50);

    let report = seeder.run(&dataset).await.unwrap();
    assert_eq!(report.states.inserted, 50);
    assert_eq!(report.sizes.inserted, 4);
    assert_eq!(report.services.inserted, 5);
    assert_eq!(report.cities.inserted, dataset.cities.len());
    assert_eq!(report.skipped_cities, 0);
    assert_eq!(report.stored_cities, dataset.cities.len() as u64);

    // Records without a slug get one derived from the name
    let cities = locations.cities.lock().unwrap();
    assert!(cities.iter().any(|c| c.slug == "san-diego"));
    assert!(cities.iter().any(|c| c.slug == "colorado-springs"));
}

#[tokio::test]
async fn test_seeding_twice_is_idempotent() {
    let dataset = SeedDataset::load(&data_dir()).unwrap();
    let locations = Arc::new(InMemoryLocationRepository::default());
    let catalog = Arc::new(InMemoryCatalogRepository::default());
    let seeder = SeedServiceImpl::new(locations.clone(), catalog.clone(), 7);

    seeder.run(&dataset).await.unwrap();
    let states_before = locations.states.lock().unwrap().clone();
    let cities_before = locations.cities.lock().unwrap().clone();

    let report = seeder.run(&dataset).await.unwrap();
    assert_eq!(report.states.unchanged, 50);
    assert_eq!(report.states.inserted + report.states.updated, 0);
    assert_eq!(report.cities.unchanged, dataset.cities.len());
    assert_eq!(report.sizes.unchanged, 4);
    assert_eq!(report.services.unchanged, 5);
    // Replaying adds no rows
    assert_eq!(report.stored_cities, dataset.cities.len() as u64);

    assert_eq!(*locations.states.lock().unwrap(), states_before);
    assert_eq!(*locations.cities.lock().unwrap(), cities_before);
}

#[tokio::test]
async fn test_changed_fields_are_updated() {
    let locations = Arc::new(InMemoryLocationRepository::default());
    let catalog = Arc::new(InMemoryCatalogRepository::default());
    let seeder = SeedServiceImpl::new(locations.clone(), catalog, 10);

    let mut dataset = SeedDataset {
        states: vec![state_record("Oregon", "OR")],
        cities: vec![city_record("Salem", Some("oregon"), None)],
        ..Default::default()
    };
    seeder.run(&dataset).await.unwrap();

    dataset.cities[0].population = 180_000;
    let report = seeder.run(&dataset).await.unwrap();
    assert_eq!(report.cities.updated, 1);
    assert_eq!(locations.cities.lock().unwrap()[0].population, 180_000);
    assert_eq!(locations.cities.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_cities_resolve_by_abbreviation_and_skip_unknown_states() {
    let locations = Arc::new(InMemoryLocationRepository::default());
    let catalog = Arc::new(InMemoryCatalogRepository::default());
    let seeder = SeedServiceImpl::new(locations.clone(), catalog, 10);

    let dataset = SeedDataset {
        states: vec![state_record("Ohio", "OH")],
        cities: vec![
            city_record("Akron", None, Some("oh")),
            city_record("Toledo", Some("ohio"), None),
            city_record("Gotham", Some("new-gotham"), Some("NG")),
            city_record("Nowhere", None, None),
        ],
        ..Default::default()
    };

    let report = seeder.run(&dataset).await.unwrap();
    assert_eq!(report.cities.inserted, 2);
    assert_eq!(report.skipped_cities, 2);
    assert_eq!(report.stored_cities, 2);
}

/// Fails the upsert of one named city.
struct FlakyLocationRepository {
    inner: InMemoryLocationRepository,
    failing_slug: &'static str,
}

#[async_trait]
impl LocationRepository for FlakyLocationRepository {
    async fn upsert_state(&self, state: &State) -> RepositoryResult<(UpsertOutcome, ObjectId)> {
        self.inner.upsert_state(state).await
    }

    async fn upsert_city(&self, city: &City) -> RepositoryResult<UpsertOutcome> {
        if city.slug == self.failing_slug {
            return Err(RepositoryError::DatabaseError("write conflict".to_string()));
        }
        self.inner.upsert_city(city).await
    }

    async fn find_state_by_slug(&self, slug: &str) -> RepositoryResult<Option<State>> {
        self.inner.find_state_by_slug(slug).await
    }

    async fn find_state_by_abbreviation(&self, abbreviation: &str) -> RepositoryResult<Option<State>> {
        self.inner.find_state_by_abbreviation(abbreviation).await
    }

    async fn find_state_by_id(&self, id: ObjectId) -> RepositoryResult<Option<State>> {
        self.inner.find_state_by_id(id).await
    }

    async fn find_city(&self, state_id: ObjectId, slug: &str) -> RepositoryResult<Option<City>> {
        self.inner.find_city(state_id, slug).await
    }

    async fn find_city_by_id(&self, id: ObjectId) -> RepositoryResult<Option<City>> {
        self.inner.find_city_by_id(id).await
    }

    async fn list_states(&self) -> RepositoryResult<Vec<State>> {
        self.inner.list_states().await
    }

    async fn list_cities_by_state(&self, state_id: ObjectId, limit: Option<i64>) -> RepositoryResult<Vec<City>> {
        self.inner.list_cities_by_state(state_id, limit).await
    }

    async fn list_cities(&self, limit: i64) -> RepositoryResult<Vec<City>> {
        self.inner.list_cities(limit).await
    }

    async fn count_cities(&self) -> RepositoryResult<u64> {
        self.inner.count_cities().await
    }
}

#[tokio::test]
async fn test_failed_batch_aborts_after_settling() {
    let locations = Arc::new(FlakyLocationRepository {
        inner: InMemoryLocationRepository::default(),
        failing_slug: "dayton",
    });
    let catalog = Arc::new(InMemoryCatalogRepository::default());
    let seeder = SeedServiceImpl::new(locations.clone(), catalog, 2);

    let dataset = SeedDataset {
        states: vec![state_record("Ohio", "OH")],
        cities: vec![
            city_record("Akron", Some("ohio"), None),
            city_record("Canton", Some("ohio"), None),
            city_record("Dayton", Some("ohio"), None),
            city_record("Parma", Some("ohio"), None),
            city_record("Toledo", Some("ohio"), None),
        ],
        ..Default::default()
    };

    let err = seeder.run(&dataset).await.unwrap_err();
    assert!(matches!(err, ServiceError::InternalError(_)));

    // Batch two settled (Parma stored), batch three never ran
    let slugs: Vec<String> = locations.inner.cities.lock().unwrap().iter().map(|c| c.slug.clone()).collect();
    assert_eq!(slugs, vec!["akron", "canton", "parma"]);
}
