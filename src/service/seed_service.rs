use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use futures::future::join_all;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::dto::location_dto::{CityRecord, StateRecord};
use crate::model::{city::City, dumpster_size::DumpsterSize, service_type::ServiceType, state::State};
use crate::repository::catalog_repo::CatalogRepository;
use crate::repository::location_repo::LocationRepository;
use crate::repository::mongo::UpsertOutcome;
use crate::repository::repository_error::RepositoryError;
use crate::util::error::ServiceError;
use crate::util::slug::slugify;

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
	#[error("Failed to read {path}: {source}")]
	Io { path: PathBuf, source: std::io::Error },

	#[error("Failed to parse {path}: {source}")]
	Parse { path: PathBuf, source: serde_json::Error },
}

/// The static JSON files under the data directory.
#[derive(Debug, Clone, Default)]
pub struct SeedDataset {
	pub states: Vec<StateRecord>,
	pub cities: Vec<CityRecord>,
	pub sizes: Vec<DumpsterSize>,
	pub services: Vec<ServiceType>,
}

fn read_json<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<T, DatasetError> {
	let path = dir.join(file);
	let raw = fs::read_to_string(&path).map_err(|source| DatasetError::Io { path: path.clone(), source })?;
	serde_json::from_str(&raw).map_err(|source| DatasetError::Parse { path, source })
}

impl SeedDataset {
	pub fn load(dir: &Path) -> Result<Self, DatasetError> {
		let dataset = SeedDataset {
			states: read_json(dir, "states.json")?,
			cities: read_json(dir, "cities.json")?,
			sizes: read_json(dir, "dumpster_sizes.json")?,
			services: read_json(dir, "service_types.json")?,
		};
		info!(
			states = dataset.states.len(),
			cities = dataset.cities.len(),
			sizes = dataset.sizes.len(),
			services = dataset.services.len(),
			"Loaded seed dataset from {}",
			dir.display()
		);
		Ok(dataset)
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UpsertTally {
	pub inserted: usize,
	pub updated: usize,
	pub unchanged: usize,
}

impl UpsertTally {
	fn record(&mut self, outcome: UpsertOutcome) {
		match outcome {
			UpsertOutcome::Inserted => self.inserted += 1,
			UpsertOutcome::Updated => self.updated += 1,
			UpsertOutcome::Unchanged => self.unchanged += 1,
		}
	}

	pub fn total(&self) -> usize {
		self.inserted + self.updated + self.unchanged
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
	pub sizes: UpsertTally,
	pub services: UpsertTally,
	pub states: UpsertTally,
	pub cities: UpsertTally,
	/// Cities whose state could not be resolved
	pub skipped_cities: usize,
	/// Cities in the store once the run finished, including ones from earlier runs
	pub stored_cities: u64,
}

#[async_trait]
pub trait SeedService: Send + Sync {
	async fn run(&self, dataset: &SeedDataset) -> Result<SeedReport, ServiceError>;
}

pub struct SeedServiceImpl {
	pub location_repo: Arc<dyn LocationRepository>,
	pub catalog_repo: Arc<dyn CatalogRepository>,
	pub batch_size: usize,
}

impl SeedServiceImpl {
	pub fn new(
		location_repo: Arc<dyn LocationRepository>,
		catalog_repo: Arc<dyn CatalogRepository>,
		batch_size: usize,
	) -> Self {
		SeedServiceImpl { location_repo, catalog_repo, batch_size: batch_size.max(1) }
	}

	async fn resolve_state(
		&self,
		record: &CityRecord,
		by_slug: &HashMap<String, ObjectId>,
		by_abbr: &HashMap<String, ObjectId>,
	) -> Result<Option<ObjectId>, ServiceError> {
		if let Some(slug) = record.state_slug.as_deref() {
			if let Some(id) = by_slug.get(slug) {
				return Ok(Some(*id));
			}
			if let Some(state) = self.location_repo.find_state_by_slug(slug).await? {
				return Ok(state.id);
			}
		}
		if let Some(abbr) = record.state_abbr.as_deref() {
			let abbr = abbr.to_ascii_uppercase();
			if let Some(id) = by_abbr.get(&abbr) {
				return Ok(Some(*id));
			}
			if let Some(state) = self.location_repo.find_state_by_abbreviation(&abbr).await? {
				return Ok(state.id);
			}
		}
		Ok(None)
	}
}

fn city_from_record(record: &CityRecord, state_id: ObjectId) -> City {
	let slug = record
		.slug
		.as_deref()
		.filter(|s| !s.is_empty())
		.map(str::to_string)
		.unwrap_or_else(|| slugify(&record.name));
	City {
		id: None,
		name: record.name.clone(),
		slug,
		state_id,
		population: record.population,
		zip_codes: record.zip_codes.clone(),
		latitude: record.latitude,
		longitude: record.longitude,
	}
}

#[async_trait]
impl SeedService for SeedServiceImpl {
	#[instrument(skip(self, dataset), fields(batch_size = self.batch_size))]
	async fn run(&self, dataset: &SeedDataset) -> Result<SeedReport, ServiceError> {
		let mut report = SeedReport::default();

		for size in &dataset.sizes {
			report.sizes.record(self.catalog_repo.upsert_size(size).await?);
		}
		info!("Seeded dumpster sizes: {:?}", report.sizes);

		for service in &dataset.services {
			report.services.record(self.catalog_repo.upsert_service(service).await?);
		}
		info!("Seeded service types: {:?}", report.services);

		let mut by_slug = HashMap::new();
		let mut by_abbr = HashMap::new();
		for record in &dataset.states {
			let state = State {
				id: None,
				name: record.name.clone(),
				abbreviation: record.abbreviation.to_ascii_uppercase(),
				slug: record.slug.clone(),
				population: record.population,
			};
			let (outcome, id) = self.location_repo.upsert_state(&state).await?;
			report.states.record(outcome);
			by_slug.insert(state.slug, id);
			by_abbr.insert(state.abbreviation, id);
		}
		info!("Seeded states: {:?}", report.states);

		let mut cities = Vec::with_capacity(dataset.cities.len());
		for record in &dataset.cities {
			match self.resolve_state(record, &by_slug, &by_abbr).await? {
				Some(state_id) => cities.push(city_from_record(record, state_id)),
				None => {
					warn!("Skipping city {}: state not found", record.name);
					report.skipped_cities += 1;
				}
			}
		}

		for (index, batch) in cities.chunks(self.batch_size).enumerate() {
			let results = join_all(batch.iter().map(|city| self.location_repo.upsert_city(city))).await;
			let mut first_error: Option<RepositoryError> = None;
			for result in results {
				match result {
					Ok(outcome) => report.cities.record(outcome),
					Err(e) => {
						error!("City upsert failed in batch {}: {}", index, e);
						first_error.get_or_insert(e);
					}
				}
			}
			if let Some(e) = first_error {
				return Err(e.into());
			}
			info!("Seeded city batch {} ({} cities)", index + 1, batch.len());
		}

		report.stored_cities = self.location_repo.count_cities().await?;
		info!(
			sizes = report.sizes.total(),
			services = report.services.total(),
			states = report.states.total(),
			cities = report.cities.total(),
			skipped = report.skipped_cities,
			stored_cities = report.stored_cities,
			"Seeding finished"
		);
		Ok(report)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_city_slug_derived_from_name() {
		let record = CityRecord {
			name: "San Luis Obispo".to_string(),
			slug: None,
			state_slug: Some("california".to_string()),
			state_abbr: None,
			population: 47000,
			zip_codes: vec!["93401".to_string()],
			latitude: 35.28,
			longitude: -120.66,
		};
		let city = city_from_record(&record, ObjectId::new());
		assert_eq!(city.slug, "san-luis-obispo");
		assert_eq!(city.zip_codes, vec!["93401"]);
	}

	#[test]
	fn test_load_missing_dir_reports_path() {
		let err = SeedDataset::load(Path::new("/definitely/not/here")).unwrap_err();
		assert!(err.to_string().contains("states.json"));
	}
}
