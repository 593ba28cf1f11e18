use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::dto::page_dto::{
	CityPage, CityServicePage, CitySizePage, CitySubpage, HomePage, NearbyCity, PagePath, PricedSize, StatePage,
};
use crate::model::{city::City, dumpster_size::DumpsterSize, state::State};
use crate::repository::catalog_repo::CatalogRepository;
use crate::repository::location_repo::LocationRepository;
use crate::util::error::ServiceError;
use crate::util::geo::haversine_miles;
use crate::util::pricing::local_price;

pub const STATE_PAGE_CITY_LIMIT: i64 = 20;
pub const NEARBY_CITY_LIMIT: usize = 5;
/// Cities enumerated for ahead-of-time generation.
pub const STATIC_CITY_LIMIT: i64 = 500;

#[async_trait]
pub trait LocationService: Send + Sync {
	async fn home_page(&self) -> Result<HomePage, ServiceError>;
	async fn state_page(&self, state_slug: &str) -> Result<StatePage, ServiceError>;
	async fn city_page(&self, state_slug: &str, city_slug: &str) -> Result<CityPage, ServiceError>;
	/// Resolves the third path segment: a size slug first, then a service slug.
	async fn city_subpage(&self, state_slug: &str, city_slug: &str, slug: &str) -> Result<CitySubpage, ServiceError>;
	/// Every page that can be generated ahead of time.
	async fn static_params(&self) -> Result<Vec<PagePath>, ServiceError>;
}

pub struct LocationServiceImpl {
	pub location_repo: Arc<dyn LocationRepository>,
	pub catalog_repo: Arc<dyn CatalogRepository>,
}

impl LocationServiceImpl {
	pub fn new(location_repo: Arc<dyn LocationRepository>, catalog_repo: Arc<dyn CatalogRepository>) -> Self {
		LocationServiceImpl { location_repo, catalog_repo }
	}

	async fn state(&self, state_slug: &str) -> Result<State, ServiceError> {
		self.location_repo
			.find_state_by_slug(state_slug)
			.await?
			.ok_or_else(|| ServiceError::NotFound(format!("State not found: {}", state_slug)))
	}

	async fn state_and_city(&self, state_slug: &str, city_slug: &str) -> Result<(State, City), ServiceError> {
		let state = self.state(state_slug).await?;
		let state_id = state
			.id
			.ok_or_else(|| ServiceError::InternalError(format!("State without id: {}", state.slug)))?;
		let city = self
			.location_repo
			.find_city(state_id, city_slug)
			.await?
			.ok_or_else(|| ServiceError::NotFound(format!("City not found: {}/{}", state_slug, city_slug)))?;
		Ok((state, city))
	}

	async fn priced_sizes(&self, state_slug: &str) -> Result<Vec<PricedSize>, ServiceError> {
		let sizes = self.catalog_repo.list_sizes().await?;
		Ok(sizes.into_iter().map(|size| price(size, state_slug)).collect())
	}

	async fn nearby(&self, city: &City) -> Result<Vec<NearbyCity>, ServiceError> {
		let neighbours = self.location_repo.list_cities_by_state(city.state_id, None).await?;
		Ok(nearest(city, neighbours, NEARBY_CITY_LIMIT))
	}
}

fn price(size: DumpsterSize, state_slug: &str) -> PricedSize {
	let local_price = local_price(size.base_price, state_slug);
	PricedSize { size, local_price }
}

/// The `limit` closest cities to `origin`, excluding itself.
pub fn nearest(origin: &City, candidates: Vec<City>, limit: usize) -> Vec<NearbyCity> {
	let mut nearby: Vec<NearbyCity> = candidates
		.into_iter()
		.filter(|c| c.slug != origin.slug)
		.map(|c| NearbyCity {
			distance_miles: haversine_miles(origin.latitude, origin.longitude, c.latitude, c.longitude),
			city: c,
		})
		.collect();
	nearby.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
	nearby.truncate(limit);
	nearby
}

#[async_trait]
impl LocationService for LocationServiceImpl {
	#[instrument(skip(self))]
	async fn home_page(&self) -> Result<HomePage, ServiceError> {
		Ok(HomePage {
			states: self.location_repo.list_states().await?,
			sizes: self.catalog_repo.list_sizes().await?,
			services: self.catalog_repo.list_services().await?,
		})
	}

	#[instrument(skip(self))]
	async fn state_page(&self, state_slug: &str) -> Result<StatePage, ServiceError> {
		let state = self.state(state_slug).await?;
		let top_cities = match state.id {
			Some(id) => self.location_repo.list_cities_by_state(id, Some(STATE_PAGE_CITY_LIMIT)).await?,
			None => Vec::new(),
		};
		debug!("State page {} lists {} cities", state.slug, top_cities.len());
		Ok(StatePage { state, top_cities })
	}

	#[instrument(skip(self))]
	async fn city_page(&self, state_slug: &str, city_slug: &str) -> Result<CityPage, ServiceError> {
		let (state, city) = self.state_and_city(state_slug, city_slug).await?;
		let sizes = self.priced_sizes(&state.slug).await?;
		let services = self.catalog_repo.list_services().await?;
		let nearby = self.nearby(&city).await?;
		Ok(CityPage { state, city, sizes, services, nearby })
	}

	#[instrument(skip(self))]
	async fn city_subpage(&self, state_slug: &str, city_slug: &str, slug: &str) -> Result<CitySubpage, ServiceError> {
		let (state, city) = self.state_and_city(state_slug, city_slug).await?;

		if let Some(size) = self.catalog_repo.find_size_by_slug(slug).await? {
			let other_sizes = self
				.priced_sizes(&state.slug)
				.await?
				.into_iter()
				.filter(|p| p.size.slug != size.slug)
				.collect();
			let services = self.catalog_repo.list_services().await?;
			let size = price(size, &state.slug);
			return Ok(CitySubpage::Size(CitySizePage { state, city, size, other_sizes, services }));
		}

		if let Some(service) = self.catalog_repo.find_service_by_slug(slug).await? {
			let other_services = self
				.catalog_repo
				.list_services()
				.await?
				.into_iter()
				.filter(|s| s.slug != service.slug)
				.collect();
			let sizes = self.priced_sizes(&state.slug).await?;
			return Ok(CitySubpage::Service(CityServicePage { state, city, service, other_services, sizes }));
		}

		Err(ServiceError::NotFound(format!("No size or service named {}", slug)))
	}

	#[instrument(skip(self))]
	async fn static_params(&self) -> Result<Vec<PagePath>, ServiceError> {
		let states = self.location_repo.list_states().await?;
		let cities = self.location_repo.list_cities(STATIC_CITY_LIMIT).await?;
		let sizes = self.catalog_repo.list_sizes().await?;
		let services = self.catalog_repo.list_services().await?;

		let state_slugs: HashMap<_, _> = states
			.iter()
			.filter_map(|s| s.id.map(|id| (id, s.slug.clone())))
			.collect();

		let mut paths: Vec<PagePath> = states
			.iter()
			.map(|s| PagePath::State { state: s.slug.clone() })
			.collect();

		for city in &cities {
			let Some(state) = state_slugs.get(&city.state_id) else {
				continue;
			};
			paths.push(PagePath::City { state: state.clone(), city: city.slug.clone() });
			for service in &services {
				paths.push(PagePath::CityService {
					state: state.clone(),
					city: city.slug.clone(),
					service: service.slug.clone(),
				});
			}
			for size in &sizes {
				paths.push(PagePath::CitySize { state: state.clone(), city: city.slug.clone(), size: size.slug.clone() });
			}
		}

		info!("Enumerated {} static pages", paths.len());
		Ok(paths)
	}
}
