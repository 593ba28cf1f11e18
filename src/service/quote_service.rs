use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{error, info, instrument, warn};

use crate::dto::quote_dto::{CityRef, QuoteDto, QuoteListResponse, QuoteView, StateRef};
use crate::model::quote::{Quote, STATUS_PENDING};
use crate::repository::location_repo::LocationRepository;
use crate::repository::quote_repo::QuoteRepository;
use crate::util::error::ServiceError;

/// Sends the customer a confirmation once their quote is stored.
#[async_trait]
pub trait QuoteNotifier: Send + Sync {
	async fn quote_received(&self, quote: &Quote) -> Result<(), String>;
}

#[async_trait]
pub trait QuoteService: Send + Sync {
	async fn register_quote(&self, quote_dto: QuoteDto) -> Result<Quote, ServiceError>;
	async fn list_quotes(&self, status: Option<&str>, offset: u64, limit: u64) -> Result<QuoteListResponse, ServiceError>;
}

pub struct QuoteServiceImpl {
	pub quote_repo: Arc<dyn QuoteRepository>,
	pub location_repo: Arc<dyn LocationRepository>,
	pub notifier: Option<Arc<dyn QuoteNotifier>>,
}

impl QuoteServiceImpl {
	pub fn new(
		quote_repo: Arc<dyn QuoteRepository>,
		location_repo: Arc<dyn LocationRepository>,
		notifier: Option<Arc<dyn QuoteNotifier>>,
	) -> Self {
		QuoteServiceImpl { quote_repo, location_repo, notifier }
	}

	/// A city id that is malformed or points nowhere is dropped.
	async fn resolve_city(&self, raw: Option<&str>) -> Result<Option<ObjectId>, ServiceError> {
		let Some(raw) = raw else {
			return Ok(None);
		};
		let Ok(id) = ObjectId::parse_str(raw.trim()) else {
			warn!("Ignoring malformed city id: {}", raw);
			return Ok(None);
		};
		match self.location_repo.find_city_by_id(id).await? {
			Some(city) => Ok(city.id),
			None => {
				warn!("Ignoring unknown city id: {}", id);
				Ok(None)
			}
		}
	}

	async fn city_refs(&self, quotes: &[Quote]) -> Result<HashMap<ObjectId, CityRef>, ServiceError> {
		let mut refs = HashMap::new();
		let mut states: HashMap<ObjectId, Option<StateRef>> = HashMap::new();

		for city_id in quotes.iter().filter_map(|q| q.city_id) {
			if refs.contains_key(&city_id) {
				continue;
			}
			let Some(city) = self.location_repo.find_city_by_id(city_id).await? else {
				continue;
			};
			if !states.contains_key(&city.state_id) {
				let state = self.location_repo.find_state_by_id(city.state_id).await?.map(|s| StateRef {
					name: s.name,
					slug: s.slug,
					abbreviation: s.abbreviation,
				});
				states.insert(city.state_id, state);
			}
			let state = states.get(&city.state_id).cloned().flatten();
			refs.insert(city_id, CityRef { id: city_id.to_hex(), name: city.name, slug: city.slug, state });
		}
		Ok(refs)
	}
}

fn to_view(quote: Quote, cities: &HashMap<ObjectId, CityRef>) -> QuoteView {
	QuoteView {
		id: quote.id.map(|id| id.to_hex()).unwrap_or_default(),
		city: quote.city_id.and_then(|id| cities.get(&id).cloned()),
		name: quote.name,
		email: quote.email,
		phone: quote.phone,
		address: quote.address,
		zip_code: quote.zip_code,
		dumpster_size: quote.dumpster_size,
		project_type: quote.project_type,
		service_type: quote.service_type,
		rental_duration: quote.rental_duration,
		delivery_date: quote.delivery_date.format("%Y-%m-%d").to_string(),
		message: quote.message,
		status: quote.status,
		created_at: quote.created_at,
	}
}

#[async_trait]
impl QuoteService for QuoteServiceImpl {
	#[instrument(skip(self, quote_dto), fields(zip = %quote_dto.zip_code, size = %quote_dto.dumpster_size))]
	async fn register_quote(&self, quote_dto: QuoteDto) -> Result<Quote, ServiceError> {
		info!("Registering new quote");

		let city_id = self.resolve_city(quote_dto.city_id.as_deref()).await?;

		let quote = Quote {
			id: None,
			name: quote_dto.name,
			email: quote_dto.email,
			phone: quote_dto.phone,
			address: quote_dto.address,
			zip_code: quote_dto.zip_code,
			city_id,
			dumpster_size: quote_dto.dumpster_size,
			project_type: quote_dto.project_type,
			service_type: quote_dto.service_type,
			rental_duration: quote_dto.rental_duration,
			delivery_date: quote_dto.delivery_date,
			message: quote_dto.message,
			status: STATUS_PENDING.to_string(),
			created_at: String::new(),
		};

		let inserted = self.quote_repo.create(quote).await.map_err(|e| {
			error!("Failed to store quote: {}", e);
			ServiceError::from(e)
		})?;

		if let Some(notifier) = &self.notifier {
			if let Err(e) = notifier.quote_received(&inserted).await {
				// The lead is already stored; a mail failure must not fail the request
				error!(quote_id = ?inserted.id, "Failed to send quote confirmation: {}", e);
			}
		}

		info!(quote_id = ?inserted.id, "Quote registered successfully");
		Ok(inserted)
	}

	#[instrument(skip(self))]
	async fn list_quotes(&self, status: Option<&str>, offset: u64, limit: u64) -> Result<QuoteListResponse, ServiceError> {
		let quotes = self.quote_repo.list(status, offset, limit).await?;
		let total = self.quote_repo.count(status).await?;
		let cities = self.city_refs(&quotes).await?;
		let quotes = quotes.into_iter().map(|q| to_view(q, &cities)).collect();
		Ok(QuoteListResponse { quotes, total, limit, offset })
	}
}
