use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Bson};
use mongodb::options::FindOptions;
use mongodb::{Collection, Database};
use tracing::{debug, error, info, instrument};

use crate::model::{city::City, state::State};
use crate::repository::mongo::{self, UpsertOutcome, CITIES, STATES};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Upserts by slug and returns the stored state's id.
    async fn upsert_state(&self, state: &State) -> RepositoryResult<(UpsertOutcome, ObjectId)>;
    /// Upserts by `(state_id, slug)`.
    async fn upsert_city(&self, city: &City) -> RepositoryResult<UpsertOutcome>;
    async fn find_state_by_slug(&self, slug: &str) -> RepositoryResult<Option<State>>;
    async fn find_state_by_abbreviation(&self, abbreviation: &str) -> RepositoryResult<Option<State>>;
    async fn find_state_by_id(&self, id: ObjectId) -> RepositoryResult<Option<State>>;
    async fn find_city(&self, state_id: ObjectId, slug: &str) -> RepositoryResult<Option<City>>;
    async fn find_city_by_id(&self, id: ObjectId) -> RepositoryResult<Option<City>>;
    /// All states, alphabetical.
    async fn list_states(&self) -> RepositoryResult<Vec<State>>;
    /// Cities of one state, most populous first.
    async fn list_cities_by_state(&self, state_id: ObjectId, limit: Option<i64>) -> RepositoryResult<Vec<City>>;
    /// The first `limit` cities in storage order.
    async fn list_cities(&self, limit: i64) -> RepositoryResult<Vec<City>>;
    async fn count_cities(&self) -> RepositoryResult<u64>;
}

pub struct MongoLocationRepository {
    states: Collection<State>,
    cities: Collection<City>,
}

impl MongoLocationRepository {
    pub fn new(db: &Database) -> Self {
        MongoLocationRepository {
            states: db.collection::<State>(STATES),
            cities: db.collection::<City>(CITIES),
        }
    }

    async fn find_state(&self, filter: bson::Document) -> RepositoryResult<Option<State>> {
        self.states.find_one(filter, None).await.map_err(|e| {
            error!("Failed to fetch state: {}", e);
            RepositoryError::from(e)
        })
    }
}

#[async_trait]
impl LocationRepository for MongoLocationRepository {
    #[instrument(skip(self, state), fields(slug = %state.slug))]
    async fn upsert_state(&self, state: &State) -> RepositoryResult<(UpsertOutcome, ObjectId)> {
        let result = mongo::upsert(&self.states, doc! { "slug": &state.slug }, state).await?;
        let outcome = UpsertOutcome::from(&result);

        let id = match result.upserted_id {
            Some(Bson::ObjectId(id)) => id,
            _ => self
                .find_state(doc! { "slug": &state.slug })
                .await?
                .and_then(|s| s.id)
                .ok_or_else(|| RepositoryError::not_found(format!("State vanished after upsert: {}", state.slug)))?,
        };
        debug!("State {} upserted: {:?}", state.slug, outcome);
        Ok((outcome, id))
    }

    #[instrument(skip(self, city), fields(slug = %city.slug, state_id = %city.state_id))]
    async fn upsert_city(&self, city: &City) -> RepositoryResult<UpsertOutcome> {
        let filter = doc! { "stateId": city.state_id, "slug": &city.slug };
        let result = mongo::upsert(&self.cities, filter, city).await?;
        Ok(UpsertOutcome::from(&result))
    }

    #[instrument(skip(self))]
    async fn find_state_by_slug(&self, slug: &str) -> RepositoryResult<Option<State>> {
        self.find_state(doc! { "slug": slug }).await
    }

    #[instrument(skip(self))]
    async fn find_state_by_abbreviation(&self, abbreviation: &str) -> RepositoryResult<Option<State>> {
        self.find_state(doc! { "abbreviation": abbreviation.to_ascii_uppercase() }).await
    }

    #[instrument(skip(self))]
    async fn find_state_by_id(&self, id: ObjectId) -> RepositoryResult<Option<State>> {
        self.find_state(doc! { "_id": id }).await
    }

    #[instrument(skip(self))]
    async fn find_city(&self, state_id: ObjectId, slug: &str) -> RepositoryResult<Option<City>> {
        Ok(self.cities.find_one(doc! { "stateId": state_id, "slug": slug }, None).await?)
    }

    #[instrument(skip(self))]
    async fn find_city_by_id(&self, id: ObjectId) -> RepositoryResult<Option<City>> {
        Ok(self.cities.find_one(doc! { "_id": id }, None).await?)
    }

    #[instrument(skip(self))]
    async fn list_states(&self) -> RepositoryResult<Vec<State>> {
        let options = FindOptions::builder().sort(doc! { "name": 1 }).build();
        let cursor = self.states.find(None, options).await?;
        let states = mongo::collect(cursor).await?;
        info!("Fetched {} states", states.len());
        Ok(states)
    }

    #[instrument(skip(self))]
    async fn list_cities_by_state(&self, state_id: ObjectId, limit: Option<i64>) -> RepositoryResult<Vec<City>> {
        let options = FindOptions::builder()
            .sort(doc! { "population": -1, "name": 1 })
            .limit(limit)
            .build();
        let cursor = self.cities.find(doc! { "stateId": state_id }, options).await?;
        mongo::collect(cursor).await
    }

    #[instrument(skip(self))]
    async fn list_cities(&self, limit: i64) -> RepositoryResult<Vec<City>> {
        let options = FindOptions::builder().sort(doc! { "_id": 1 }).limit(limit).build();
        let cursor = self.cities.find(None, options).await?;
        mongo::collect(cursor).await
    }

    #[instrument(skip(self))]
    async fn count_cities(&self) -> RepositoryResult<u64> {
        Ok(self.cities.count_documents(None, None).await?)
    }
}
