use async_trait::async_trait;
use bson::doc;
use mongodb::options::FindOptions;
use mongodb::{Collection, Database};
use tracing::instrument;

use crate::model::{dumpster_size::DumpsterSize, service_type::ServiceType};
use crate::repository::mongo::{self, UpsertOutcome, DUMPSTER_SIZES, SERVICE_TYPES};
use crate::repository::repository_error::RepositoryResult;

/// Static reference data: dumpster sizes and service types.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn upsert_size(&self, size: &DumpsterSize) -> RepositoryResult<UpsertOutcome>;
    async fn upsert_service(&self, service: &ServiceType) -> RepositoryResult<UpsertOutcome>;
    async fn find_size_by_slug(&self, slug: &str) -> RepositoryResult<Option<DumpsterSize>>;
    async fn find_service_by_slug(&self, slug: &str) -> RepositoryResult<Option<ServiceType>>;
    /// Smallest first.
    async fn list_sizes(&self) -> RepositoryResult<Vec<DumpsterSize>>;
    /// In seed order.
    async fn list_services(&self) -> RepositoryResult<Vec<ServiceType>>;
}

pub struct MongoCatalogRepository {
    sizes: Collection<DumpsterSize>,
    services: Collection<ServiceType>,
}

impl MongoCatalogRepository {
    pub fn new(db: &Database) -> Self {
        MongoCatalogRepository {
            sizes: db.collection::<DumpsterSize>(DUMPSTER_SIZES),
            services: db.collection::<ServiceType>(SERVICE_TYPES),
        }
    }
}

#[async_trait]
impl CatalogRepository for MongoCatalogRepository {
    #[instrument(skip(self, size), fields(slug = %size.slug))]
    async fn upsert_size(&self, size: &DumpsterSize) -> RepositoryResult<UpsertOutcome> {
        let result = mongo::upsert(&self.sizes, doc! { "slug": &size.slug }, size).await?;
        Ok(UpsertOutcome::from(&result))
    }

    #[instrument(skip(self, service), fields(slug = %service.slug))]
    async fn upsert_service(&self, service: &ServiceType) -> RepositoryResult<UpsertOutcome> {
        let result = mongo::upsert(&self.services, doc! { "slug": &service.slug }, service).await?;
        Ok(UpsertOutcome::from(&result))
    }

    #[instrument(skip(self))]
    async fn find_size_by_slug(&self, slug: &str) -> RepositoryResult<Option<DumpsterSize>> {
        Ok(self.sizes.find_one(doc! { "slug": slug }, None).await?)
    }

    #[instrument(skip(self))]
    async fn find_service_by_slug(&self, slug: &str) -> RepositoryResult<Option<ServiceType>> {
        Ok(self.services.find_one(doc! { "slug": slug }, None).await?)
    }

    #[instrument(skip(self))]
    async fn list_sizes(&self) -> RepositoryResult<Vec<DumpsterSize>> {
        let options = FindOptions::builder().sort(doc! { "size": 1 }).build();
        mongo::collect(self.sizes.find(None, options).await?).await
    }

    #[instrument(skip(self))]
    async fn list_services(&self) -> RepositoryResult<Vec<ServiceType>> {
        let options = FindOptions::builder().sort(doc! { "_id": 1 }).build();
        mongo::collect(self.services.find(None, options).await?).await
    }
}
