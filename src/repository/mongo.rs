use bson::{doc, Document};
use futures::stream::StreamExt;
use mongodb::options::{IndexOptions, UpdateOptions};
use mongodb::results::UpdateResult;
use mongodb::{Client, Collection, Cursor, Database, IndexModel};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{error, info, instrument};

use crate::config::MongoConfig;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

pub const STATES: &str = "states";
pub const CITIES: &str = "cities";
pub const DUMPSTER_SIZES: &str = "dumpster_sizes";
pub const SERVICE_TYPES: &str = "service_types";
pub const QUOTES: &str = "quotes";

/// Builds the client once for the whole process and checks the server
/// answers before handing out the database handle.
#[instrument(skip(config), fields(database = %config.database))]
pub async fn connect(config: &MongoConfig) -> RepositoryResult<Database> {
    let client_options = config.client_options().await?;
    let client = Client::with_options(client_options)?;
    let db = client.database(&config.database);
    db.run_command(doc! { "ping": 1 }, None).await.map_err(|e| {
        error!("MongoDB ping failed: {}", e);
        RepositoryError::from(e)
    })?;
    info!("Connected to MongoDB");
    Ok(db)
}

/// Unique keys the upserts rely on, plus the listing sort index.
#[instrument(skip(db))]
pub async fn ensure_indexes(db: &Database) -> RepositoryResult<()> {
    let unique = || IndexOptions::builder().unique(true).build();

    db.collection::<Document>(STATES)
        .create_index(IndexModel::builder().keys(doc! { "slug": 1 }).options(unique()).build(), None)
        .await?;
    db.collection::<Document>(CITIES)
        .create_index(
            IndexModel::builder().keys(doc! { "stateId": 1, "slug": 1 }).options(unique()).build(),
            None,
        )
        .await?;
    db.collection::<Document>(DUMPSTER_SIZES)
        .create_index(IndexModel::builder().keys(doc! { "slug": 1 }).options(unique()).build(), None)
        .await?;
    db.collection::<Document>(SERVICE_TYPES)
        .create_index(IndexModel::builder().keys(doc! { "slug": 1 }).options(unique()).build(), None)
        .await?;
    db.collection::<Document>(QUOTES)
        .create_index(IndexModel::builder().keys(doc! { "status": 1, "createdAt": -1 }).build(), None)
        .await?;

    info!("MongoDB indexes ensured");
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
    Unchanged,
}

impl UpsertOutcome {
    pub fn classify(upserted: bool, modified_count: u64) -> Self {
        if upserted {
            UpsertOutcome::Inserted
        } else if modified_count > 0 {
            UpsertOutcome::Updated
        } else {
            UpsertOutcome::Unchanged
        }
    }
}

impl From<&UpdateResult> for UpsertOutcome {
    fn from(result: &UpdateResult) -> Self {
        UpsertOutcome::classify(result.upserted_id.is_some(), result.modified_count)
    }
}

/// Insert-or-update keyed by `filter`. Every field except `_id` is
/// overwritten on conflict.
pub async fn upsert<T>(collection: &Collection<T>, filter: Document, record: &T) -> RepositoryResult<UpdateResult>
where
    T: Serialize + Send + Sync,
{
    let mut fields = bson::to_document(record)?;
    fields.remove("_id");
    let options = UpdateOptions::builder().upsert(true).build();
    let result = collection
        .update_one(filter, doc! { "$set": fields }, options)
        .await?;
    Ok(result)
}

/// Drains a cursor, failing on the first undecodable document.
pub async fn collect<T>(mut cursor: Cursor<T>) -> RepositoryResult<Vec<T>>
where
    T: DeserializeOwned + Unpin + Send + Sync,
{
    let mut items = Vec::new();
    while let Some(item) = cursor.next().await {
        match item {
            Ok(item) => items.push(item),
            Err(e) => {
                error!("Failed to read document from cursor: {}", e);
                return Err(RepositoryError::serialization(format!("Failed to read document: {}", e)));
            }
        }
    }
    Ok(items)
}
