use crate::model::quote::{Quote, STATUS_PENDING};
use crate::repository::mongo::{self, QUOTES};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use chrono::{SecondsFormat, Utc};
use mongodb::options::FindOptions;
use mongodb::{Collection, Database};
use tracing::{error, info};

#[async_trait]
pub trait QuoteRepository: Send + Sync {
    /// Stores a new lead, assigning its id, status and creation time.
    async fn create(&self, quote: Quote) -> RepositoryResult<Quote>;
    /// Newest first, optionally filtered by status.
    async fn list(&self, status: Option<&str>, offset: u64, limit: u64) -> RepositoryResult<Vec<Quote>>;
    async fn count(&self, status: Option<&str>) -> RepositoryResult<u64>;
}

/// Fills the fields the store owns. Shared with other implementations so
/// every backend stamps quotes the same way.
pub fn prepare_new_quote(mut quote: Quote) -> Quote {
    quote.id = Some(ObjectId::new());
    if quote.status.trim().is_empty() {
        quote.status = STATUS_PENDING.to_string();
    }
    quote.created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    quote
}

fn status_filter(status: Option<&str>) -> Document {
    match status {
        Some(status) => doc! { "status": status },
        None => doc! {},
    }
}

pub struct MongoQuoteRepository {
    collection: Collection<Quote>,
}

impl MongoQuoteRepository {
    pub fn new(db: &Database) -> Self {
        MongoQuoteRepository { collection: db.collection::<Quote>(QUOTES) }
    }
}

#[async_trait]
impl QuoteRepository for MongoQuoteRepository {
    #[tracing::instrument(skip(self, quote), fields(zip = %quote.zip_code, size = %quote.dumpster_size))]
    async fn create(&self, quote: Quote) -> RepositoryResult<Quote> {
        info!("Creating new quote");
        let new_quote = prepare_new_quote(quote);

        match self.collection.insert_one(&new_quote, None).await {
            Ok(_) => {
                info!(quote_id = ?new_quote.id, "Quote created successfully");
                Ok(new_quote)
            }
            Err(e) => {
                error!("Failed to create quote: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self, status: Option<&str>, offset: u64, limit: u64) -> RepositoryResult<Vec<Quote>> {
        info!("Listing quotes with offset: {}, limit: {}", offset, limit);
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .skip(offset)
            .limit(limit as i64)
            .build();

        match self.collection.find(status_filter(status), options).await {
            Ok(cursor) => {
                let quotes = mongo::collect(cursor).await?;
                info!("Fetched {} quotes", quotes.len());
                Ok(quotes)
            }
            Err(e) => {
                error!("Failed to list quotes: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn count(&self, status: Option<&str>) -> RepositoryResult<u64> {
        match self.collection.count_documents(status_filter(status), None).await {
            Ok(count) => Ok(count),
            Err(e) => {
                error!("Failed to count quotes: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn blank_quote() -> Quote {
        Quote {
            id: None,
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555-123-4567".to_string(),
            address: "123 Main St".to_string(),
            zip_code: "90001".to_string(),
            city_id: None,
            dumpster_size: "20-yard".to_string(),
            project_type: "home-renovation".to_string(),
            service_type: "residential".to_string(),
            rental_duration: "7-days".to_string(),
            delivery_date: NaiveDate::from_ymd_opt(2030, 1, 15).unwrap(),
            message: None,
            status: String::new(),
            created_at: String::new(),
        }
    }

    #[test]
    fn test_prepare_sets_store_fields() {
        let quote = prepare_new_quote(blank_quote());
        assert!(quote.id.is_some());
        assert_eq!(quote.status, "pending");
        assert!(quote.created_at.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&quote.created_at).is_ok());
    }

    #[test]
    fn test_stored_shape_uses_camel_case() {
        let doc = bson::to_document(&prepare_new_quote(blank_quote())).unwrap();
        assert_eq!(doc.get_str("zipCode").unwrap(), "90001");
        assert_eq!(doc.get_str("deliveryDate").unwrap(), "2030-01-15");
        assert!(doc.get("cityId").is_none());
    }
}
