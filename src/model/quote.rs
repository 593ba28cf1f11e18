use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

pub const STATUS_PENDING: &str = "pending";

/// A submitted lead. Created by the intake endpoint and never updated by
/// the public site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub zip_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_id: Option<ObjectId>,
    pub dumpster_size: String,
    pub project_type: String,
    pub service_type: String,
    pub rental_duration: String,
    /// Calendar date, stored as `YYYY-MM-DD`
    pub delivery_date: chrono::NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub status: String,
    /// RFC 3339 UTC with millisecond precision so it sorts as text
    pub created_at: String,
}
