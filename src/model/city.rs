use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A city within a state. `(state_id, slug)` is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub slug: String,
    pub state_id: ObjectId,
    pub population: i64,
    #[serde(default)]
    pub zip_codes: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
}
