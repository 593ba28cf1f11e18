use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A US state. Keyed by `slug`; written only by the seed routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub abbreviation: String,
    pub slug: String,
    pub population: i64,
}
