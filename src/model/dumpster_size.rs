use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DumpsterSize {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Capacity in cubic yards: 10, 20, 30 or 40
    pub size: u32,
    pub name: String,
    pub slug: String,
    pub dimensions: String,
    pub capacity: String,
    pub base_price: f64,
    pub description: String,
    #[serde(default)]
    pub ideal_for: Vec<String>,
    /// Included weight allowance, e.g. "2 tons"
    pub weight: String,
}
