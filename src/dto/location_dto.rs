use serde::{Deserialize, Serialize};

/// One entry of `data/states.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateRecord {
    pub name: String,
    pub abbreviation: String,
    pub slug: String,
    pub population: i64,
}

/// One entry of `data/cities.json`. The state is referenced by slug or
/// abbreviation; a missing slug is derived from the name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityRecord {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub state_slug: Option<String>,
    #[serde(default)]
    pub state_abbr: Option<String>,
    pub population: i64,
    #[serde(default)]
    pub zip_codes: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
}
