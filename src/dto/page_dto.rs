use serde::Serialize;

use crate::model::{city::City, dumpster_size::DumpsterSize, service_type::ServiceType, state::State};

/// A catalog size with its price adjusted for the page's state.
#[derive(Debug, Clone, Serialize)]
pub struct PricedSize {
    pub size: DumpsterSize,
    pub local_price: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NearbyCity {
    pub city: City,
    pub distance_miles: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
    pub states: Vec<State>,
    pub sizes: Vec<DumpsterSize>,
    pub services: Vec<ServiceType>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatePage {
    pub state: State,
    pub top_cities: Vec<City>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CityPage {
    pub state: State,
    pub city: City,
    pub sizes: Vec<PricedSize>,
    pub services: Vec<ServiceType>,
    pub nearby: Vec<NearbyCity>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CitySizePage {
    pub state: State,
    pub city: City,
    pub size: PricedSize,
    pub other_sizes: Vec<PricedSize>,
    pub services: Vec<ServiceType>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CityServicePage {
    pub state: State,
    pub city: City,
    pub service: ServiceType,
    pub other_services: Vec<ServiceType>,
    pub sizes: Vec<PricedSize>,
}

/// What `/{state}/{city}/{slug}` resolved to.
#[derive(Debug, Clone, Serialize)]
pub enum CitySubpage {
    Size(CitySizePage),
    Service(CityServicePage),
}

/// A page that can be generated ahead of request time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagePath {
    State { state: String },
    City { state: String, city: String },
    CityService { state: String, city: String, service: String },
    CitySize { state: String, city: String, size: String },
}

impl PagePath {
    pub fn path(&self) -> String {
        match self {
            PagePath::State { state } => format!("/{}", state),
            PagePath::City { state, city } => format!("/{}/{}", state, city),
            PagePath::CityService { state, city, service } => format!("/{}/{}/{}", state, city, service),
            PagePath::CitySize { state, city, size } => format!("/{}/{}/{}", state, city, size),
        }
    }

    /// Sitemap priority by depth.
    pub fn priority(&self) -> &'static str {
        match self {
            PagePath::State { .. } => "0.8",
            PagePath::City { .. } => "0.7",
            PagePath::CityService { .. } | PagePath::CitySize { .. } => "0.6",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_and_priorities() {
        let city = PagePath::City { state: "texas".into(), city: "austin".into() };
        assert_eq!(city.path(), "/texas/austin");
        assert_eq!(city.priority(), "0.7");

        let leaf = PagePath::CitySize { state: "texas".into(), city: "austin".into(), size: "20-yard-dumpster".into() };
        assert_eq!(leaf.path(), "/texas/austin/20-yard-dumpster");
        assert_eq!(leaf.priority(), "0.6");
    }
}
