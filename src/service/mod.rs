pub mod location_service;
pub mod quote_service;
pub mod seed_service;
