use axum::{routing::get, Router};
use std::sync::Arc;

use crate::handler::page_handler::{
    city_handler, city_subpage_handler, contact_page_handler, health_handler, home_handler, not_found_handler,
    quote_page_handler, service_areas_handler, sitemap_handler, state_handler, PageState,
};

pub fn page_router(state: Arc<PageState>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
        .route("/quote", get(quote_page_handler))
        .route("/contact", get(contact_page_handler))
        .route("/service-areas", get(service_areas_handler))
        .route("/sitemap.xml", get(sitemap_handler))
        .route("/{state}", get(state_handler))
        .route("/{state}/{city}", get(city_handler))
        .route("/{state}/{city}/{slug}", get(city_subpage_handler))
        .fallback(not_found_handler)
        .with_state(state)
}
