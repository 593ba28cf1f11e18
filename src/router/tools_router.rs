use axum::{routing::get, Router};
use std::sync::Arc;

use crate::handler::tools_handler::{availability_handler, recommendation_handler};
use crate::util::availability::AvailabilityChecker;

pub fn tools_router(checker: Arc<dyn AvailabilityChecker>) -> Router {
    Router::new()
        .route("/api/recommendation", get(recommendation_handler))
        .route("/api/availability", get(availability_handler))
        .with_state(checker)
}
