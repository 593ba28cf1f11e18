use axum::{middleware, routing::post, Router};
use std::sync::Arc;

use crate::handler::contact_handler::contact_handler;
use crate::middlewares::rate_limit::rate_limit;
use crate::util::rate_limiter::RateLimiter;

pub fn contact_router(limiter: Arc<RateLimiter>) -> Router {
    Router::new().route(
        "/api/contact",
        post(contact_handler).layer(middleware::from_fn_with_state(limiter, rate_limit)),
    )
}
