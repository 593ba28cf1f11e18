use axum::{middleware, routing::{get, post}, Router};
use std::sync::Arc;

use crate::handler::quote_handler::{create_quote_handler, list_quotes_handler};
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};
use crate::middlewares::rate_limit::rate_limit;
use crate::service::quote_service::QuoteServiceImpl;
use crate::util::rate_limiter::RateLimiter;

pub fn quote_router(
    service: Arc<QuoteServiceImpl>,
    limiter: Arc<RateLimiter>,
    admin_auth_state: Arc<AdminAuthState>,
) -> Router {
    // Public submission, rate limited per client
    let submit = post(create_quote_handler).layer(middleware::from_fn_with_state(limiter, rate_limit));

    // Admin listing
    let list = get(list_quotes_handler).layer(middleware::from_fn_with_state(admin_auth_state, admin_auth));

    Router::new()
        .route("/api/quote", submit.merge(list))
        .with_state(service)
}
