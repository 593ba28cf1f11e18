use axum::{body::Body, extract::State, http::Request, middleware::Next, response::{IntoResponse, Response}};
use std::sync::Arc;
use tracing::warn;

use crate::util::error::{HandlerError, HandlerErrorKind};

/// Static bearer token for the administrative listing. `None` leaves the
/// routes open.
pub struct AdminAuthState {
    pub api_token: Option<String>,
}

fn bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
}

pub async fn admin_auth(
    State(state): State<Arc<AdminAuthState>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(expected) = state.api_token.as_deref() else {
        return next.run(req).await;
    };

    match bearer_token(&req) {
        Some(token) if token == expected => next.run(req).await,
        _ => {
            warn!(path = %req.uri().path(), "Rejected admin request without a valid token");
            HandlerError::new(HandlerErrorKind::Unauthorized, "Unauthorized", "A valid admin token is required")
                .into_response()
        }
    }
}
