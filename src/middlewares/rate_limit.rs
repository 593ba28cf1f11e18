use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{error, warn};

use crate::util::error::{HandlerError, HandlerErrorKind};
use crate::util::rate_limiter::{RateLimitDecision, RateLimiter};

/// First `X-Forwarded-For` entry, then `X-Real-IP`, else "unknown".
pub fn client_ip(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next().map(str::trim).filter(|s| !s.is_empty()) {
            return first.to_string();
        }
    }
    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }
    "unknown".to_string()
}

fn set_header(headers: &mut HeaderMap, name: &'static str, value: impl std::fmt::Display) {
    if let Ok(value) = HeaderValue::from_str(&value.to_string()) {
        headers.insert(HeaderName::from_static(name), value);
    }
}

fn apply_headers(response: &mut Response, decision: &RateLimitDecision) {
    let headers = response.headers_mut();
    set_header(headers, "x-ratelimit-limit", decision.limit);
    set_header(headers, "x-ratelimit-remaining", decision.remaining);
    set_header(headers, "x-ratelimit-reset", decision.reset_at_ms);
}

pub async fn rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let client = client_ip(req.headers());

    let decision = match limiter.check(&client).await {
        Ok(decision) => decision,
        Err(e) => {
            // Counter store is down: let the request through
            error!(limiter = limiter.name, "Rate limit check failed: {}", e);
            return next.run(req).await;
        }
    };

    if !decision.allowed {
        warn!(limiter = limiter.name, client = %client, "Rate limit exceeded");
        let mut response = HandlerError::new(
            HandlerErrorKind::TooManyRequests,
            "Too many requests",
            format!("Rate limit exceeded. Please try again in {} seconds.", decision.retry_after_secs),
        )
        .into_response();
        apply_headers(&mut response, &decision);
        set_header(response.headers_mut(), "retry-after", decision.retry_after_secs);
        return response;
    }

    let mut response = next.run(req).await;
    apply_headers(&mut response, &decision);
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_ip_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.5, 10.0.0.1"));
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.2"));
        assert_eq!(client_ip(&headers), "203.0.113.5");
    }

    #[test]
    fn test_client_ip_fallbacks() {
        let mut headers = HeaderMap::new();
        assert_eq!(client_ip(&headers), "unknown");
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.2"));
        assert_eq!(client_ip(&headers), "10.0.0.2");
    }
}
