pub mod availability;
pub mod email;
pub mod error;
pub mod geo;
pub mod logger;
pub mod pricing;
pub mod rate_limiter;
pub mod recommendation;
pub mod redis;
pub mod slug;
pub mod validation;
