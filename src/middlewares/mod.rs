pub mod admin_middleware;
pub mod rate_limit;
