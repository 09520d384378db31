pub mod format;
pub mod rate_limit;

pub use rate_limit::RateLimiter;
