use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

pub mod market;

pub use market::{ChainId, PairSnapshot, OrderStatus, TokenBoost};

/// A user's call on a token, recorded with the market cap seen at call time.
///
/// `market_cap_at_call` never changes after creation. `current_market_cap`
/// starts equal to it and is not repriced by anything in this crate, so PnL
/// reflects only what was known when the call was made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Call {
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub token: String,
    pub market_cap_at_call: f64,
    pub current_market_cap: f64,
    pub call_time: DateTime<Utc>,
}

impl Call {
    pub fn new(user_id: &str, username: &str, token: &str, market_cap_at_call: f64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            username: username.to_string(),
            token: normalize_token(token),
            market_cap_at_call,
            current_market_cap: market_cap_at_call,
            call_time: Utc::now(),
        }
    }
}

/// Tokens are compared case-insensitively by storing and querying them uppercased.
pub fn normalize_token(token: &str) -> String {
    token.trim().to_uppercase()
}
