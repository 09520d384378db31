use crate::error::Result;
use crate::models::{normalize_token, Call};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::info;
use std::sync::Arc;

pub mod memory;
pub mod postgres;

pub use memory::MemoryCallStore;
pub use postgres::PgCallStore;

/// Storage backend for calls. Tokens passed in are already normalized.
/// Multi-row reads return newest first.
#[async_trait]
pub trait CallStore: Send + Sync {
    async fn insert(&self, call: &Call) -> Result<()>;
    async fn by_user(&self, user_id: &str) -> Result<Vec<Call>>;
    async fn by_token(&self, token: &str) -> Result<Vec<Call>>;
    async fn by_user_and_token(&self, user_id: &str, token: &str) -> Result<Vec<Call>>;
    async fn by_date_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Call>>;
    async fn recent(&self, limit: usize) -> Result<Vec<Call>>;
    async fn count_by_user(&self, user_id: &str) -> Result<i64>;
}

/// Owns every recorded call. Token arguments are case-normalized here so
/// stores only ever see uppercase tokens.
#[derive(Clone)]
pub struct CallLedger {
    store: Arc<dyn CallStore>,
}

impl CallLedger {
    pub fn new(store: Arc<dyn CallStore>) -> Self {
        Self { store }
    }

    pub async fn record(
        &self,
        user_id: &str,
        username: &str,
        token: &str,
        market_cap_at_call: f64,
    ) -> Result<Call> {
        let call = Call::new(user_id, username, token, market_cap_at_call);
        self.store.insert(&call).await?;
        info!(
            "Recorded call {} by {} on {} at market cap {}",
            call.id, call.username, call.token, call.market_cap_at_call
        );
        Ok(call)
    }

    /// The matching call with the greatest `call_time`, whatever order the
    /// store returns rows in.
    pub async fn latest_by_user_and_token(&self, user_id: &str, token: &str) -> Result<Option<Call>> {
        let calls = self
            .store
            .by_user_and_token(user_id, &normalize_token(token))
            .await?;
        Ok(calls.into_iter().max_by_key(|c| c.call_time))
    }

    pub async fn by_user(&self, user_id: &str) -> Result<Vec<Call>> {
        self.store.by_user(user_id).await
    }

    pub async fn by_token(&self, token: &str) -> Result<Vec<Call>> {
        self.store.by_token(&normalize_token(token)).await
    }

    pub async fn by_date_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Call>> {
        self.store.by_date_range(start, end).await
    }

    pub async fn recent(&self, limit: usize) -> Result<Vec<Call>> {
        self.store.recent(limit).await
    }

    pub async fn count_by_user(&self, user_id: &str) -> Result<i64> {
        self.store.count_by_user(user_id).await
    }
}
