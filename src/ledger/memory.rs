use crate::error::Result;
use crate::ledger::CallStore;
use crate::models::Call;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

/// In-process call store for tests and `--in-memory` runs.
#[derive(Default)]
pub struct MemoryCallStore {
    calls: Mutex<Vec<Call>>,
}

impl MemoryCallStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn select<F>(&self, filter: F) -> Vec<Call>
    where
        F: Fn(&Call) -> bool,
    {
        let calls = self.calls.lock().await;
        let mut matched: Vec<Call> = calls.iter().filter(|c| filter(c)).cloned().collect();
        matched.sort_by(|a, b| b.call_time.cmp(&a.call_time));
        matched
    }
}

#[async_trait]
impl CallStore for MemoryCallStore {
    async fn insert(&self, call: &Call) -> Result<()> {
        self.calls.lock().await.push(call.clone());
        Ok(())
    }

    async fn by_user(&self, user_id: &str) -> Result<Vec<Call>> {
        Ok(self.select(|c| c.user_id == user_id).await)
    }

    async fn by_token(&self, token: &str) -> Result<Vec<Call>> {
        Ok(self.select(|c| c.token == token).await)
    }

    async fn by_user_and_token(&self, user_id: &str, token: &str) -> Result<Vec<Call>> {
        Ok(self.select(|c| c.user_id == user_id && c.token == token).await)
    }

    async fn by_date_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Call>> {
        Ok(self.select(|c| c.call_time >= start && c.call_time <= end).await)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Call>> {
        let mut calls = self.select(|_| true).await;
        calls.truncate(limit);
        Ok(calls)
    }

    async fn count_by_user(&self, user_id: &str) -> Result<i64> {
        let calls = self.calls.lock().await;
        Ok(calls.iter().filter(|c| c.user_id == user_id).count() as i64)
    }
}
