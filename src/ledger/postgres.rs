use crate::error::Result;
use crate::ledger::CallStore;
use crate::models::Call;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::info;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

const CALL_COLUMNS: &str =
    "id, user_id, username, token, market_cap_at_call, current_market_cap, call_time";

pub struct PgCallStore {
    pool: PgPool,
}

impl PgCallStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool and makes sure the `calls` table exists.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;

        let store = Self::new(pool);
        store.create_tables().await?;
        info!("Connected to call database");
        Ok(store)
    }

    pub async fn create_tables(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS calls (
                id                  TEXT PRIMARY KEY,
                user_id             TEXT NOT NULL,
                username            TEXT NOT NULL,
                token               TEXT NOT NULL,
                market_cap_at_call  DOUBLE PRECISION NOT NULL,
                current_market_cap  DOUBLE PRECISION NOT NULL,
                call_time           TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_calls_user_token_time ON calls (user_id, token, call_time DESC)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_calls_call_time ON calls (call_time DESC)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl CallStore for PgCallStore {
    async fn insert(&self, call: &Call) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO calls (id, user_id, username, token, market_cap_at_call, current_market_cap, call_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&call.id)
        .bind(&call.user_id)
        .bind(&call.username)
        .bind(&call.token)
        .bind(call.market_cap_at_call)
        .bind(call.current_market_cap)
        .bind(call.call_time)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn by_user(&self, user_id: &str) -> Result<Vec<Call>> {
        let sql = format!(
            "SELECT {} FROM calls WHERE user_id = $1 ORDER BY call_time DESC",
            CALL_COLUMNS
        );
        let calls = sqlx::query_as::<_, Call>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(calls)
    }

    async fn by_token(&self, token: &str) -> Result<Vec<Call>> {
        let sql = format!(
            "SELECT {} FROM calls WHERE token = $1 ORDER BY call_time DESC",
            CALL_COLUMNS
        );
        let calls = sqlx::query_as::<_, Call>(&sql)
            .bind(token)
            .fetch_all(&self.pool)
            .await?;
        Ok(calls)
    }

    async fn by_user_and_token(&self, user_id: &str, token: &str) -> Result<Vec<Call>> {
        let sql = format!(
            "SELECT {} FROM calls WHERE user_id = $1 AND token = $2 ORDER BY call_time DESC",
            CALL_COLUMNS
        );
        let calls = sqlx::query_as::<_, Call>(&sql)
            .bind(user_id)
            .bind(token)
            .fetch_all(&self.pool)
            .await?;
        Ok(calls)
    }

    async fn by_date_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Call>> {
        let sql = format!(
            "SELECT {} FROM calls WHERE call_time BETWEEN $1 AND $2 ORDER BY call_time DESC",
            CALL_COLUMNS
        );
        let calls = sqlx::query_as::<_, Call>(&sql)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await?;
        Ok(calls)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Call>> {
        let sql = format!(
            "SELECT {} FROM calls ORDER BY call_time DESC LIMIT $1",
            CALL_COLUMNS
        );
        let calls = sqlx::query_as::<_, Call>(&sql)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;
        Ok(calls)
    }

    async fn count_by_user(&self, user_id: &str) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM calls WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
