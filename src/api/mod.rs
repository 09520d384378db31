use crate::error::Result;
use crate::models::{ChainId, PairSnapshot, OrderStatus, TokenBoost};
use async_trait::async_trait;

pub mod dexscreener;
pub mod types;

pub use dexscreener::DexScreenerClient;

/// External trading-pair lookups. Each call is one probe; callers decide how
/// failures of a single probe are absorbed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PairLookup: Send + Sync {
    /// Pairs for a token address on one chain.
    async fn token_pairs(&self, chain: ChainId, address: &str) -> Result<Vec<PairSnapshot>>;

    /// Free-text search across every chain.
    async fn search_pairs(&self, query: &str) -> Result<Vec<PairSnapshot>>;

    /// Paid-order history for a token.
    async fn orders(&self, chain: ChainId, address: &str) -> Result<Vec<OrderStatus>>;

    /// Most recently boosted tokens.
    async fn latest_boosts(&self) -> Result<Vec<TokenBoost>>;
}
