use crate::api::PairLookup;
use crate::chat::ChatTransport;
use crate::classifier::Classifier;
use crate::commands::{CommandContext, CommandRegistry};
use crate::config::{ChatConfig, Config, DatabaseConfig, DexScreenerConfig};
use crate::error::{Error, Result};
use crate::ledger::{CallLedger, MemoryCallStore};
use crate::models::market::{Liquidity, TokenRef, Windowed};
use crate::models::{Call, ChainId, OrderStatus, PairSnapshot, TokenBoost};
use crate::resolver::ChainResolver;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

// Helper to create a default test config
pub fn create_test_config() -> Config {
    Config {
        log_file: None,
        chat: ChatConfig {
            bot_token: "test-token".to_string(),
            ..ChatConfig::default()
        },
        dexscreener: DexScreenerConfig::default(),
        database: DatabaseConfig {
            url: "postgres://localhost/callbot_test".to_string(),
            max_connections: 2,
        },
    }
}

/// A call made `minutes_ago` minutes before now, not yet repriced.
pub fn create_test_call(user_id: &str, token: &str, market_cap: f64, minutes_ago: i64) -> Call {
    let mut call = Call::new(user_id, &format!("user_{}", user_id), token, market_cap);
    call.call_time = Utc::now() - Duration::minutes(minutes_ago);
    call
}

// Helper to create a solana pair with sane defaults
pub fn create_test_pair(pair_address: &str, market_cap: f64) -> PairSnapshot {
    PairSnapshot {
        chain_id: ChainId::Solana,
        dex_id: "raydium".to_string(),
        url: format!("https://dexscreener.com/solana/{}", pair_address),
        pair_address: pair_address.to_string(),
        base_token: TokenRef {
            address: "base".to_string(),
            name: "Test Token".to_string(),
            symbol: "TEST".to_string(),
        },
        quote_token: TokenRef {
            address: "So11111111111111111111111111111111111111112".to_string(),
            name: "Wrapped SOL".to_string(),
            symbol: "SOL".to_string(),
        },
        price_usd: "0.0123".to_string(),
        volume: Windowed { h24: 1_000.0, h6: 250.0, h1: 40.0, m5: 3.0 },
        price_change: Windowed { h24: 5.0, h6: 1.0, h1: 0.5, m5: 0.0 },
        liquidity: Liquidity { usd: 10_000.0, base: 0.0, quote: 0.0 },
        fdv: market_cap,
        market_cap,
        pair_created_at: Some((Utc::now() - Duration::days(3)).timestamp_millis()),
    }
}

/// Lookup that answers from fixed data, or fails every call when `fail` is set.
#[derive(Default)]
pub struct StaticLookup {
    pub chain_pairs: HashMap<ChainId, Vec<PairSnapshot>>,
    pub search_pairs: Vec<PairSnapshot>,
    pub orders: Vec<OrderStatus>,
    pub boosts: Vec<TokenBoost>,
    pub fail: bool,
}

impl StaticLookup {
    fn check(&self) -> Result<()> {
        if self.fail {
            return Err(Error::Lookup("scripted failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PairLookup for StaticLookup {
    async fn token_pairs(&self, chain: ChainId, _address: &str) -> Result<Vec<PairSnapshot>> {
        self.check()?;
        Ok(self.chain_pairs.get(&chain).cloned().unwrap_or_default())
    }

    async fn search_pairs(&self, _query: &str) -> Result<Vec<PairSnapshot>> {
        self.check()?;
        Ok(self.search_pairs.clone())
    }

    async fn orders(&self, _chain: ChainId, _address: &str) -> Result<Vec<OrderStatus>> {
        self.check()?;
        Ok(self.orders.clone())
    }

    async fn latest_boosts(&self) -> Result<Vec<TokenBoost>> {
        self.check()?;
        Ok(self.boosts.clone())
    }
}

/// Transport that keeps every `(channel, text)` it was asked to send.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingTransport {
    pub async fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send(&self, channel: &str, text: &str) -> Result<()> {
        self.sent.lock().await.push((channel.to_string(), text.to_string()));
        Ok(())
    }
}

pub fn create_test_context(transport: Arc<RecordingTransport>) -> CommandContext {
    create_test_context_with(
        transport,
        Arc::new(StaticLookup::default()),
        CallLedger::new(Arc::new(MemoryCallStore::new())),
    )
}

pub fn create_test_context_with(
    transport: Arc<RecordingTransport>,
    lookup: Arc<dyn PairLookup>,
    ledger: CallLedger,
) -> CommandContext {
    let names = CommandRegistry::with_default_commands().names();
    CommandContext {
        transport,
        ledger,
        resolver: ChainResolver::new(lookup),
        classifier: Arc::new(Classifier::new(names)),
        prefix: '!',
    }
}
