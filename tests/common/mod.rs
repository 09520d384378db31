#![allow(dead_code)]

use async_trait::async_trait;
use callbot::api::PairLookup;
use callbot::chat::ChatTransport;
use callbot::error::{Error, Result};
use callbot::models::market::Liquidity;
use callbot::models::{ChainId, OrderStatus, PairSnapshot, TokenBoost};
use std::collections::HashMap;
use tokio::sync::Mutex;

/// What a scripted chain probe answers.
#[derive(Clone)]
pub enum Probe {
    Pairs(Vec<PairSnapshot>),
    Fail,
}

/// Lookup driven by per-chain scripts. Records every request it receives.
#[derive(Default)]
pub struct ScriptedLookup {
    chains: HashMap<ChainId, Probe>,
    search: Vec<PairSnapshot>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chain(mut self, chain: ChainId, probe: Probe) -> Self {
        self.chains.insert(chain, probe);
        self
    }

    pub fn with_search(mut self, pairs: Vec<PairSnapshot>) -> Self {
        self.search = pairs;
        self
    }

    pub async fn requests(&self) -> Vec<String> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl PairLookup for ScriptedLookup {
    async fn token_pairs(&self, chain: ChainId, _address: &str) -> Result<Vec<PairSnapshot>> {
        self.requests.lock().await.push(format!("pairs:{}", chain));
        match self.chains.get(&chain) {
            Some(Probe::Pairs(pairs)) => Ok(pairs.clone()),
            Some(Probe::Fail) => Err(Error::Lookup(format!("{} unavailable", chain))),
            None => Ok(Vec::new()),
        }
    }

    async fn search_pairs(&self, query: &str) -> Result<Vec<PairSnapshot>> {
        self.requests.lock().await.push(format!("search:{}", query));
        Ok(self.search.clone())
    }

    async fn orders(&self, chain: ChainId, _address: &str) -> Result<Vec<OrderStatus>> {
        self.requests.lock().await.push(format!("orders:{}", chain));
        Ok(Vec::new())
    }

    async fn latest_boosts(&self) -> Result<Vec<TokenBoost>> {
        self.requests.lock().await.push("boosts".to_string());
        Ok(Vec::new())
    }
}

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

pub fn pair(chain: ChainId, pair_address: &str, liquidity: f64, market_cap: f64) -> PairSnapshot {
    PairSnapshot {
        chain_id: chain,
        dex_id: "testdex".to_string(),
        pair_address: pair_address.to_string(),
        liquidity: Liquidity { usd: liquidity, base: 0.0, quote: 0.0 },
        market_cap,
        ..PairSnapshot::default()
    }
}
