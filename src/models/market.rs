use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Chains known to the bot. Only solana, ethereum and bsc are probed during
/// resolution; the rest exist so pairs and boosts from them display properly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainId {
    Solana,
    Ethereum,
    Bsc,
    Base,
    Arbitrum,
    Polygon,
    Avalanche,
    #[serde(other)]
    Unknown,
}

impl ChainId {
    /// Fixed probing order used when resolving an address.
    pub const PROBE_ORDER: [ChainId; 3] = [ChainId::Solana, ChainId::Ethereum, ChainId::Bsc];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChainId::Solana => "solana",
            ChainId::Ethereum => "ethereum",
            ChainId::Bsc => "bsc",
            ChainId::Base => "base",
            ChainId::Arbitrum => "arbitrum",
            ChainId::Polygon => "polygon",
            ChainId::Avalanche => "avalanche",
            ChainId::Unknown => "unknown",
        }
    }
}

impl Default for ChainId {
    fn default() -> Self {
        ChainId::Unknown
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads an explicit `null` as the field's default, so one sparse pair does
/// not fail the whole list it arrived in.
fn default_if_null<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenRef {
    #[serde(deserialize_with = "default_if_null")]
    pub address: String,
    #[serde(deserialize_with = "default_if_null")]
    pub name: String,
    #[serde(deserialize_with = "default_if_null")]
    pub symbol: String,
}

/// Values reported per trailing window (volume, price change).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Windowed {
    #[serde(deserialize_with = "default_if_null")]
    pub h24: f64,
    #[serde(deserialize_with = "default_if_null")]
    pub h6: f64,
    #[serde(deserialize_with = "default_if_null")]
    pub h1: f64,
    #[serde(deserialize_with = "default_if_null")]
    pub m5: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Liquidity {
    #[serde(deserialize_with = "default_if_null")]
    pub usd: f64,
    #[serde(deserialize_with = "default_if_null")]
    pub base: f64,
    #[serde(deserialize_with = "default_if_null")]
    pub quote: f64,
}

/// A trading pair as returned by DexScreener. Fetched fresh for every
/// resolution and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PairSnapshot {
    pub chain_id: ChainId,
    #[serde(deserialize_with = "default_if_null")]
    pub dex_id: String,
    #[serde(deserialize_with = "default_if_null")]
    pub url: String,
    #[serde(deserialize_with = "default_if_null")]
    pub pair_address: String,
    #[serde(deserialize_with = "default_if_null")]
    pub base_token: TokenRef,
    #[serde(deserialize_with = "default_if_null")]
    pub quote_token: TokenRef,
    #[serde(deserialize_with = "default_if_null")]
    pub price_usd: String,
    #[serde(deserialize_with = "default_if_null")]
    pub volume: Windowed,
    #[serde(deserialize_with = "default_if_null")]
    pub price_change: Windowed,
    #[serde(deserialize_with = "default_if_null")]
    pub liquidity: Liquidity,
    #[serde(deserialize_with = "default_if_null")]
    pub fdv: f64,
    #[serde(deserialize_with = "default_if_null")]
    pub market_cap: f64,
    /// Epoch milliseconds.
    pub pair_created_at: Option<i64>,
}

impl PairSnapshot {
    pub fn liquidity_usd(&self) -> f64 {
        self.liquidity.usd
    }
}

/// One entry of the DexScreener orders endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderStatus {
    pub chain_id: ChainId,
    #[serde(deserialize_with = "default_if_null")]
    pub token_address: String,
    #[serde(rename = "type", deserialize_with = "default_if_null")]
    pub order_type: String,
    #[serde(deserialize_with = "default_if_null")]
    pub status: String,
    pub payment_timestamp: Option<i64>,
}

/// A token counts as "dex paid" once a token profile order was approved.
pub fn is_paid(orders: &[OrderStatus]) -> bool {
    orders.iter().any(|o| {
        o.order_type.eq_ignore_ascii_case("tokenProfile") && o.status.eq_ignore_ascii_case("approved")
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TokenBoost {
    #[serde(deserialize_with = "default_if_null")]
    pub url: String,
    pub chain_id: ChainId,
    #[serde(deserialize_with = "default_if_null")]
    pub token_address: String,
    #[serde(deserialize_with = "default_if_null")]
    pub amount: f64,
    #[serde(deserialize_with = "default_if_null")]
    pub total_amount: f64,
    pub description: Option<String>,
}

impl TokenBoost {
    /// Best-effort display name: the first word of the description, else a
    /// shortened address.
    pub fn display_name(&self) -> String {
        let from_description = self.description.as_deref().and_then(|d| {
            d.split_whitespace()
                .next()
                .map(|w| w.trim_matches(|c: char| "$#!?.,;:".contains(c)))
                .filter(|w| w.chars().count() > 1 && w.chars().count() < 20)
                .map(str::to_string)
        });

        from_description.unwrap_or_else(|| {
            let short: String = self.token_address.chars().take(8).collect();
            format!("Token {}...", short)
        })
    }
}
