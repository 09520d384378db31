use crate::api::types::{OrdersResponse, PairsResponse};
use crate::api::PairLookup;
use crate::error::{Error, Result};
use crate::models::{ChainId, OrderStatus, PairSnapshot, TokenBoost};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

pub const DEFAULT_BASE_URL: &str = "https://api.dexscreener.com";
const USER_AGENT: &str = concat!("callbot/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct DexScreenerClient {
    client: Client,
    base_url: String,
}

impl DexScreenerClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(Error::ConfigurationMissing("dexscreener base_url is empty".to_string()));
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::ConfigurationMissing(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("Fetching data from: {}", url);

        let response = self.client.get(&url).query(query).send().await?;

        match response.status() {
            status if status.is_success() => {
                let body = response.text().await?;
                debug!("API response from {}: {} bytes", url, body.len());
                Ok(serde_json::from_str(&body)?)
            }
            StatusCode::TOO_MANY_REQUESTS => {
                warn!("DexScreener rate limit hit on {}", url);
                Err(Error::Lookup(format!("rate limited on {}", path)))
            }
            status => Err(Error::Lookup(format!("{} returned status {}", path, status))),
        }
    }
}

#[async_trait]
impl PairLookup for DexScreenerClient {
    async fn token_pairs(&self, chain: ChainId, address: &str) -> Result<Vec<PairSnapshot>> {
        let path = format!("token-pairs/v1/{}/{}", chain, address);
        let response: PairsResponse = self.get_json(&path, &[]).await?;
        Ok(response.into_pairs())
    }

    async fn search_pairs(&self, query: &str) -> Result<Vec<PairSnapshot>> {
        let response: PairsResponse = self.get_json("latest/dex/search", &[("q", query)]).await?;
        Ok(response.into_pairs())
    }

    async fn orders(&self, chain: ChainId, address: &str) -> Result<Vec<OrderStatus>> {
        let path = format!("orders/v1/{}/{}", chain, address);
        let response: OrdersResponse = self.get_json(&path, &[]).await?;
        Ok(response.into_orders())
    }

    async fn latest_boosts(&self) -> Result<Vec<TokenBoost>> {
        self.get_json("token-boosts/latest/v1", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client = DexScreenerClient::new("https://api.dexscreener.com/").unwrap();
        assert_eq!(client.base_url(), "https://api.dexscreener.com");
    }

    #[test]
    fn test_empty_base_url_is_rejected() {
        let err = DexScreenerClient::new("/").unwrap_err();
        assert!(matches!(err, Error::ConfigurationMissing(_)));
    }
}
