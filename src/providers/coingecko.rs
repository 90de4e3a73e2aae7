use crate::core::error::NetworkError;
use crate::core::price::{PriceProvider, PriceQuote};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// `{ "<id>": { "<currency>": <price> } }`
type SimplePriceResponse = HashMap<String, HashMap<String, Option<f64>>>;

// CoinGeckoProvider implementation for PriceProvider
pub struct CoinGeckoProvider {
    base_url: String,
    client: reqwest::Client,
}

impl CoinGeckoProvider {
    pub fn new(base_url: &str) -> Result<Self, NetworkError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("cryptopnl/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| NetworkError::Transport {
                id: base_url.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl PriceProvider for CoinGeckoProvider {
    #[instrument(name = "CoinGeckoPriceFetch", skip(self))]
    async fn fetch_price(
        &self,
        provider_id: &str,
        vs_currency: &str,
    ) -> Result<PriceQuote, NetworkError> {
        let url = format!("{}/simple/price", self.base_url);
        debug!("Requesting price data from {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("ids", provider_id), ("vs_currencies", vs_currency)])
            .send()
            .await
            .map_err(|e| NetworkError::Transport {
                id: provider_id.to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(NetworkError::Status {
                id: provider_id.to_string(),
                status: response.status().as_u16(),
            });
        }

        let text = response.text().await.map_err(|e| NetworkError::Transport {
            id: provider_id.to_string(),
            message: e.to_string(),
        })?;

        let data: SimplePriceResponse =
            serde_json::from_str(&text).map_err(|e| NetworkError::Decode {
                id: provider_id.to_string(),
                message: e.to_string(),
            })?;

        let price = data
            .get(provider_id)
            .and_then(|prices| prices.get(vs_currency))
            .copied()
            .flatten();
        let price = match price {
            Some(price) => price,
            None => {
                warn!(
                    "Price response for {} has no {} field, using 0",
                    provider_id, vs_currency
                );
                0.0
            }
        };

        Ok(PriceQuote {
            provider_id: provider_id.to_string(),
            price,
            currency: vs_currency.to_string(),
            fetched_at: Utc::now(),
        })
    }
}
