//! Pricing abstractions and core types

use super::error::NetworkError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub provider_id: String,
    pub price: f64,
    pub currency: String,
    pub fetched_at: DateTime<Utc>,
}

#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Fetches the current price of `provider_id` in `vs_currency`.
    async fn fetch_price(
        &self,
        provider_id: &str,
        vs_currency: &str,
    ) -> Result<PriceQuote, NetworkError>;
}
