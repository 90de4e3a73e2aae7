//! Ticker to price resolution with timeout and short-lived memoization

use super::cache::Cache;
use super::catalog::TickerCatalog;
use super::error::NetworkError;
use super::price::{PriceProvider, PriceQuote};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Quoted(PriceQuote),
    /// Ticker is `OTHER` or missing from the catalog. No request was made.
    Unlisted,
}

pub struct PriceLookup {
    catalog: Arc<TickerCatalog>,
    provider: Arc<dyn PriceProvider>,
    vs_currency: String,
    timeout: Duration,
    cache: Option<Cache<String, PriceQuote>>,
}

impl PriceLookup {
    pub fn new(
        catalog: Arc<TickerCatalog>,
        provider: Arc<dyn PriceProvider>,
        vs_currency: &str,
    ) -> Self {
        Self {
            catalog,
            provider,
            vs_currency: vs_currency.to_lowercase(),
            timeout: DEFAULT_TIMEOUT,
            cache: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reuses successful quotes for `ttl`. A zero `ttl` disables caching.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache = (!ttl.is_zero()).then(|| Cache::new(ttl));
        self
    }

    pub fn catalog(&self) -> &TickerCatalog {
        &self.catalog
    }

    #[instrument(name = "PriceLookup", skip(self), fields(vs_currency = %self.vs_currency))]
    pub async fn lookup(&self, ticker: &str) -> Result<LookupOutcome, NetworkError> {
        let Some(entry) = self.catalog.resolve(ticker) else {
            debug!("No catalog entry for {}, skipping price fetch", ticker);
            return Ok(LookupOutcome::Unlisted);
        };
        let id = entry.provider_id.as_str();

        if let Some(cache) = &self.cache
            && let Some(cached) = cache.get(&id.to_string()).await
        {
            return Ok(LookupOutcome::Quoted(cached));
        }

        let quote =
            match tokio::time::timeout(self.timeout, self.provider.fetch_price(id, &self.vs_currency))
                .await
            {
                Ok(result) => result?,
                Err(_) => {
                    warn!("Price request for {} timed out", id);
                    return Err(NetworkError::Timeout {
                        id: id.to_string(),
                        after: self.timeout,
                    });
                }
            };

        if let Some(cache) = &self.cache {
            cache.put(id.to_string(), quote.clone()).await;
        }
        Ok(LookupOutcome::Quoted(quote))
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::MockProvider;
    use super::*;
    use async_trait::async_trait;

    fn lookup_with(provider: Arc<MockProvider>) -> PriceLookup {
        PriceLookup::new(Arc::new(TickerCatalog::builtin()), provider, "USD")
    }

    #[tokio::test]
    async fn test_lookup_resolves_ticker_to_provider_id() {
        let provider = Arc::new(MockProvider::new(&[("bitcoin", 65000.0)]));
        let lookup = lookup_with(Arc::clone(&provider));

        let outcome = lookup.lookup("BTC").await.unwrap();
        let LookupOutcome::Quoted(quote) = outcome else {
            panic!("Expected a quote");
        };
        assert_eq!(quote.provider_id, "bitcoin");
        assert_eq!(quote.price, 65000.0);
        assert_eq!(quote.currency, "usd");
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_unlisted_ticker_skips_network() {
        let provider = Arc::new(MockProvider::new(&[("bitcoin", 65000.0)]));
        let lookup = lookup_with(Arc::clone(&provider));

        assert_eq!(lookup.lookup("OTHER").await.unwrap(), LookupOutcome::Unlisted);
        assert_eq!(lookup.lookup("FOO").await.unwrap(), LookupOutcome::Unlisted);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_is_network_error() {
        let provider = Arc::new(MockProvider::new(&[]));
        let lookup = lookup_with(Arc::clone(&provider));

        let err = lookup.lookup("ETH").await.unwrap_err();
        assert_eq!(
            err,
            NetworkError::Status {
                id: "ethereum".to_string(),
                status: 500
            }
        );
    }

    #[tokio::test]
    async fn test_cache_reuses_quote() {
        let provider = Arc::new(MockProvider::new(&[("bitcoin", 65000.0)]));
        let lookup = lookup_with(Arc::clone(&provider)).with_cache_ttl(Duration::from_secs(30));

        lookup.lookup("BTC").await.unwrap();
        lookup.lookup("btc").await.unwrap();
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_without_cache_every_lookup_fetches() {
        let provider = Arc::new(MockProvider::new(&[("bitcoin", 65000.0)]));
        let lookup = lookup_with(Arc::clone(&provider)).with_cache_ttl(Duration::ZERO);

        lookup.lookup("BTC").await.unwrap();
        lookup.lookup("BTC").await.unwrap();
        assert_eq!(provider.calls(), 2);
    }

    struct SlowProvider;

    #[async_trait]
    impl PriceProvider for SlowProvider {
        async fn fetch_price(
            &self,
            _provider_id: &str,
            _vs_currency: &str,
        ) -> Result<PriceQuote, NetworkError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            unreachable!("request should have timed out");
        }
    }

    #[tokio::test]
    async fn test_timeout_is_network_error() {
        let lookup = PriceLookup::new(
            Arc::new(TickerCatalog::builtin()),
            Arc::new(SlowProvider),
            "usd",
        )
        .with_timeout(Duration::from_millis(20));

        let err = lookup.lookup("SOL").await.unwrap_err();
        assert_eq!(
            err,
            NetworkError::Timeout {
                id: "solana".to_string(),
                after: Duration::from_millis(20),
            }
        );
        assert!(err.to_string().ends_with("after 20ms"));
    }
}
