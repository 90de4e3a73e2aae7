//! Ticker symbol to price provider identifier mapping

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Selection meaning "not listed in the catalog".
pub const OTHER_TICKER: &str = "OTHER";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerEntry {
    pub symbol: String,
    pub label: String,
    pub provider_id: String,
}

const BUILTIN_TICKERS: &[(&str, &str, &str)] = &[
    ("BTC", "Bitcoin (BTC)", "bitcoin"),
    ("ETH", "Ethereum (ETH)", "ethereum"),
    ("USDT", "Tether (USDT)", "tether"),
    ("BNB", "BNB", "binancecoin"),
    ("XRP", "XRP", "ripple"),
    ("USDC", "USD Coin (USDC)", "usd-coin"),
    ("SOL", "Solana (SOL)", "solana"),
    ("ADA", "Cardano (ADA)", "cardano"),
    ("DOGE", "Dogecoin (DOGE)", "dogecoin"),
    ("TRX", "TRON (TRX)", "tron"),
    ("TON", "Toncoin (TON)", "toncoin"),
    ("DAI", "Dai (DAI)", "dai"),
    ("MATIC", "Polygon (MATIC)", "matic-network"),
    ("DOT", "Polkadot (DOT)", "polkadot"),
    ("LTC", "Litecoin (LTC)", "litecoin"),
    ("BCH", "Bitcoin Cash (BCH)", "bitcoin-cash"),
    ("SHIB", "Shiba Inu (SHIB)", "shiba-inu"),
    ("AVAX", "Avalanche (AVAX)", "avalanche-2"),
    ("LINK", "Chainlink (LINK)", "chainlink"),
    ("XLM", "Stellar (XLM)", "stellar"),
    ("UNI", "Uniswap (UNI)", "uniswap"),
    ("ATOM", "Cosmos (ATOM)", "cosmos"),
    ("XMR", "Monero (XMR)", "monero"),
    ("OKB", "OKB", "okb"),
    ("ETC", "Ethereum Classic (ETC)", "ethereum-classic"),
];

/// Read-only set of known tickers, built once at startup.
#[derive(Debug, Clone)]
pub struct TickerCatalog {
    entries: Vec<TickerEntry>,
}

impl TickerCatalog {
    pub fn builtin() -> Self {
        let entries = BUILTIN_TICKERS
            .iter()
            .map(|(symbol, label, provider_id)| TickerEntry {
                symbol: symbol.to_string(),
                label: label.to_string(),
                provider_id: provider_id.to_string(),
            })
            .collect();
        Self { entries }
    }

    /// Builtin entries followed by `extra`. An extra entry with a known symbol
    /// replaces the builtin one.
    pub fn with_extra(extra: &[TickerEntry]) -> Self {
        let mut catalog = Self::builtin();
        for entry in extra {
            if entry.symbol.eq_ignore_ascii_case(OTHER_TICKER) {
                debug!("Ignoring catalog entry for reserved symbol {}", entry.symbol);
                continue;
            }
            let entry = TickerEntry {
                symbol: entry.symbol.to_uppercase(),
                ..entry.clone()
            };
            match catalog.entries.iter_mut().find(|e| e.symbol == entry.symbol) {
                Some(existing) => *existing = entry,
                None => catalog.entries.push(entry),
            }
        }
        catalog
    }

    /// Provider identifier for `symbol`, or `None` for `OTHER` and unknown symbols.
    pub fn resolve(&self, symbol: &str) -> Option<&TickerEntry> {
        let symbol = symbol.trim();
        if symbol.eq_ignore_ascii_case(OTHER_TICKER) {
            return None;
        }
        self.entries
            .iter()
            .find(|e| e.symbol.eq_ignore_ascii_case(symbol))
    }

    pub fn entries(&self) -> &[TickerEntry] {
        &self.entries
    }
}

impl Default for TickerCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
