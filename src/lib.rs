pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::calc::CalcRequest;
use crate::core::config::AppConfig;
use crate::core::{CalculatorSession, PriceLookup, TickerCatalog};
use crate::providers::coingecko::CoinGeckoProvider;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Calc(CalcRequest),
    Price { ticker: String },
    Tickers,
}

/// Builds the price lookup described by `config`, quoting in `currency`.
pub fn build_lookup(config: &AppConfig, currency: &str) -> Result<PriceLookup> {
    let catalog = Arc::new(TickerCatalog::with_extra(&config.tickers));
    let provider = CoinGeckoProvider::new(config.coingecko_base_url())?;

    Ok(PriceLookup::new(catalog, Arc::new(provider), currency.trim())
        .with_timeout(config.request_timeout())
        .with_cache_ttl(config.cache_ttl()))
}

/// Builds the session for `request`. Quotes are fetched in the currency the
/// form shows, which is the request's `--currency` or the configured one.
pub fn build_session(config: &AppConfig, request: &CalcRequest) -> Result<CalculatorSession> {
    let input = request.to_input(&config.currency);
    let lookup = build_lookup(config, &input.currency)?;
    Ok(CalculatorSession::new(lookup, input))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Crypto profit/loss calculator starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Calc(request) => {
            let session = build_session(&config, &request)?;
            cli::calc::run(&session, &request).await
        }
        AppCommand::Price { ticker } => {
            let lookup = build_lookup(&config, &config.currency)?;
            cli::price::run(&lookup, &ticker).await
        }
        AppCommand::Tickers => {
            let lookup = build_lookup(&config, &config.currency)?;
            cli::tickers::run(lookup.catalog());
            Ok(())
        }
    }
}
