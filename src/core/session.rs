//! Form state for one calculator session.
//!
//! Selecting a ticker starts a price lookup whose result pre-fills the buy and
//! sell price fields. Each selection bumps a generation counter; a lookup only
//! writes to the form if no newer selection happened while it was in flight.

use super::calculator::{CalculationResult, calculate};
use super::error::{NetworkError, ValidationError};
use super::input::{CalculatorInput, ValidatedInput};
use super::lookup::{LookupOutcome, PriceLookup};
use super::price::PriceQuote;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOutcome {
    /// Quote written to the buy and sell price fields.
    Applied(PriceQuote),
    /// No price available for this ticker. Fields untouched.
    Unlisted,
    /// The provider answered without a usable price (0). Fields untouched.
    Unpriced(PriceQuote),
    /// Another ticker was selected before the lookup finished. Fields untouched.
    Superseded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub input: ValidatedInput,
    pub result: CalculationResult,
}

pub struct CalculatorSession {
    lookup: PriceLookup,
    form: Mutex<CalculatorInput>,
    generation: AtomicU64,
}

impl CalculatorSession {
    pub fn new(lookup: PriceLookup, form: CalculatorInput) -> Self {
        Self {
            lookup,
            form: Mutex::new(form),
            generation: AtomicU64::new(0),
        }
    }

    pub async fn form(&self) -> CalculatorInput {
        self.form.lock().await.clone()
    }

    pub async fn edit(&self, f: impl FnOnce(&mut CalculatorInput)) {
        let mut form = self.form.lock().await;
        f(&mut form);
    }

    /// Selects `ticker` and pre-fills prices from a lookup. On a network error
    /// the price fields keep their previous values.
    pub async fn select_ticker(&self, ticker: &str) -> Result<SelectionOutcome, NetworkError> {
        let generation = {
            let mut form = self.form.lock().await;
            form.crypto = ticker.to_string();
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };

        let outcome = self.lookup.lookup(ticker).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Discarding lookup result for superseded selection {}", ticker);
            return Ok(SelectionOutcome::Superseded);
        }

        match outcome? {
            LookupOutcome::Unlisted => Ok(SelectionOutcome::Unlisted),
            LookupOutcome::Quoted(quote) if quote.price == 0.0 => {
                debug!("Zero price for {}, keeping current price fields", ticker);
                Ok(SelectionOutcome::Unpriced(quote))
            }
            LookupOutcome::Quoted(quote) => {
                let mut form = self.form.lock().await;
                // Selection may have changed while waiting for the lock.
                if self.generation.load(Ordering::SeqCst) != generation {
                    return Ok(SelectionOutcome::Superseded);
                }
                form.buy_price = quote.price.to_string();
                form.sell_price = quote.price.to_string();
                Ok(SelectionOutcome::Applied(quote))
            }
        }
    }

    /// Validates the current form and computes the result.
    pub async fn submit(&self) -> Result<Submission, ValidationError> {
        let input = self.form.lock().await.validate()?;
        let result = calculate(&input.values);
        Ok(Submission { input, result })
    }
}
