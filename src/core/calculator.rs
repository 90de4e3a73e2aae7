//! Profit and loss arithmetic

use super::input::CalculatorValues;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalculationResult {
    pub total_investment: f64,
    pub units: f64,
    pub gross_profit: f64,
    pub take_home: f64,
    pub profit_loss: f64,
    pub percentage_change: f64,
}

/// Computes the outcome of buying at `buy_price` and selling at `sell_price`.
///
/// `buy_price` must be positive; [`CalculatorInput::validate`] rejects anything
/// else. No rounding is applied.
///
/// [`CalculatorInput::validate`]: super::input::CalculatorInput::validate
pub fn calculate(values: &CalculatorValues) -> CalculationResult {
    let price_delta = values.sell_price - values.buy_price;
    let units = values.investment / values.buy_price;
    let gross_profit = price_delta * units;

    CalculationResult {
        total_investment: values.investment + values.investment_fee,
        units,
        gross_profit,
        take_home: gross_profit - values.exit_fee,
        profit_loss: gross_profit,
        percentage_change: price_delta / values.buy_price * 100.0,
    }
}
