//! Calculator form input and its validation

use super::calculator::calculate;
use super::error::{FieldError, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

fn default_fee() -> String {
    "0".to_string()
}

/// Raw form values. Numeric fields travel as strings and are parsed on submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorInput {
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub crypto: String,
    #[serde(default)]
    pub investment: String,
    #[serde(default)]
    pub buy_price: String,
    #[serde(default)]
    pub sell_price: String,
    #[serde(default = "default_fee")]
    pub investment_fee: String,
    #[serde(default = "default_fee")]
    pub exit_fee: String,
}

impl Default for CalculatorInput {
    fn default() -> Self {
        Self {
            currency: String::new(),
            crypto: String::new(),
            investment: String::new(),
            buy_price: String::new(),
            sell_price: String::new(),
            investment_fee: default_fee(),
            exit_fee: default_fee(),
        }
    }
}

/// Parsed numeric values accepted by the calculator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculatorValues {
    pub investment: f64,
    pub buy_price: f64,
    pub sell_price: f64,
    pub investment_fee: f64,
    pub exit_fee: f64,
}

/// Accepted but unusual values worth surfacing to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputWarning {
    NegativeInvestment,
    NegativeSellPrice,
    NegativeInvestmentFee,
    NegativeExitFee,
}

impl Display for InputWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            InputWarning::NegativeInvestment => "investment is negative",
            InputWarning::NegativeSellPrice => "sellPrice is negative",
            InputWarning::NegativeInvestmentFee => "investmentFee is negative",
            InputWarning::NegativeExitFee => "exitFee is negative",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInput {
    pub currency: String,
    pub crypto: String,
    pub values: CalculatorValues,
    pub warnings: Vec<InputWarning>,
}

impl CalculatorInput {
    /// Checks every field and either accepts the whole form or reports all
    /// failing fields at once.
    pub fn validate(&self) -> Result<ValidatedInput, ValidationError> {
        let mut errors = Vec::new();

        for (field, value) in [("currency", &self.currency), ("crypto", &self.crypto)] {
            if value.trim().is_empty() {
                errors.push(FieldError::new(field, format!("{field} is required")));
            }
        }

        let investment = parse_required("investment", &self.investment, &mut errors);
        let buy_price = parse_required("buyPrice", &self.buy_price, &mut errors);
        let sell_price = parse_required("sellPrice", &self.sell_price, &mut errors);
        let investment_fee = parse_fee("investmentFee", &self.investment_fee, &mut errors);
        let exit_fee = parse_fee("exitFee", &self.exit_fee, &mut errors);

        if let Some(price) = buy_price
            && price <= 0.0
        {
            errors.push(FieldError::new("buyPrice", "buyPrice must be > 0"));
        }

        let values = match (investment, buy_price, sell_price, investment_fee, exit_fee) {
            (
                Some(investment),
                Some(buy_price),
                Some(sell_price),
                Some(investment_fee),
                Some(exit_fee),
            ) if errors.is_empty() => CalculatorValues {
                investment,
                buy_price,
                sell_price,
                investment_fee,
                exit_fee,
            },
            _ => return Err(ValidationError { errors }),
        };

        let errors = range_errors(&values);
        if !errors.is_empty() {
            return Err(ValidationError { errors });
        }

        Ok(ValidatedInput {
            currency: self.currency.trim().to_string(),
            crypto: self.crypto.trim().to_string(),
            warnings: collect_warnings(&values),
            values,
        })
    }
}

fn parse_required(field: &'static str, raw: &str, errors: &mut Vec<FieldError>) -> Option<f64> {
    if raw.trim().is_empty() {
        errors.push(FieldError::new(field, format!("{field} is required")));
        return None;
    }
    parse_number(field, raw, errors)
}

fn parse_fee(field: &'static str, raw: &str, errors: &mut Vec<FieldError>) -> Option<f64> {
    if raw.trim().is_empty() {
        return Some(0.0);
    }
    parse_number(field, raw, errors)
}

fn parse_number(field: &'static str, raw: &str, errors: &mut Vec<FieldError>) -> Option<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            errors.push(FieldError::new(
                field,
                format!("{field} must be a finite number, got '{raw}'"),
            ));
            None
        }
    }
}

/// Rejects values that are finite on their own but overflow the calculation.
fn range_errors(values: &CalculatorValues) -> Vec<FieldError> {
    let result = calculate(values);
    let mut errors = Vec::new();

    if !result.total_investment.is_finite() {
        errors.push(FieldError::new("investmentFee", "investmentFee is out of range"));
    }
    if !result.units.is_finite() {
        errors.push(FieldError::new(
            "investment",
            "investment is out of range for this buyPrice",
        ));
    } else if !result.gross_profit.is_finite() {
        errors.push(FieldError::new("sellPrice", "sellPrice is out of range"));
    } else if !result.take_home.is_finite() {
        errors.push(FieldError::new("exitFee", "exitFee is out of range"));
    }
    if !result.percentage_change.is_finite() {
        errors.push(FieldError::new("buyPrice", "buyPrice is out of range"));
    }
    errors
}

fn collect_warnings(values: &CalculatorValues) -> Vec<InputWarning> {
    [
        (values.investment, InputWarning::NegativeInvestment),
        (values.sell_price, InputWarning::NegativeSellPrice),
        (values.investment_fee, InputWarning::NegativeInvestmentFee),
        (values.exit_fee, InputWarning::NegativeExitFee),
    ]
    .into_iter()
    .filter(|(value, _)| *value < 0.0)
    .map(|(_, warning)| warning)
    .collect()
}
