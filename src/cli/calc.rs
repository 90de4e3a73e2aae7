use super::ui;
use crate::core::{
    CalculationResult, CalculatorInput, CalculatorSession, NetworkError, SelectionOutcome,
    Submission,
};
use anyhow::Result;
use comfy_table::Cell;
use serde::Serialize;
use tracing::{debug, info};

/// Values given on the command line. `None` means the field was left empty.
#[derive(Debug, Clone, Default)]
pub struct CalcRequest {
    pub crypto: String,
    pub currency: Option<String>,
    pub investment: Option<String>,
    pub buy_price: Option<String>,
    pub sell_price: Option<String>,
    pub investment_fee: Option<String>,
    pub exit_fee: Option<String>,
    /// Look up the current price even when both prices were given.
    pub fetch: bool,
    pub json: bool,
}

impl CalcRequest {
    pub fn to_input(&self, default_currency: &str) -> CalculatorInput {
        let mut input = CalculatorInput {
            currency: self
                .currency
                .clone()
                .unwrap_or_else(|| default_currency.to_string()),
            crypto: self.crypto.clone(),
            ..Default::default()
        };
        self.apply_explicit(&mut input);
        input
    }

    fn apply_explicit(&self, input: &mut CalculatorInput) {
        let fields = [
            (&self.investment, &mut input.investment),
            (&self.buy_price, &mut input.buy_price),
            (&self.sell_price, &mut input.sell_price),
            (&self.investment_fee, &mut input.investment_fee),
            (&self.exit_fee, &mut input.exit_fee),
        ];
        for (given, field) in fields {
            if let Some(value) = given {
                *field = value.clone();
            }
        }
    }

    fn wants_price(&self) -> bool {
        self.fetch || self.buy_price.is_none() || self.sell_price.is_none()
    }
}

#[derive(Debug)]
pub enum Notice {
    PriceApplied { ticker: String, price: f64, currency: String },
    NoPrice { ticker: String },
    FetchFailed(NetworkError),
}

impl Notice {
    fn render(&self) -> String {
        match self {
            Notice::PriceApplied {
                ticker,
                price,
                currency,
            } => ui::style_text(
                &format!(
                    "Using current {ticker} price {price} {} where no price was given",
                    currency.to_uppercase()
                ),
                ui::StyleType::Subtle,
            ),
            Notice::NoPrice { ticker } => ui::style_text(
                &format!("No price available for {ticker}, enter prices manually"),
                ui::StyleType::Warning,
            ),
            Notice::FetchFailed(e) => ui::style_text(
                &format!("Could not fetch current price: {e}"),
                ui::StyleType::Warning,
            ),
        }
    }
}

pub struct CalcReport {
    pub submission: Submission,
    pub notices: Vec<Notice>,
}

/// Pre-fills prices when needed, then validates and calculates. A failed
/// price fetch becomes a notice; only validation failures are errors.
pub async fn evaluate(session: &CalculatorSession, request: &CalcRequest) -> Result<CalcReport> {
    let mut notices = Vec::new();

    if request.wants_price() {
        let spinner = (!request.json).then(|| ui::new_spinner("Fetching current price..."));
        let outcome = session.select_ticker(&request.crypto).await;
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        match outcome {
            Ok(SelectionOutcome::Applied(quote)) => notices.push(Notice::PriceApplied {
                ticker: request.crypto.clone(),
                price: quote.price,
                currency: quote.currency,
            }),
            Ok(SelectionOutcome::Unlisted | SelectionOutcome::Unpriced(_)) => {
                notices.push(Notice::NoPrice {
                    ticker: request.crypto.clone(),
                })
            }
            Ok(SelectionOutcome::Superseded) => debug!("Price lookup superseded"),
            Err(e) => notices.push(Notice::FetchFailed(e)),
        }

        // Values typed by the user take precedence over fetched ones.
        session.edit(|form| request.apply_explicit(form)).await;
    }

    let submission = session.submit().await?;
    Ok(CalcReport {
        submission,
        notices,
    })
}

#[derive(Serialize)]
struct JsonReport<'a> {
    crypto: &'a str,
    currency: &'a str,
    #[serde(flatten)]
    result: &'a CalculationResult,
    warnings: Vec<String>,
}

pub async fn run(session: &CalculatorSession, request: &CalcRequest) -> Result<()> {
    info!("Calculating profit/loss for {}", request.crypto);

    let report = match evaluate(session, request).await {
        Ok(report) => report,
        Err(e) => {
            if let Some(validation) = e.downcast_ref::<crate::core::ValidationError>() {
                for field_error in &validation.errors {
                    eprintln!("{}", ui::style_text(&field_error.to_string(), ui::StyleType::Error));
                }
            }
            return Err(e);
        }
    };

    for notice in &report.notices {
        eprintln!("{}", notice.render());
    }

    if request.json {
        let input = &report.submission.input;
        let json = JsonReport {
            crypto: &input.crypto,
            currency: &input.currency,
            result: &report.submission.result,
            warnings: input.warnings.iter().map(ToString::to_string).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    println!("{}", display_report(&report.submission));
    Ok(())
}

pub fn display_report(submission: &Submission) -> String {
    let input = &submission.input;
    let result = &submission.result;
    let currency = &input.currency;

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(&input.crypto),
        ui::header_cell(&format!("Amount ({currency})")),
    ]);
    table.add_row(vec![
        Cell::new("Profit / Loss"),
        ui::profit_loss_cell(result.profit_loss, result.percentage_change),
    ]);
    table.add_row(vec![
        Cell::new("Total Investment"),
        ui::amount_cell(result.total_investment),
    ]);
    table.add_row(vec![
        Cell::new("Total Take-home"),
        ui::amount_cell(result.take_home),
    ]);
    table.add_row(vec![Cell::new("Units"), ui::amount_cell(result.units)]);

    let mut output = table.to_string();
    for warning in &input.warnings {
        output.push_str(&format!(
            "\n{}",
            ui::style_text(&format!("Note: {warning}"), ui::StyleType::Warning)
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lookup::test_support::MockProvider;
    use crate::core::{PriceLookup, PriceProvider, TickerCatalog, ValidationError};
    use std::sync::Arc;

    fn session_for(request: &CalcRequest, provider: Arc<dyn PriceProvider>) -> CalculatorSession {
        let lookup = PriceLookup::new(Arc::new(TickerCatalog::builtin()), provider, "usd");
        CalculatorSession::new(lookup, request.to_input("USD"))
    }

    fn request() -> CalcRequest {
        CalcRequest {
            crypto: "BTC".to_string(),
            investment: Some("1000".to_string()),
            buy_price: Some("100".to_string()),
            sell_price: Some("120".to_string()),
            investment_fee: Some("5".to_string()),
            exit_fee: Some("2".to_string()),
            json: true,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_explicit_prices_skip_lookup() {
        let provider = Arc::new(MockProvider::new(&[("bitcoin", 50000.0)]));
        let request = request();
        let session = session_for(&request, Arc::clone(&provider) as Arc<dyn PriceProvider>);

        let report = evaluate(&session, &request).await.unwrap();
        assert_eq!(provider.calls(), 0);
        assert!(report.notices.is_empty());

        let result = report.submission.result;
        assert!((result.total_investment - 1005.0).abs() < 1e-9);
        assert!((result.take_home - 198.0).abs() < 1e-9);
        assert!((result.percentage_change - 20.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_missing_buy_price_is_prefilled() {
        let provider = Arc::new(MockProvider::new(&[("bitcoin", 100.0)]));
        let request = CalcRequest {
            buy_price: None,
            ..request()
        };
        let session = session_for(&request, provider);

        let report = evaluate(&session, &request).await.unwrap();
        assert!(matches!(
            report.notices.as_slice(),
            [Notice::PriceApplied { price, .. }] if *price == 100.0
        ));
        // Sell price was given explicitly and must survive the pre-fill.
        assert_eq!(report.submission.input.values.sell_price, 120.0);
        assert_eq!(report.submission.input.values.buy_price, 100.0);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_notice_not_error() {
        let provider = Arc::new(MockProvider::new(&[]));
        let request = CalcRequest {
            fetch: true,
            ..request()
        };
        let session = session_for(&request, provider);

        let report = evaluate(&session, &request).await.unwrap();
        assert!(matches!(
            report.notices.as_slice(),
            [Notice::FetchFailed(NetworkError::Status { status: 500, .. })]
        ));
        assert!((report.submission.result.gross_profit - 200.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_unlisted_ticker_without_prices_fails_validation() {
        let provider = Arc::new(MockProvider::new(&[]));
        let request = CalcRequest {
            crypto: "OTHER".to_string(),
            buy_price: None,
            sell_price: None,
            ..request()
        };
        let session = session_for(&request, Arc::clone(&provider) as Arc<dyn PriceProvider>);

        let err = evaluate(&session, &request).await.err().unwrap();
        assert_eq!(provider.calls(), 0);
        let validation = err.downcast_ref::<ValidationError>().unwrap();
        assert!(validation.message_for("buyPrice").is_some());
        assert!(validation.message_for("sellPrice").is_some());
    }

    #[tokio::test]
    async fn test_zero_buy_price_rejected_before_calculation() {
        let provider = Arc::new(MockProvider::new(&[]));
        let request = CalcRequest {
            buy_price: Some("0".to_string()),
            ..request()
        };
        let session = session_for(&request, provider);

        let err = evaluate(&session, &request).await.err().unwrap();
        let validation = err.downcast_ref::<ValidationError>().unwrap();
        assert_eq!(validation.message_for("buyPrice"), Some("buyPrice must be > 0"));
    }

    #[tokio::test]
    async fn test_display_report_contains_rounded_values() {
        let provider = Arc::new(MockProvider::new(&[]));
        let request = CalcRequest {
            crypto: "ETH".to_string(),
            investment: Some("500".to_string()),
            buy_price: Some("50".to_string()),
            sell_price: Some("40".to_string()),
            investment_fee: None,
            exit_fee: None,
            ..request()
        };
        let session = session_for(&request, provider);
        let report = evaluate(&session, &request).await.unwrap();

        let output = console::strip_ansi_codes(&display_report(&report.submission)).to_string();
        assert!(output.contains("-100.00 (-20.00%)"));
        assert!(output.contains("500.00"));
        assert!(output.contains("Amount (USD)"));
    }
}
