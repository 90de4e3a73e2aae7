use super::ui;
use crate::core::{LookupOutcome, PriceLookup};
use anyhow::Result;

pub async fn run(lookup: &PriceLookup, ticker: &str) -> Result<()> {
    let pb = ui::new_spinner(&format!("Fetching {ticker} price..."));
    let outcome = lookup.lookup(ticker).await;
    pb.finish_and_clear();

    println!("{}", describe(ticker, &outcome?));
    Ok(())
}

fn describe(ticker: &str, outcome: &LookupOutcome) -> String {
    match outcome {
        LookupOutcome::Quoted(quote) => format!(
            "{}: {} {}",
            ui::style_text(&ticker.to_uppercase(), ui::StyleType::TotalLabel),
            ui::style_text(&quote.price.to_string(), ui::StyleType::TotalValue),
            quote.currency.to_uppercase()
        ),
        LookupOutcome::Unlisted => ui::style_text(
            &format!("No price available for {ticker}"),
            ui::StyleType::Warning,
        ),
    }
}
