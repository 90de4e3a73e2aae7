pub mod calc;
pub mod price;
pub mod setup;
pub mod tickers;
pub mod ui;
