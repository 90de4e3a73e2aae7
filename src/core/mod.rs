//! Core business logic abstractions

pub mod cache;
pub mod calculator;
pub mod catalog;
pub mod config;
pub mod error;
pub mod input;
pub mod log;
pub mod lookup;
pub mod price;
pub mod session;

// Re-export main types for cleaner imports
pub use calculator::{CalculationResult, calculate};
pub use catalog::{OTHER_TICKER, TickerCatalog, TickerEntry};
pub use error::{FieldError, NetworkError, ValidationError};
pub use input::{CalculatorInput, CalculatorValues, InputWarning, ValidatedInput};
pub use lookup::{LookupOutcome, PriceLookup};
pub use price::{PriceProvider, PriceQuote};
pub use session::{CalculatorSession, SelectionOutcome, Submission};
