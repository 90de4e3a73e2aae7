use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use cryptopnl::cli::calc::CalcRequest;
use cryptopnl::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct CalcArgs {
    /// Ticker symbol, e.g. BTC. Use OTHER for unlisted assets
    #[arg(long)]
    crypto: String,

    /// Amount invested, excluding fees
    #[arg(long, allow_hyphen_values = true)]
    investment: Option<String>,

    /// Price per unit when buying. Fetched when omitted
    #[arg(long, allow_hyphen_values = true)]
    buy_price: Option<String>,

    /// Price per unit when selling. Fetched when omitted
    #[arg(long, allow_hyphen_values = true)]
    sell_price: Option<String>,

    /// Fee paid when buying
    #[arg(long, allow_hyphen_values = true)]
    investment_fee: Option<String>,

    /// Fee paid when selling
    #[arg(long, allow_hyphen_values = true)]
    exit_fee: Option<String>,

    /// Reference currency, defaults to the configured one
    #[arg(long)]
    currency: Option<String>,

    /// Fetch the current price even if both prices are given
    #[arg(long)]
    fetch: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

impl From<CalcArgs> for CalcRequest {
    fn from(args: CalcArgs) -> CalcRequest {
        CalcRequest {
            crypto: args.crypto,
            currency: args.currency,
            investment: args.investment,
            buy_price: args.buy_price,
            sell_price: args.sell_price,
            investment_fee: args.investment_fee,
            exit_fee: args.exit_fee,
            fetch: args.fetch,
            json: args.json,
        }
    }
}

impl From<Commands> for cryptopnl::AppCommand {
    fn from(cmd: Commands) -> cryptopnl::AppCommand {
        match cmd {
            Commands::Calc(args) => cryptopnl::AppCommand::Calc(args.into()),
            Commands::Price { ticker } => cryptopnl::AppCommand::Price { ticker },
            Commands::Tickers => cryptopnl::AppCommand::Tickers,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Calculate profit or loss of an investment
    Calc(CalcArgs),
    /// Show the current price of a ticker
    Price {
        /// Ticker symbol, e.g. ETH
        ticker: String,
    },
    /// List supported tickers
    Tickers,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => match cli.config_path.as_deref() {
            Some(path) => cryptopnl::cli::setup::setup_at_path(path),
            None => cryptopnl::cli::setup::setup(),
        },
        Some(cmd) => cryptopnl::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
