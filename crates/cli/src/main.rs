//! Formulary CLI - cost, scale and price cosmetic recipes from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Cost a recipe kept in a YAML workbook
//! formulary cost body-butter.yaml
//!
//! # Scale it to 250 g and save the result
//! formulary scale body-butter.yaml --target 250 --output body-butter-250.yaml
//!
//! # Show amounts in Pakistani rupees
//! formulary --currency PKR cost body-butter.yaml
//!
//! # Price a product from a typed-in cost
//! formulary price --actual 10 --packaging 1 --container 0.5 --margin 20
//! ```
//!
//! # Commands
//!
//! - `cost` - Aggregate a recipe and print its lines and totals
//! - `scale` - Rescale a recipe to a new batch weight
//! - `suggest` - Suggest batch sizes to scale to
//! - `label` - Print the ingredient label
//! - `stock` - Check purchased stock against a batch
//! - `material` - Derive a cost per gram from purchase data
//! - `price` - Turn a cost into a sale price

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use formulary_core::{CurrencyCode, WeightUnit};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod output;

use commands::price::{CostSource, PriceArgs};
use config::CliConfig;
use output::Presenter;

#[derive(Parser)]
#[command(name = "formulary")]
#[command(author, version, about = "Recipe costing for cosmetic formulators")]
struct Cli {
    /// Display currency (overrides `FORMULARY_CURRENCY`)
    #[arg(long, global = true)]
    currency: Option<CurrencyCode>,

    /// Locale tag for number formatting (overrides `FORMULARY_LOCALE`)
    #[arg(long, global = true)]
    locale: Option<String>,

    /// YAML exchange rate file (overrides `FORMULARY_RATES_FILE`)
    #[arg(long, global = true)]
    rates: Option<PathBuf>,

    /// Write results to stdout as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate a recipe and print its lines and totals
    Cost {
        /// Workbook file
        workbook: PathBuf,
    },
    /// Rescale a recipe to a new batch weight
    Scale {
        /// Workbook file
        workbook: PathBuf,

        /// Target batch weight
        #[arg(short, long)]
        target: Decimal,

        /// Unit of the target weight
        #[arg(short, long, default_value = "g")]
        unit: WeightUnit,

        /// Write the scaled workbook here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Suggest batch sizes to scale to
    Suggest {
        /// Workbook file
        workbook: PathBuf,
    },
    /// Print the ingredient label
    Label {
        /// Workbook file
        workbook: PathBuf,
    },
    /// Check purchased stock against a batch
    Stock {
        /// Workbook file
        workbook: PathBuf,

        /// Scale to this batch weight before checking
        #[arg(short, long)]
        target: Option<Decimal>,

        /// Unit of the target weight
        #[arg(short, long, default_value = "g")]
        unit: WeightUnit,
    },
    /// Derive a cost per gram from purchase data
    Material {
        /// Price paid
        #[arg(long)]
        cost: Decimal,

        /// Quantity purchased
        #[arg(long)]
        quantity: Decimal,

        /// Unit of the quantity
        #[arg(long, default_value = "g")]
        unit: WeightUnit,

        /// Currency the price was paid in (default: display currency)
        #[arg(long)]
        entered_in: Option<CurrencyCode>,
    },
    /// Turn a cost into a sale price
    Price {
        /// Price a workbook's recipe
        #[arg(long, conflicts_with = "actual", required_unless_present = "actual")]
        workbook: Option<PathBuf>,

        /// Price a typed-in material cost
        #[arg(long)]
        actual: Option<Decimal>,

        /// Packaging cost
        #[arg(long, default_value = "0")]
        packaging: Decimal,

        /// Container or other add-on cost
        #[arg(long, default_value = "0")]
        container: Decimal,

        /// Markup on total cost, in percent
        #[arg(long)]
        margin: Decimal,

        /// Currency the typed amounts are in (default: display currency)
        #[arg(long)]
        entered_in: Option<CurrencyCode>,

        /// Price one finished unit instead of the whole batch
        #[arg(long, requires = "workbook")]
        per_unit: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // Loads `.env` before the subscriber reads its filter settings.
    let config = CliConfig::from_env();
    init_tracing();

    let result: Result<(), Box<dyn std::error::Error>> =
        config.map_err(Into::into).and_then(|config| run(cli, config));

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Text logs by default, JSON when `FORMULARY_LOG_JSON` is set.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "formulary_cli=info,formulary_core=warn".into());

    let json = config::json_logs_enabled();
    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!json).then(|| {
        tracing_subscriber::fmt::layer()
            .without_time()
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

fn run(cli: Cli, config: CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let config = config.with_overrides(cli.currency, cli.locale, cli.rates.as_deref())?;
    let presenter = Presenter::new(&config, cli.json);

    match cli.command {
        Commands::Cost { workbook } => commands::cost::run(&workbook, &presenter)?,
        Commands::Scale {
            workbook,
            target,
            unit,
            output,
        } => commands::scale::run(&workbook, target, unit, output.as_deref(), &presenter)?,
        Commands::Suggest { workbook } => commands::suggest::run(&workbook, &presenter)?,
        Commands::Label { workbook } => commands::label::run(&workbook, &presenter)?,
        Commands::Stock {
            workbook,
            target,
            unit,
        } => commands::stock::run(&workbook, target, unit, &presenter)?,
        Commands::Material {
            cost,
            quantity,
            unit,
            entered_in,
        } => commands::material::run(cost, quantity, unit, entered_in, &presenter)?,
        Commands::Price {
            workbook,
            actual,
            packaging,
            container,
            margin,
            entered_in,
            per_unit,
        } => {
            let source = match (&workbook, actual) {
                (Some(path), _) => CostSource::Workbook { path, per_unit },
                (None, Some(actual)) => CostSource::Actual(actual),
                (None, None) => return Err("either --workbook or --actual is required".into()),
            };
            let args = PriceArgs {
                packaging,
                container,
                margin,
                entered_in,
            };
            commands::price::run(source, &args, &presenter)?;
        }
    }
    Ok(())
}
