use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use liquisim::fill::{FillModel, FillModelConfig, LiquidityParams};
use liquisim::liquidity::{is_known_liquidity_model, list_liquidity_models};
use liquisim::report::BookReport;
use liquisim::types::{check_precision, Instrument, Order, OrderSide, Price, Quantity};

#[derive(Parser)]
#[command(name = "liquisim", about = "Liquisim -- fill gates and synthetic liquidity for backtests")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SideArg {
    Buy,
    Sell,
}

impl From<SideArg> for OrderSide {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Buy => OrderSide::Buy,
            SideArg::Sell => OrderSide::Sell,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize a book for one order against a best bid/ask
    Synth {
        /// Liquidity model to use
        #[arg(short, long, default_value = "best_price")]
        model: String,

        /// Best bid price
        #[arg(long)]
        best_bid: f64,

        /// Best ask price
        #[arg(long)]
        best_ask: f64,

        /// Instrument price increment
        #[arg(long, default_value = "0.01")]
        tick: f64,

        /// Decimals in the price increment
        #[arg(long, default_value = "2")]
        price_precision: u8,

        /// Decimals in order sizes
        #[arg(long, default_value = "0")]
        size_precision: u8,

        /// Order side
        #[arg(long, value_enum, default_value = "buy")]
        side: SideArg,

        /// Order quantity
        #[arg(long, default_value = "10")]
        quantity: f64,

        /// Seed for the decision source (probabilistic model)
        #[arg(long)]
        seed: Option<u64>,

        /// Start market_hours in a low-liquidity period
        #[arg(long)]
        low_liquidity: bool,

        /// Recent traded volume for volume_sensitive
        #[arg(long, default_value = "1000")]
        recent_volume: f64,

        /// Liquidity factor for competition_aware
        #[arg(long, default_value = "0.3")]
        liquidity_factor: f64,

        /// Typical per-side volume for competition_aware
        #[arg(long, default_value = "1000")]
        typical_volume: f64,

        /// Print the book as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Export levels to CSV
        #[arg(long)]
        csv: Option<String>,
    },

    /// List available liquidity models
    Models,

    /// Sample the probability gates and report observed hit rates
    Gate {
        /// JSON fill model config (defaults apply to missing fields)
        #[arg(long)]
        config: Option<String>,

        /// Number of draws per gate
        #[arg(long, default_value = "10000")]
        trials: u32,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Synth {
            model,
            best_bid,
            best_ask,
            tick,
            price_precision,
            size_precision,
            side,
            quantity,
            seed,
            low_liquidity,
            recent_volume,
            liquidity_factor,
            typical_volume,
            json,
            csv,
        } => {
            let config = FillModelConfig {
                random_seed: seed,
                model,
                liquidity: LiquidityParams {
                    liquidity_factor,
                    typical_volume,
                    recent_volume,
                    low_liquidity,
                },
                ..FillModelConfig::default()
            };
            let quote = Quote {
                best_bid,
                best_ask,
                tick,
                price_precision,
                size_precision,
            };
            check_precision(price_precision).context("invalid --price-precision")?;
            check_precision(size_precision).context("invalid --size-precision")?;
            let order = Order::new(side.into(), Quantity::new(quantity, size_precision));
            cmd_synth(config, quote, order, json, csv)
        }
        Commands::Models => cmd_models(),
        Commands::Gate { config, trials } => cmd_gate(config, trials),
    }
}

/// Market inputs for `synth`.
struct Quote {
    best_bid: f64,
    best_ask: f64,
    tick: f64,
    price_precision: u8,
    size_precision: u8,
}

fn cmd_synth(
    config: FillModelConfig,
    quote: Quote,
    order: Order,
    json: bool,
    csv_path: Option<String>,
) -> Result<()> {
    // Validate model exists before building anything.
    if !is_known_liquidity_model(&config.model) {
        let names: Vec<&str> = list_liquidity_models().iter().map(|(n, _)| *n).collect();
        bail!(
            "unknown liquidity model '{}'. available: {}",
            config.model,
            names.join(", ")
        );
    }
    if quote.best_bid > quote.best_ask {
        bail!(
            "best bid {} is above best ask {}",
            quote.best_bid,
            quote.best_ask
        );
    }

    let instrument = Instrument::new(
        "SYNTH.SIM",
        Price::new(quote.tick, quote.price_precision),
        Quantity::from_raw(1, quote.size_precision).context("invalid size precision")?,
    )
    .context("invalid instrument")?;

    let mut fill_model = FillModel::from_config(&config).context("invalid fill model config")?;
    let book = fill_model
        .synthesize_liquidity(
            &instrument,
            &order,
            instrument.make_price(quote.best_bid),
            instrument.make_price(quote.best_ask),
        )
        .context("liquidity synthesis failed")?;

    let Some(book) = book else {
        println!(
            "Model '{}' does not synthesize liquidity; the matching engine uses its own fill logic.",
            config.model
        );
        return Ok(());
    };

    let report = BookReport::from_book(&book, &config.model);
    if json {
        let out = serde_json::to_string_pretty(&book).context("failed to serialize book")?;
        println!("{}", out);
    } else {
        report.print();
    }

    if let Some(ref path) = csv_path {
        let csv_path = PathBuf::from(path);
        report
            .export_csv(&csv_path)
            .with_context(|| format!("failed to export CSV to {}", path))?;
        println!("Levels exported to {}", path);
    }

    Ok(())
}

fn cmd_models() -> Result<()> {
    println!();
    println!("Available liquidity models:");
    println!();
    for (name, description) in list_liquidity_models() {
        println!("  {:<26} {}", name, description);
    }
    println!();
    Ok(())
}

fn cmd_gate(config_path: Option<String>, trials: u32) -> Result<()> {
    let config = match config_path {
        Some(ref p) => {
            let json = std::fs::read_to_string(p)
                .with_context(|| format!("failed to read config at {}", p))?;
            FillModelConfig::from_json_str(&json)
                .with_context(|| format!("invalid config at {}", p))?
        }
        None => FillModelConfig::default(),
    };

    let mut fill_model = FillModel::from_config(&config).context("invalid fill model config")?;
    println!("{}", fill_model);

    let mut limit = 0_u32;
    let mut stop = 0_u32;
    let mut slipped = 0_u32;
    for _ in 0..trials {
        limit += u32::from(fill_model.is_limit_filled());
        stop += u32::from(fill_model.is_stop_filled());
        slipped += u32::from(fill_model.is_slipped());
    }

    let rate = |hits: u32| -> f64 {
        if trials > 0 {
            f64::from(hits) / f64::from(trials) * 100.0
        } else {
            0.0
        }
    };

    println!();
    println!("  Trials:          {}", trials);
    println!(
        "  Limit filled:    {}    ({:.1}%, configured {:.1}%)",
        limit,
        rate(limit),
        config.prob_fill_on_limit * 100.0
    );
    println!(
        "  Stop filled:     {}    ({:.1}%, configured {:.1}%)",
        stop,
        rate(stop),
        config.prob_fill_on_stop * 100.0
    );
    println!(
        "  Slipped:         {}    ({:.1}%, configured {:.1}%)",
        slipped,
        rate(slipped),
        config.prob_slippage * 100.0
    );
    println!();
    Ok(())
}
