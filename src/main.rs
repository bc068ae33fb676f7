//! Futures Trading Calculator
//!
//! Liquidation price, profit/loss and risk-reward for leveraged long/short
//! positions, plus DCA averaging, target-entry solving and the three-way
//! DCA triangle.

mod calculator;
mod config;
mod error;
mod format;
mod models;
mod validation;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::calculator::{compute_dca, compute_position_metrics, compute_target_dca, compute_triangle};
use crate::config::CalculatorConfig;
use crate::models::{DcaInput, PositionInput, ScenarioKind, TargetEntryInput, TriangleInput};

/// Leveraged futures calculator CLI.
#[derive(Parser)]
#[command(name = "futcalc")]
#[command(about = "Position risk, DCA and target-entry calculator for leveraged futures", long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true, env = "FUTCALC_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info", env = "FUTCALC_LOG_LEVEL")]
    log_level: String,

    /// Print results as JSON
    #[arg(long, global = true, env = "FUTCALC_JSON")]
    json: bool,

    /// Only accept leverage from the supported tier list
    #[arg(long, global = true, env = "FUTCALC_STRICT_LEVERAGE")]
    strict_leverage: bool,

    #[command(subcommand)]
    command: Commands,
}

/// The initial position, shared by every calculator.
#[derive(Args)]
struct PositionArgs {
    /// Price at which the position was entered
    #[arg(long)]
    entry_price: String,

    /// Leverage multiplier, e.g. 10 or 10x
    #[arg(long)]
    leverage: Option<String>,

    /// Initial investment in USD (margin)
    #[arg(long)]
    position_size: String,
}

/// Validated initial position.
struct BasePosition {
    entry_price: Decimal,
    leverage: Decimal,
    position_size: Decimal,
}

impl PositionArgs {
    fn validate(&self, config: &CalculatorConfig) -> Result<BasePosition> {
        let entry_price = validation::parse_positive("entry price", &self.entry_price)?;
        let leverage = match &self.leverage {
            Some(raw) => validation::parse_leverage(raw, &config.leverage_tiers, config.strict_leverage)?,
            None => config.default_leverage,
        };
        let position_size = validation::parse_positive("position size", &self.position_size)?;

        Ok(BasePosition {
            entry_price,
            leverage,
            position_size,
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Liquidation price, potential profit/loss and risk-reward ratio
    Position {
        #[command(flatten)]
        base: PositionArgs,

        /// Order type (long, short)
        #[arg(short, long)]
        order_type: Option<String>,

        /// Price at which the position is closed to limit losses
        #[arg(long)]
        stop_loss: String,

        /// Price at which the position is closed to secure profits
        #[arg(long)]
        take_profit: String,
    },

    /// New average entry and P/L after averaging in at the current price
    Dca {
        #[command(flatten)]
        base: PositionArgs,

        /// The current market price
        #[arg(long)]
        current_price: String,

        /// Additional investment in USD
        #[arg(long)]
        dca_amount: String,
    },

    /// DCA amount required to reach a desired average entry
    Target {
        #[command(flatten)]
        base: PositionArgs,

        /// The current market price
        #[arg(long)]
        current_price: String,

        /// Desired average entry
        #[arg(long)]
        target_entry: String,
    },

    /// Solve one of DCA price (1), DCA amount (2) or average entry (3)
    Triangle {
        /// Scenario: 1 = required price, 2 = required amount, 3 = resulting entry
        #[arg(short, long)]
        scenario: u8,

        #[command(flatten)]
        base: PositionArgs,

        /// DCA amount in USD (scenarios 1 and 3)
        #[arg(long)]
        dca_amount: Option<String>,

        /// Current market price (scenarios 2 and 3)
        #[arg(long)]
        current_price: Option<String>,

        /// Desired average entry (scenarios 1 and 2)
        #[arg(long)]
        target_entry: Option<String>,
    },

    /// List the supported leverage tiers
    Tiers,

    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Setup logging; stdout is reserved for results
    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match &cli.config {
        Some(path) => CalculatorConfig::from_file(path)?,
        None => CalculatorConfig::default(),
    };
    config.json_output |= cli.json;
    config.strict_leverage |= cli.strict_leverage;
    config.validate().context("Invalid configuration")?;

    match cli.command {
        Commands::Position {
            base,
            order_type,
            stop_loss,
            take_profit,
        } => {
            let position = base.validate(&config)?;
            let input = PositionInput {
                entry_price: position.entry_price,
                leverage: position.leverage,
                position_size: position.position_size,
                order_type: match order_type {
                    Some(raw) => validation::parse_order_type(&raw)?,
                    None => config.default_order_type,
                },
                stop_loss: validation::parse_positive("stop loss", &stop_loss)?,
                take_profit: validation::parse_positive("take profit", &take_profit)?,
            };
            info!(
                entry = %input.entry_price,
                leverage = %input.leverage,
                order_type = %input.order_type,
                "Calculating position metrics"
            );

            let metrics = compute_position_metrics(&input).context("Position calculation failed")?;

            if config.json_output {
                print_json(&serde_json::json!({
                    "metrics": metrics.rounded(),
                    "risk_reward": metrics.risk_reward_text(),
                    "advisory": metrics.advisory(),
                }))?;
            } else {
                println!("{}", metrics);
            }
        }

        Commands::Dca {
            base,
            current_price,
            dca_amount,
        } => {
            let position = base.validate(&config)?;
            let input = DcaInput {
                entry_price: position.entry_price,
                leverage: position.leverage,
                position_size: position.position_size,
                current_price: validation::parse_positive("current price", &current_price)?,
                dca_amount: validation::parse_positive("dca amount", &dca_amount)?,
            };
            info!(
                current = %input.current_price,
                amount = %input.dca_amount,
                "Calculating DCA outcome"
            );

            let result = compute_dca(&input).context("DCA calculation failed")?;

            if config.json_output {
                print_json(&result.rounded())?;
            } else {
                println!("{}", result);
            }
        }

        Commands::Target {
            base,
            current_price,
            target_entry,
        } => {
            let position = base.validate(&config)?;
            let input = TargetEntryInput {
                entry_price: position.entry_price,
                leverage: position.leverage,
                position_size: position.position_size,
                current_price: validation::parse_positive("current price", &current_price)?,
                target_entry: validation::parse_positive("target entry", &target_entry)?,
            };
            info!(target = %input.target_entry, "Solving DCA for target entry");

            let result = compute_target_dca(&input).context("Target entry calculation failed")?;

            if config.json_output {
                print_json(&serde_json::json!({
                    "result": result.rounded(),
                    "target_overshot": result.is_target_overshot(),
                }))?;
            } else {
                println!("{}", result);
            }
        }

        Commands::Triangle {
            scenario,
            base,
            dca_amount,
            current_price,
            target_entry,
        } => {
            let kind = ScenarioKind::try_from(scenario)?;
            let position = base.validate(&config)?;
            let input = TriangleInput {
                entry_price: position.entry_price,
                leverage: position.leverage,
                position_size: position.position_size,
                scenario: validation::triangle_scenario(
                    kind,
                    dca_amount.as_deref(),
                    current_price.as_deref(),
                    target_entry.as_deref(),
                )?,
            };
            info!(scenario = kind.tag(), "Solving DCA triangle");

            let result = compute_triangle(&input).context("DCA triangle calculation failed")?;

            if config.json_output {
                print_json(&result.rounded())?;
            } else {
                println!("{}", result);
            }
        }

        Commands::Tiers => {
            if config.json_output {
                print_json(&config.leverage_tiers)?;
            } else {
                let tiers: Vec<String> = config.leverage_tiers.iter().map(|t| format!("{}x", t)).collect();
                println!("\nSupported leverage tiers ({}):", tiers.len());
                for row in tiers.chunks(10) {
                    println!("  {}", row.join(" "));
                }
            }
        }

        Commands::Config => {
            if config.json_output {
                print_json(&config)?;
            } else {
                println!("{}", config);
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
