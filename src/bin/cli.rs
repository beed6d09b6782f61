//! Storefront CLI
//!
//! Command-line access to the same pipeline the dashboard runs:
//! - Headline totals
//! - Daily rollup
//! - Category rollup (best or worst performing)
//! - Default config generation

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use storefront::config::{generate_default_config, Config};
use storefront::data::{load_orders, DataSource, OrderTable};
use storefront::present::CurrencyFormatter;
use storefront::rollup::{
    best_performing, category_rollup, daily_rollup, worst_performing, CategoryRollupRow,
    DailyRollupRow, HeadlineTotals,
};

#[derive(Parser)]
#[command(name = "storefront-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Order rollups from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Order CSV path or URL (default: configured source)
    #[arg(short, long, global = true)]
    pub source: Option<String>,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show total orders and revenue
    Summary,

    /// Show orders and revenue per day
    Daily,

    /// Show sales per product category
    Categories {
        /// Least sold first
        #[arg(long)]
        worst: bool,
        /// Number of categories to show (default: all)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("Config written to {}", path.display());
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::from_env(),
    };
    if let Some(source) = &cli.source {
        config.source.location = source.clone();
    }
    config.validate()?;

    // Logs go to stderr so piped output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(storefront::logging::env_filter(&config.logging))
        .with_writer(std::io::stderr)
        .init();

    let orders = load(&config.source.data_source()).await?;

    match cli.command {
        Commands::Summary => {
            let formatter = CurrencyFormatter::new(&config.display.currency, &config.display.locale)?;
            let daily = daily_rollup(&orders);
            let totals = HeadlineTotals::from_daily(&daily);
            print_summary(&totals, &formatter, &daily, cli.format)?;
        }

        Commands::Daily => {
            let daily = daily_rollup(&orders);
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&daily)?),
                OutputFormat::Csv => print_csv(&daily)?,
                OutputFormat::Table => print_daily_table(&daily),
            }
        }

        Commands::Categories { worst, limit } => {
            let rollup = category_rollup(&orders);
            let n = limit.unwrap_or(rollup.len());
            let rows = if worst {
                worst_performing(&rollup, n)
            } else {
                best_performing(&rollup, n)
            };
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
                OutputFormat::Csv => print_csv(&rows)?,
                OutputFormat::Table => print_category_table(&rows),
            }
        }

        // written out above, before any data is loaded
        Commands::Config { .. } => {}
    }

    Ok(())
}

async fn load(source: &DataSource) -> anyhow::Result<OrderTable> {
    let client = reqwest::Client::new();
    load_orders(source, &client)
        .await
        .with_context(|| format!("loading orders from {}", source))
}

fn print_summary(
    totals: &HeadlineTotals,
    formatter: &CurrencyFormatter,
    daily: &[DailyRollupRow],
    format: OutputFormat,
) -> anyhow::Result<()> {
    let revenue = formatter.format(totals.total_revenue);

    if format == OutputFormat::Json {
        let body = serde_json::json!({
            "total_orders": totals.total_orders,
            "total_revenue": totals.total_revenue,
            "total_revenue_formatted": revenue,
            "days": daily.len(),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("Total orders:  {}", totals.total_orders);
    println!("Total revenue: {}", revenue);
    if let (Some(first), Some(last)) = (daily.first(), daily.last()) {
        println!("Date range:    {} to {} ({} days)", first.date, last.date, daily.len());
    }
    Ok(())
}

fn print_daily_table(rows: &[DailyRollupRow]) {
    if rows.is_empty() {
        println!("No dated orders.");
        return;
    }

    println!("{:<12} {:>12} {:>16}", "Date", "Orders", "Revenue");
    println!("{}", "-".repeat(42));
    for row in rows {
        println!(
            "{:<12} {:>12} {:>16}",
            row.date.to_string(),
            row.order_count,
            row.revenue.round_dp(2).to_string()
        );
    }
}

fn print_category_table(rows: &[CategoryRollupRow]) {
    if rows.is_empty() {
        println!("No categorised orders.");
        return;
    }

    println!("{:<40} {:>16}", "Category", "Number of Sales");
    println!("{}", "-".repeat(57));
    for row in rows {
        println!("{:<40} {:>16}", row.category, row.number_of_sales);
    }
}

fn print_csv<T: serde::Serialize>(rows: &[T]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
