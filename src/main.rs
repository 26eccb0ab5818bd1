//! analytics-query CLI
//!
//! Command-line interface for running Core Reporting queries:
//! - Query a profile and print the merged report
//! - List the column catalog
//! - Generate a default config file

use analytics_query::config::{generate_default_config, Config, LoggingConfig};
use analytics_query::{
    ColumnCatalog, ColumnKind, DateRange, HttpTransport, Profile, QuerySpec, Report,
};
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "analytics-query")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Query the Core Reporting API with transparent pagination")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a report query against a profile
    Query {
        /// Profile (view) id, without the `ga:` prefix
        #[arg(short, long)]
        profile: String,
        /// Metrics (comma-separated or repeated)
        #[arg(short, long, value_delimiter = ',', required = true)]
        metrics: Vec<String>,
        /// Dimensions (comma-separated or repeated)
        #[arg(short, long, value_delimiter = ',')]
        dimensions: Vec<String>,
        /// Start date: YYYY-MM-DD, today, yesterday or NdaysAgo
        #[arg(long, default_value = "7daysAgo")]
        start: String,
        /// End date (default: derived from the offsets)
        #[arg(long)]
        stop: Option<String>,
        /// Month offset from the start date
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        months: i32,
        /// Day offset from the start date
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        days: i64,
        /// Time bucket: year, month, week, day or hour
        #[arg(short, long)]
        granularity: Option<String>,
        /// Sampling precision: FASTER, DEFAULT or HIGH_PRECISION
        #[arg(long)]
        precision: Option<String>,
        /// Stop after this many rows
        #[arg(short, long)]
        limit: Option<u32>,
        /// Rows per request
        #[arg(long)]
        step: Option<u32>,
    },

    /// List the columns the API exposes
    Columns {
        /// Only show metrics or dimensions
        #[arg(long)]
        kind: Option<String>,
        /// Include deprecated columns
        #[arg(long)]
        deprecated: bool,
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

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    init_logging(&config.logging);

    match cli.command {
        Commands::Query {
            profile,
            metrics,
            dimensions,
            start,
            stop,
            months,
            days,
            granularity,
            precision,
            limit,
            step,
        } => {
            let transport = Arc::new(HttpTransport::new(config.api.transport())?);
            let catalog = ColumnCatalog::new(
                transport
                    .columns()
                    .await
                    .context("failed to load column catalog")?,
            );
            let profile = Arc::new(Profile::new(
                profile.clone(),
                profile,
                Arc::new(catalog),
                transport,
            ));

            let mut range = DateRange::new(start).months(months).days(days).precision(
                precision.unwrap_or_else(|| config.query.precision.token().to_string()),
            );
            if let Some(stop) = stop {
                range = range.stop(stop);
            }
            if let Some(granularity) = granularity {
                range = range.granularity(granularity);
            }

            let mut query: QuerySpec = profile.query(metrics, dimensions)?.range(range)?;
            if let Some(size) = step.or(config.query.page_size) {
                query = query.step(size);
            }
            if let Some(limit) = limit {
                query = query.limit(limit);
            }

            let report = query.execute().await?;
            tracing::info!(rows = report.len(), sampled = report.is_sampled(), "Report ready");

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Csv => print_csv(&report)?,
                OutputFormat::Table => print_table(&report),
            }
        }

        Commands::Columns { kind, deprecated } => {
            let kind = match kind.as_deref() {
                None => None,
                Some("metric") | Some("metrics") => Some(ColumnKind::Metric),
                Some("dimension") | Some("dimensions") => Some(ColumnKind::Dimension),
                Some(other) => anyhow::bail!("unknown column kind: {}", other),
            };

            let transport = HttpTransport::new(config.api.transport())?;
            let columns = transport.columns().await?;

            println!("{:<32} {:<10} {:<10} {}", "ID", "Kind", "Type", "Name");
            println!("{}", "-".repeat(72));
            for column in columns
                .iter()
                .filter(|c| deprecated || !c.deprecated)
                .filter(|c| kind.map_or(true, |k| c.kind == k))
            {
                println!(
                    "{:<32} {:<10} {:<10} {}",
                    column.id, column.kind, column.data_type, column.name
                );
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("analytics_query={}", config.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_table(report: &Report) {
    let headers = report.header_ids();
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            report
                .rows()
                .iter()
                .filter_map(|row| row.get(i).map(String::len))
                .chain(std::iter::once(h.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
    };

    println!("{}", line(headers.clone()));
    println!("{}", "-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));
    for row in report.rows() {
        println!("{}", line(row.iter().map(String::as_str).collect()));
    }

    println!();
    println!(
        "{} rows{}{}",
        report.len(),
        if report.is_complete() { "" } else { " (more available)" },
        if report.is_sampled() { ", sampled" } else { "" }
    );
}

fn print_csv(report: &Report) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    writer.write_record(report.header_ids())?;
    for row in report.rows() {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
