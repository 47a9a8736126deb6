//! pvf-filter - Main entry point
//!
//! Filters a pageview log down to English article titles and prints them
//! ordered by total views (descending), ties by title (ascending).

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pvf_common::config::{ConfigResolver, ConfigSource, CONFIG_ENV_VAR};
use pvf_common::RuleSet;
use pvf_filter::{run, write_records, OutputFormat};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for pvf-filter
#[derive(Parser, Debug)]
#[command(name = "pvf-filter")]
#[command(about = "Filter and rank pageview log records")]
#[command(version)]
struct Args {
    /// Input pageview file (reads stdin when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (writes stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Tsv)]
    format: OutputFormat,

    /// Only write the N most viewed titles
    #[arg(short = 'n', long)]
    top: Option<usize>,

    /// Print filter statistics as JSON to stderr
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Tracing comes up first so config resolution warnings are visible.
    // RUST_LOG wins over the configured level.
    let rust_log_set = std::env::var_os("RUST_LOG").is_some();
    let (filter, filter_handle) = reload::Layer::new(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    );
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    info!(
        "Starting pvf-filter v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let resolver = ConfigResolver::new(args.config.clone());
    let (config, source) = resolver.resolve().context("Failed to load configuration")?;
    match &source {
        ConfigSource::File(path) => info!("Config file: {}", path.display()),
        ConfigSource::Defaults => info!("Config file: none (compiled defaults)"),
    }

    if !rust_log_set {
        filter_handle
            .reload(EnvFilter::new(&config.logging.level))
            .context("Failed to apply configured log level")?;
    }

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => {
            info!("Reading {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("Failed to open input {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => {
            info!("Reading stdin");
            Box::new(BufReader::new(io::stdin().lock()))
        }
    };

    let rules = RuleSet::from_config(&config.filter);
    let mut report = run(rules, reader).context("Failed to read input")?;

    if let Some(n) = args.top {
        report.records.truncate(n);
    }

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    write_records(&mut writer, &report.records, args.format).context("Failed to write output")?;
    info!("Wrote {} records", report.records.len());

    if args.stats {
        let stats = serde_json::to_string_pretty(&report.stats)?;
        eprintln!("{}", stats);
    }

    Ok(())
}
