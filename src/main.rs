//! Catalog-Crawl main entry point
//!
//! This is the command-line interface for the Catalog-Crawl harvester.

use catalog_crawl::config::{load_config_with_hash, validate, Config};
use catalog_crawl::crawler::crawl;
use catalog_crawl::output::{export_csv, COLUMNS};
use catalog_crawl::{CatalogError, Endpoints};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Catalog-Crawl: a course-catalog harvester
///
/// Walks every school, subject, class and section of the course catalog,
/// caches each response on disk, and writes one CSV row per section.
#[derive(Parser, Debug)]
#[command(name = "catalog-crawl")]
#[command(version)]
#[command(about = "A course-catalog harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = setup_logging(cli.verbose, cli.quiet) {
        eprintln!("{:#}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) -> anyhow::Result<()> {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catalog_crawl=info,warn"),
            1 => EnvFilter::new("catalog_crawl=debug,info"),
            2 => EnvFilter::new("catalog_crawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("initialize tracing subscriber: {err}"))
}

async fn run(cli: Cli) -> Result<(), CatalogError> {
    let config = load_configuration(cli.config.as_deref())?;

    if cli.dry_run {
        handle_dry_run(&config);
        Ok(())
    } else {
        handle_crawl(&config).await
    }
}

/// Loads the configuration file, or validated defaults when none is given
fn load_configuration(path: Option<&Path>) -> Result<Config, CatalogError> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            let config = Config::default();
            validate(&config)?;
            Ok(config)
        }
    }
}

/// Handles the --dry-run mode: shows the resolved configuration
fn handle_dry_run(config: &Config) {
    println!("=== Catalog-Crawl Dry Run ===\n");

    println!("Catalog:");
    println!("  Base URL: {}", config.catalog.base_url);
    println!("  Term: {}", config.catalog.term);
    println!(
        "  Schools index: {}",
        Endpoints::from_config(&config.catalog).schools()
    );

    println!("\nFetch:");
    println!("  Timeout: {}ms", config.fetch.timeout_ms);
    println!("  User agent: {}", config.fetch.user_agent);

    println!("\nRun:");
    println!("  Max attempts: {}", config.run.max_attempts);

    println!("\nOutput:");
    println!("  Cache directory: {}", config.output.cache_dir);
    println!("  CSV: {}", config.output.csv_path);
    println!("  Columns: {}", COLUMNS.join(", "));

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> Result<(), CatalogError> {
    let report = crawl(config).await?;

    tracing::info!(
        "Crawl completed: {} sections after {} attempt(s) in {}s",
        report.records.len(),
        report.attempts,
        report.duration_seconds()
    );
    tracing::info!(
        "Cache: {} hits, {} misses, {} writes ({:.1}% hit rate)",
        report.cache_stats.hits,
        report.cache_stats.misses,
        report.cache_stats.writes,
        report.cache_stats.hit_rate() * 100.0
    );

    let csv_path = Path::new(&config.output.csv_path);
    let summary = export_csv(&report.records, csv_path)?;

    let unused: Vec<&str> = summary.unused_keys.iter().map(String::as_str).collect();
    tracing::info!("unused keys: {}", unused.join(", "));
    tracing::info!("Wrote {} rows to {}", summary.rows, csv_path.display());
    tracing::info!("done");

    Ok(())
}
