//! Leadsift main entry point
//!
//! Command-line interface for the Leadsift page scraper.

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use leadsift::config::{load_config_with_hash, Config};
use leadsift::output::{print_summary, write_outputs, RunSummary};
use leadsift::records::WorkItem;
use leadsift::scrape::{build_http_client, CancelFlag, Pipeline, RateLimiter, RetryPolicy};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Leadsift: a polite structured-page scraper
///
/// Leadsift fetches a configured worklist of profile and company pages,
/// one at a time with randomized delays, extracts their text fields,
/// and writes the results to kind-specific CSV files.
#[derive(Parser, Debug)]
#[command(name = "leadsift")]
#[command(version)]
#[command(about = "A polite structured-page scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be scraped without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_scrape(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("leadsift=info,warn"),
            1 => EnvFilter::new("leadsift=debug,info"),
            2 => EnvFilter::new("leadsift=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the plan
fn handle_dry_run(config: &Config) {
    println!("=== Leadsift Dry Run ===\n");

    println!("Scraper Configuration:");
    println!("  Max attempts: {}", config.scraper.max_attempts);
    println!("  Request timeout: {}ms", config.scraper.request_timeout_ms);
    println!("  Backoff base: {}ms", config.scraper.backoff_base_ms);
    println!(
        "  Delay between requests: {}-{}ms",
        config.scraper.delay_min_ms, config.scraper.delay_max_ms
    );

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nOutput:");
    println!("  Profiles: {}", config.output.profiles_path);
    println!("  Companies: {}", config.output.companies_path);

    println!("\nTargets ({}):", config.targets.len());
    for target in &config.targets {
        println!("  - [{}] {}", target.kind, target.url);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would scrape {} target URLs", config.targets.len());
}

/// Handles the main scrape operation
async fn handle_scrape(config: Config) -> anyhow::Result<()> {
    // Build the worklist; URLs were already validated with the config
    let items = config
        .targets
        .iter()
        .map(|t| Ok(WorkItem::new(t.url.parse()?, t.kind)))
        .collect::<Result<Vec<_>, url::ParseError>>()
        .context("invalid target URL")?;

    let client = build_http_client(
        &config.user_agent,
        Duration::from_millis(config.scraper.request_timeout_ms),
    )
    .context("failed to build HTTP client")?;

    let limiter = RateLimiter::from_millis(config.scraper.delay_min_ms, config.scraper.delay_max_ms);
    let retry = RetryPolicy::new(
        config.scraper.max_attempts,
        Duration::from_millis(config.scraper.backoff_base_ms),
    );
    let pipeline = Pipeline::new(client, limiter, retry);

    // Ctrl-C stops the run at the next item boundary, keeping what we have
    let cancel = CancelFlag::new();
    let signal_flag = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing current item then stopping");
            signal_flag.cancel();
        }
    });

    let started_at = Utc::now();
    let started = std::time::Instant::now();

    let run_state = pipeline.run_with_cancel(&items, &cancel).await;

    // A failed flush loses the whole run's work, so this error is fatal
    let artifacts = write_outputs(&run_state, &config.output)?;

    let summary = RunSummary::from_run(&run_state, started_at, started.elapsed(), artifacts);
    print_summary(&summary);

    Ok(())
}
