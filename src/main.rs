//! Ripple-Crawl main entry point
//!
//! This is the command-line interface for the Ripple-Crawl breadth-first crawler.

use anyhow::Context;
use clap::Parser;
use ripple_crawl::config::{load_config, validate, Config};
use ripple_crawl::crawler::crawl;
use ripple_crawl::CrawlError;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Ripple-Crawl: a polite breadth-first web crawler
///
/// Starting from a seed URL, Ripple-Crawl fetches linked pages up to a fixed
/// count, never revisiting a page and honouring each host's robots.txt.
#[derive(Parser, Debug)]
#[command(name = "ripple-crawl")]
#[command(version)]
#[command(about = "A polite breadth-first web crawler", long_about = None)]
struct Cli {
    /// Seed URL; prompted for when omitted
    #[arg(value_name = "SEED")]
    seed: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Maximum number of pages to fetch (overrides the config file)
    #[arg(short, long)]
    limit: Option<usize>,

    /// Number of concurrent fetches (overrides the config file)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;

    let seed = match cli.seed.clone() {
        Some(seed) => seed,
        None => prompt_seed().context("Failed to read the seed URL")?,
    };

    let start = Instant::now();

    match crawl(&config, &seed).await {
        Ok(report) => {
            println!("Crawling completed ({})", report.state);
            println!("Fetched {} links", report.fetched);
        }
        Err(CrawlError::SeedInvalid { .. }) => {
            println!("Seems to be an invalid URL..");
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    }

    println!("Time taken = {}s", start.elapsed().as_secs());

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ripple_crawl=info,warn"),
            1 => EnvFilter::new("ripple_crawl=debug,info"),
            2 => EnvFilter::new("ripple_crawl=trace,debug"),
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

/// Loads the config file (or defaults) and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(limit) = cli.limit {
        config.crawler.limit = limit;
    }
    if let Some(workers) = cli.workers {
        config.crawler.workers = workers;
    }

    validate(&config).context("Invalid crawl settings")?;
    Ok(config)
}

/// Asks for the seed URL on stdin
fn prompt_seed() -> io::Result<String> {
    print!("Enter the seed URL... ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
