//! Sitewalk main entry point
//!
//! This is the command-line interface for the Sitewalk crawler.

use anyhow::Context;
use clap::Parser;
use sitewalk::config::{load_config_with_hash, validate, Config};
use sitewalk::crawler::{CrawlOutcome, Crawler, DedupPolicy};
use sitewalk::output::{generate_markdown_summary, print_pages, print_statistics, CrawlStatistics};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Sitewalk: a concurrent same-site crawler
///
/// Sitewalk crawls every page reachable from a seed address whose address
/// starts with the seed, using a fixed pool of concurrent workers, and lists
/// each page with its title.
#[derive(Parser, Debug)]
#[command(name = "sitewalk")]
#[command(version)]
#[command(about = "A concurrent same-site crawler", long_about = None)]
struct Cli {
    /// Seed address; only links starting with it are followed
    #[arg(value_name = "SEED")]
    seed: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Number of concurrent workers (overrides the config file)
    #[arg(short = 'w', long)]
    workers: Option<usize>,

    /// Link deduplication policy (overrides the config file)
    #[arg(long, value_enum)]
    dedup: Option<DedupPolicy>,

    /// Write a markdown summary to this path (overrides the config file)
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and seed, show what would be crawled, and exit
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;

    if cli.dry_run {
        handle_dry_run(&cli.seed, &config)?;
        return Ok(());
    }

    let outcome = handle_crawl(&cli.seed, &config).await?;

    if !cli.quiet {
        print_pages(&outcome);
        println!();
        print_statistics(&CrawlStatistics::from_outcome(&outcome));
    }

    if let Some(path) = &config.output.summary_path {
        generate_markdown_summary(&outcome, Path::new(path))
            .with_context(|| format!("writing summary to {}", path))?;
        tracing::info!("Summary written to: {}", path);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitewalk=info,warn"),
            1 => EnvFilter::new("sitewalk=debug,info"),
            2 => EnvFilter::new("sitewalk=trace,debug"),
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

/// Loads the config file if given, then applies command-line overrides
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("loading {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(workers) = cli.workers {
        config.crawler.workers = workers;
    }
    if let Some(dedup) = cli.dedup {
        config.crawler.dedup = dedup;
    }
    if let Some(summary) = &cli.summary {
        config.output.summary_path = Some(summary.display().to_string());
    }

    validate(&config).context("invalid configuration")?;
    Ok(config)
}

/// Handles the --dry-run mode: validates config and seed and shows the plan
fn handle_dry_run(seed: &str, config: &Config) -> anyhow::Result<()> {
    let seed = sitewalk::url::Address::parse(seed)?;

    println!("=== Sitewalk Dry Run ===\n");

    println!("Seed:");
    println!("  Address: {}", seed);
    println!("  Origin prefix: {}", sitewalk::OriginPrefix::from_seed(&seed).as_str());

    println!("\nCrawler Configuration:");
    println!("  Workers: {}", config.crawler.workers);
    println!("  Dedup policy: {:?}", config.crawler.dedup);

    println!("\nHTTP:");
    println!("  User agent: {}", config.user_agent.header_value());
    println!("  Timeout: {}s", config.http.timeout_secs);
    println!("  Connect timeout: {}s", config.http.connect_timeout_secs);
    println!("  Max redirects: {}", config.http.max_redirects);

    if let Some(path) = &config.output.summary_path {
        println!("\nOutput:");
        println!("  Summary: {}", path);
    }

    println!("\n✓ Configuration is valid");
    Ok(())
}

/// Handles the main crawl operation, logging progress as pages complete
async fn handle_crawl(seed: &str, config: &Config) -> anyhow::Result<CrawlOutcome> {
    let crawler = Crawler::from_config(config)?;
    let handle = crawler.start(seed)?;

    let mut progress = handle.results().subscribe();
    let reporter = tokio::spawn(async move {
        while progress.changed().await.is_ok() {
            let completed = *progress.borrow_and_update();
            tracing::debug!("{} pages completed", completed);
        }
    });

    let result = handle.wait().await;
    reporter.abort();

    match result {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            tracing::error!(
                "Crawl failed after {} pages: {}",
                e.partial().len(),
                e
            );
            Err(e.into())
        }
    }
}
