//! About-Crawler main entry point
//!
//! This is the command-line interface for the About-Crawler.

use about_crawler::config::{load_config_with_hash, Config, Engine};
use about_crawler::crawler::run_crawl;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// About-Crawler: finds and extracts "About Us" pages
///
/// Visits each seed homepage in a browser, follows its "about" links on the
/// same host, and writes the extracted text to a JSON feed.
#[derive(Parser, Debug)]
#[command(name = "about-crawler")]
#[command(version = "1.0.0")]
#[command(about = "Finds and extracts About Us pages", long_about = None)]
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

    /// Validate config and show what would be crawled without starting a browser
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
        .with_context(|| format!("failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        return handle_dry_run(&config);
    }

    handle_crawl(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("about_crawler=info,warn"),
            1 => EnvFilter::new("about_crawler=debug,info"),
            2 => EnvFilter::new("about_crawler=trace,debug"),
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

/// Handles the --dry-run mode: shows the validated setup
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    let seeds = config.seed_urls()?;

    println!("=== About-Crawler Dry Run ===\n");

    println!("Renderer:");
    match config.renderer.engine {
        Engine::Webdriver => println!(
            "  {:?} via {} (headless: {})",
            config.renderer.browser, config.renderer.webdriver_url, config.renderer.headless
        ),
        Engine::Static => println!("  static HTTP (cache: {})", config.cache.enabled),
    }
    println!(
        "  Ready timeout: {}s, settle: {}ms, delay: {}ms",
        config.renderer.ready_timeout_secs, config.renderer.settle_ms, config.crawler.download_delay_ms
    );
    println!("  User agent: {}", config.user_agent.value);

    println!("\nAbout-link patterns ({}):", config.matcher.patterns.len());
    for pattern in &config.matcher.patterns {
        println!("  - {}", pattern);
    }

    println!("\nSeeds ({}):", seeds.len());
    for seed in &seeds {
        println!("  - {}", seed);
    }

    println!("\nOutput: {}", config.output.path);
    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        "Seeds: {}, engine: {:?}, output: {}",
        config.crawler.seeds.len(),
        config.renderer.engine,
        config.output.path
    );

    match run_crawl(config).await {
        Ok(stats) => {
            tracing::info!(
                "Crawl completed successfully ({} records written)",
                stats.records_written
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
