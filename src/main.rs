//! ModelFeed - LLM model metadata aggregator
//!
//! A CLI tool that fetches model listings from a fixed set of upstream
//! catalog endpoints, normalizes them into one snapshot sorted by
//! creation time, and writes the result as JSON for the tracker frontend.
//!
//! Exit codes:
//!   0 - Success (including partial per-endpoint failures)
//!   1 - Runtime error (config, output I/O, etc.)
//!   2 - Endpoint failures with --fail-on-errors set

mod analysis;
mod cli;
mod config;
mod extract;
mod models;
mod report;
mod sources;

use analysis::EndpointOutcome;
use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use models::{Endpoint, Source};
use std::path::PathBuf;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("ModelFeed v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the feed update
    match run_feed(args).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Feed update failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .modelfeed.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".modelfeed.toml");

    if path.exists() {
        eprintln!("⚠️  .modelfeed.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .modelfeed.toml")?;

    println!("✅ Created .modelfeed.toml with default settings.");
    println!("   Edit it to customize the output path, timeout, and user agent.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete feed update. Returns exit code (0 or 2).
async fn run_feed(args: Args) -> Result<i32> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let endpoints = sources::endpoints();

    // Handle --dry-run: list sources and exit
    if args.dry_run {
        return handle_dry_run(&endpoints);
    }

    let output = PathBuf::from(&config.general.output);
    let format = if config.report.pretty {
        OutputFormat::Pretty
    } else {
        OutputFormat::Compact
    };

    println!("🚀 Updating model feed...");
    println!("   Sources: {}", endpoints.len());
    println!("   Timeout: {}s", config.fetch.timeout_seconds);
    println!("   Output: {}", output.display());

    let client = sources::FeedClient::new(
        config.fetch.timeout_seconds,
        config.fetch.user_agent.clone(),
    );

    // Endpoints are visited strictly one at a time, in list order. A failed
    // endpoint is recorded and the run continues with the next one.
    let progress = make_progress(endpoints.len() as u64, args.quiet);
    let mut outcomes = Vec::with_capacity(endpoints.len());

    for endpoint in &endpoints {
        progress.set_message(format!("fetching {}", endpoint.source));
        progress.println(format!("📡 Fetching {} models...", endpoint.source));

        let result = client.fetch(&endpoint.url).await;
        match &result {
            Ok(_) => debug!("{}: response received", endpoint.source),
            Err(e) => {
                warn!("{}: {}", endpoint.source, e);
                progress.println(format!("❌ {}: {}", endpoint.source, e));
            }
        }

        outcomes.push(EndpointOutcome {
            source: endpoint.source,
            result,
        });
        progress.inc(1);
    }
    progress.finish_and_clear();

    // Accumulate, order, and assemble the document
    let now = Utc::now();
    let (mut models, errors) = analysis::accumulate(outcomes, now);
    analysis::sort_by_created_desc(&mut models);

    let feed = report::build_feed(models, errors, Utc::now());

    report::write_feed(&feed, &output, format)?;

    // Print summary
    println!("\n📊 Feed Summary:");
    println!("   Total models: {}", feed.metadata.total_models);
    for source in Source::ALL {
        println!("   - {}: {}", source, feed.metadata.architectures.get(source));
    }
    println!("\n✨ Feed written to: {}", output.display());

    if !feed.metadata.errors.is_empty() {
        eprintln!("\n⚠️  {} source(s) failed:", feed.metadata.errors.len());
        for err in &feed.metadata.errors {
            eprintln!("   - {}: {}", err.architecture, err.error);
        }

        if args.fail_on_errors {
            eprintln!("\n⛔ Endpoint failures with --fail-on-errors set. Failing (exit code 2).");
            return Ok(2);
        }
    }

    Ok(0)
}

/// Handle --dry-run: list the configured sources, no requests issued.
fn handle_dry_run(endpoints: &[Endpoint]) -> Result<i32> {
    println!("\n🔍 Dry run: listing sources (no requests issued)...\n");

    for endpoint in endpoints {
        println!("   📡 {} -> {}", endpoint.source, endpoint.url);
    }

    println!("\n✅ Dry run complete. No requests were made.");
    Ok(0)
}

/// Build the endpoint progress bar (hidden in quiet mode).
fn make_progress(len: u64, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let progress = ProgressBar::new(len);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .expect("valid progress template")
            .progress_chars("=>-"),
    );
    progress
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .modelfeed.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
