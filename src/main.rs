//! gh-search main entry point
//!
//! This is the command-line interface for the GitHub search crawler.

use clap::Parser;
use gh_search::config::load_settings_or_default;
use gh_search::input::load_input;
use gh_search::output::write_output;
use gh_search::{
    search, FetchContext, GhSearchError, ProxyPool, SearchQuery, Settings,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// gh-search: GitHub search crawler
///
/// Searches GitHub for the keywords in INPUT_FILE through one of its
/// proxies, and prints the result links as JSON. Repository results also
/// carry the owner and the language breakdown of each repository.
#[derive(Parser, Debug)]
#[command(name = "gh-search")]
#[command(version)]
#[command(about = "GitHub search crawler", long_about = None)]
struct Cli {
    /// Path to the JSON input file (keywords, proxies, type)
    #[arg(value_name = "INPUT_FILE")]
    input: PathBuf,

    /// Write results to this file instead of stdout
    #[arg(short, long, value_name = "OUT_FILE")]
    output: Option<PathBuf>,

    /// Path to a TOML settings file
    #[arg(short, long, value_name = "SETTINGS")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress everything but errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the search that would run without sending any request
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(GhSearchError::Fetch(e)) => {
            tracing::error!("Could not retrieve data from `{}`", e.url());
            match e.status() {
                Some(status) => tracing::error!("HTTP status code: {}", status.as_u16()),
                None => tracing::error!("{}", e),
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout is reserved for results. `RUST_LOG` wins
/// when set.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if quiet {
            EnvFilter::new("error")
        } else {
            match verbose {
                0 => EnvFilter::new("warn"),
                1 => EnvFilter::new("gh_search=info,warn"),
                2 => EnvFilter::new("gh_search=debug,info"),
                _ => EnvFilter::new("trace"),
            }
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

async fn run(cli: Cli) -> gh_search::Result<()> {
    let settings = load_settings_or_default(cli.config.as_deref())?;
    let input = load_input(&cli.input)?;

    let pool = ProxyPool::new(input.proxies.clone())?;
    let proxy = pool.select();
    let query = input.query(&settings.crawler.base_url);

    if cli.dry_run {
        print_dry_run(&settings, &pool, &query, proxy);
        return Ok(());
    }

    let ctx = FetchContext::new(&settings, Some(proxy))?;
    let records = search(&ctx, &query).await?;
    tracing::info!(
        "Collected {} results ({} backoff waits)",
        records.len(),
        ctx.backoff_waits()
    );

    write_output(&records, cli.output.as_deref())?;
    Ok(())
}

/// Handles --dry-run: shows the search without sending it
fn print_dry_run(settings: &Settings, pool: &ProxyPool, query: &SearchQuery, proxy: &str) {
    println!("=== gh-search Dry Run ===\n");

    println!("Search:");
    println!("  Endpoint: {}", query.search_url());
    println!("  Keywords: {}", query.keywords().join(", "));
    println!("  q = {}", query.joined_keywords());
    println!("  type = {}", query.category());

    println!("\nProxy:");
    println!("  Selected: {} (from {})", proxy, pool.proxies().len());

    println!("\nRetries:");
    println!("  Max tries: {}", settings.crawler.max_tries);
    println!(
        "  Max backoff: {} x {}ms",
        settings.crawler.max_backoff, settings.crawler.backoff_unit_ms
    );

    println!("\n✓ Input and settings are valid");
}
