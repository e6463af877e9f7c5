//! Campus-Search main entry point
//!
//! This is the command-line interface for the crawler-backed search engine.

use anyhow::{bail, Context};
use campus_search::config::{corpus_fingerprint, read_config, validate, Config};
use campus_search::interface::{run_interactive, run_query};
use campus_search::output::print_statistics;
use campus_search::storage::SqliteCorpusStore;
use campus_search::SearchEngine;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// How the engine is driven
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Answer a single --query and exit
    #[value(alias = "C", alias = "c")]
    Query,
    /// Read commands and queries from stdin
    #[value(alias = "I", alias = "i")]
    Interactive,
}

/// Campus-Search: crawl a site and search it by TF-IDF similarity
///
/// The first run crawls breadth-first from the root address, keeping only
/// pages under the configured domain suffix, and stores the extracted text.
/// Later runs search the stored corpus until it is deleted.
#[derive(Parser, Debug)]
#[command(name = "campus-search")]
#[command(version = "1.0.0")]
#[command(about = "Crawl a site and search it by TF-IDF similarity", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// One-shot query or interactive session
    #[arg(short, long, value_enum, default_value = "interactive")]
    mode: Mode,

    /// Root address to crawl from (overrides the config file)
    #[arg(short, long, value_name = "URL")]
    root: Option<String>,

    /// Maximum hop count from the root (overrides the config file)
    #[arg(short, long, value_name = "N")]
    depth: Option<u32>,

    /// Query text, required in query mode
    #[arg(short = 'q', long, value_name = "TEXT", required_if_eq("mode", "query"))]
    query: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show statistics of the stored corpus and exit
    #[arg(long)]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {:#}", e);
            return Err(e);
        }
    };

    let store = SqliteCorpusStore::open(Path::new(&config.storage.database_path))
        .with_context(|| format!("opening {}", config.storage.database_path))?;

    if cli.stats {
        return handle_stats(&SearchEngine::new(config, store));
    }

    if let Err(e) = validate(&config) {
        tracing::error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    let fingerprint = corpus_fingerprint(&config)?;
    tracing::debug!("Corpus fingerprint: {}", fingerprint);
    let mut engine = SearchEngine::new(config, store.with_fingerprint(fingerprint));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.mode {
        Mode::Query => {
            let Some(query) = cli.query.as_deref() else {
                bail!("--query is required in query mode");
            };
            run_query(&mut engine, query, &mut out).await?;
        }
        Mode::Interactive => {
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            run_interactive(&mut engine, input, &mut out).await?;
        }
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("campus_search=info,warn"),
            1 => EnvFilter::new("campus_search=debug,info"),
            2 => EnvFilter::new("campus_search=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Reads the config file (if any) and applies command-line overrides
///
/// Validation is left to the caller: `--stats` needs no root address.
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            read_config(path).with_context(|| format!("reading {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(root) = &cli.root {
        config.crawler.root = root.clone();
    }
    if let Some(depth) = cli.depth {
        config.crawler.max_depth = depth;
    }

    Ok(config)
}

/// Handles the --stats mode: shows statistics of the stored corpus
fn handle_stats(engine: &SearchEngine<SqliteCorpusStore>) -> anyhow::Result<()> {
    println!("Database: {}\n", engine.config().storage.database_path);

    match engine.stored_statistics()? {
        Some(stats) => print_statistics(&stats),
        None => println!("No corpus stored yet; run a query to crawl one"),
    }

    Ok(())
}
