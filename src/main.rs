use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use paper_fetcher::config::{find_config_file, get_config, load_config};
use paper_fetcher::output::{print_rows, write_csv, ConsoleFormat};
use paper_fetcher::{PaperFetcher, SearchQuery};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Fetch research papers from PubMed and flag authors with industry affiliations
#[derive(Parser, Debug)]
#[command(name = "get-papers-list")]
#[command(version = paper_fetcher::VERSION)]
#[command(about = "Fetch research papers from PubMed.", long_about = None)]
struct Cli {
    /// Search query for fetching papers (PubMed query syntax)
    query: String,

    /// Print the query before running
    #[arg(long, short)]
    debug: bool,

    /// Output file to save results as CSV (prints to the console if omitted)
    #[arg(long, short)]
    file: Option<PathBuf>,

    /// Maximum number of papers to fetch (default from config, 10)
    #[arg(long, short)]
    max_results: Option<usize>,

    /// Console output format
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Plain)]
    output: OutputFormat,

    /// Enable verbose logging (-v, -vv, -vvv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error log output
    #[arg(long, short)]
    quiet: bool,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Request timeout in seconds (no timeout by default)
    #[arg(long)]
    timeout: Option<u64>,
}

/// Console output format
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// One line per paper
    Plain,
    /// One JSON object per line
    Json,
    /// Table format (human-readable)
    Table,
}

impl From<OutputFormat> for ConsoleFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Plain => ConsoleFormat::Plain,
            OutputFormat::Json => ConsoleFormat::Json,
            OutputFormat::Table => ConsoleFormat::Table,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("paper_fetcher={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = if let Some(config_path) = &cli.config {
        load_config(config_path)
            .with_context(|| format!("Failed to load config {}", config_path.display()))?
    } else if let Some(config_path) = find_config_file() {
        tracing::info!("Using config file: {}", config_path.display());
        load_config(&config_path)?
    } else {
        get_config()?
    };

    if let Some(timeout) = cli.timeout {
        config.pubmed.timeout_secs = Some(timeout);
    }
    let max_results = cli.max_results.unwrap_or(config.search.max_results);

    if cli.debug {
        println!("Fetching papers for query: {}", cli.query);
    }

    let fetcher = PaperFetcher::from_config(&config)?;
    let query = SearchQuery::new(&cli.query).max_results(max_results);
    let papers = fetcher.get_papers(&query).await?;

    match &cli.file {
        Some(path) => {
            write_csv(&papers, path)?;
            println!("Results saved to {}", path.display());
        }
        None => print_rows(&papers, cli.output.into())?,
    }

    Ok(())
}
