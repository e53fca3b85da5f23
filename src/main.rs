//! Trawl main entry point
//!
//! Command-line interface for the trawl search-result scraper.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use trawl::config::{load_config, validate, Config};
use trawl::output::{self, project, OutputFormat, RunSummary};
use trawl::scrape::Coordinator;
use trawl::{ConfigError, TrawlError};

/// Trawl: scrape search-engine results and the pages behind them
///
/// Trawl fetches a search results page, samples the organic results, and
/// scrapes the linked pages concurrently, writing uniform JSON or CSV
/// records.
#[derive(Parser, Debug)]
#[command(name = "trawl")]
#[command(version = "0.1.0")]
#[command(about = "Scrape search results and the pages behind them", long_about = None)]
struct Cli {
    /// The search query to use
    #[arg(value_name = "QUERY", conflicts_with = "input_file")]
    query: Option<String>,

    /// Path to a text file with one query per line
    #[arg(short, long)]
    input_file: Option<PathBuf>,

    /// Output file name for combined results
    #[arg(short, long)]
    output_file: Option<String>,

    /// Save each query's results to its own file named after the query
    #[arg(short = 'p', long)]
    per_query_output: bool,

    /// Search engine to use (google, bing, duckduckgo)
    #[arg(short, long)]
    engine: Option<String>,

    /// Output format (json, csv)
    #[arg(short, long)]
    format: Option<String>,

    /// Comma-separated list of fields to save (e.g. "url,title")
    #[arg(short = 'F', long)]
    fields: Option<String>,

    /// Only list search results, do not scrape the pages
    #[arg(short, long)]
    search_only: bool,

    /// Number of result URLs to scrape per query
    #[arg(short, long)]
    num_urls: Option<u32>,

    /// Timeout for each HTTP request in seconds
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Maximum number of concurrent scrape workers
    #[arg(short = 'w', long)]
    max_workers: Option<u32>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to the configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = load_config(&cli.config)?;
    apply_overrides(&mut config, &cli);
    validate(&config)?;

    // An interrupt stops issuing new work; in-flight scrapes are
    // abandoned. Output files are only written after a batch completes,
    // so nothing partial can land on disk.
    tokio::select! {
        result = run(&cli, config) => result?,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Interrupted, abandoning in-flight scrapes");
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
            0 => EnvFilter::new("trawl=info,warn"),
            1 => EnvFilter::new("trawl=debug,info"),
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

/// Merges CLI overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(num_urls) = cli.num_urls {
        config.scrape.num_urls = num_urls;
    }
    if let Some(timeout) = cli.timeout {
        config.scrape.timeout_secs = timeout;
    }
    if let Some(max_workers) = cli.max_workers {
        config.scrape.max_workers = max_workers;
    }
    if let Some(engine) = &cli.engine {
        config.search.engine = engine.clone();
    }
    if let Some(format) = &cli.format {
        config.output.format = format.clone();
    }
    if let Some(fields) = &cli.fields {
        config.output.fields = fields
            .split(',')
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .map(String::from)
            .collect();
    }
}

/// Reads the query list from the CLI argument or input file
fn collect_queries(cli: &Cli) -> Result<Vec<String>, TrawlError> {
    if let Some(path) = &cli.input_file {
        let content = std::fs::read_to_string(path)?;
        let queries: Vec<String> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();

        if queries.is_empty() {
            return Err(TrawlError::EmptyInput(path.display().to_string()));
        }

        tracing::info!("Found {} queries in '{}'", queries.len(), path.display());
        Ok(queries)
    } else if let Some(query) = &cli.query {
        Ok(vec![query.clone()])
    } else {
        Err(TrawlError::NoQuery)
    }
}

/// Runs the selected mode against the resolved configuration
async fn run(cli: &Cli, config: Config) -> Result<(), TrawlError> {
    let queries = collect_queries(cli)?;

    let format = OutputFormat::parse(&config.output.format).ok_or_else(|| {
        ConfigError::Validation(format!("unknown output format '{}'", config.output.format))
    })?;
    let fields = config.output.fields.clone();
    let sample_size = config.scrape.num_urls as usize;

    let coordinator = Coordinator::new(&config)?;
    tracing::info!("Using search engine '{}'", coordinator.engine());

    if cli.search_only {
        return run_search_only(
            &coordinator,
            &queries,
            sample_size,
            &fields,
            format,
            cli.output_file.as_deref(),
        )
        .await;
    }

    let mut summary = RunSummary::new();
    let mut combined = Vec::new();

    for query in &queries {
        let report = coordinator.process_query(query).await;
        summary.record_query(&report.stats);

        let records = project(&report.pages, &fields);
        if records.is_empty() {
            tracing::info!("No data scraped for '{}'", query);
            continue;
        }

        if cli.per_query_output {
            let path = output::query_path(query, format);
            output::write_records(&records, &fields, format, &path)?;
            tracing::info!("Saved {} records to {}", records.len(), path.display());
        } else {
            combined.extend(records);
        }
    }

    if !cli.per_query_output {
        if combined.is_empty() {
            tracing::info!("No data was successfully scraped");
        } else {
            let name = cli.output_file.as_deref().unwrap_or("scraped_results");
            let path = output::output_path(name, format);
            output::write_records(&combined, &fields, format, &path)?;
            tracing::info!("Saved {} records to {}", combined.len(), path.display());
        }
    }

    summary.report();
    Ok(())
}

/// Lists search results without scraping the pages behind them
///
/// With an output file, the results themselves are projected onto the
/// configured field list and saved.
async fn run_search_only(
    coordinator: &Coordinator,
    queries: &[String],
    limit: usize,
    fields: &[String],
    format: OutputFormat,
    output_file: Option<&str>,
) -> Result<(), TrawlError> {
    let mut all_results = Vec::new();

    for query in queries {
        match coordinator.search(query).await {
            Ok(results) => {
                println!("\nSearch results for '{}':", query);
                for (i, result) in results.iter().take(limit).enumerate() {
                    println!("{}. {} - {}", i + 1, result.title, result.url);
                }
                all_results.extend(results.into_iter().take(limit));
            }
            Err(e) => tracing::error!("Search failed for '{}': {}", query, e),
        }
    }

    if let Some(name) = output_file {
        let records = project(&all_results, fields);
        let path = output::output_path(name, format);
        output::write_records(&records, fields, format, &path)?;
        tracing::info!("Saved {} search results to {}", records.len(), path.display());
    }

    Ok(())
}
