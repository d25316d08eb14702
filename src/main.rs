//! Page-Scraper main entry point
//!
//! This is the command-line interface for running the page processor over
//! saved pages and inspecting its output.

use anyhow::Context;
use clap::{Parser, Subcommand};
use page_scraper::config::{load_config_with_hash, ScraperConfig};
use page_scraper::crawler::{FetchResult, PageProcessor};
use page_scraper::output::{
    load_statistics, open_diagnostic_sink, open_record_sink, print_statistics,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Page-Scraper: link and token extraction for crawled pages
///
/// Processes saved pages the way the crawler's workers do: extracts
/// in-scope links, appends token records and logs each visit.
#[derive(Parser, Debug)]
#[command(name = "page-scraper")]
#[command(version = "1.0.0")]
#[command(about = "Link and token extraction for crawled pages", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Process a saved page and print its in-scope links
    Process {
        /// Path to the saved page body
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// URL the page was requested from
        #[arg(long)]
        url: String,

        /// Final URL after redirects
        #[arg(long)]
        final_url: Option<String>,

        /// HTTP status code of the response
        #[arg(long, default_value_t = 200)]
        status: u16,

        /// Content-Type of the response
        #[arg(long)]
        content_type: Option<String>,

        /// Path to TOML configuration file
        #[arg(short, long, value_name = "CONFIG")]
        config: Option<PathBuf>,
    },

    /// Print the scope decision for each URL
    Check {
        /// URLs to check
        #[arg(value_name = "URL", required = true)]
        urls: Vec<String>,

        /// Path to TOML configuration file
        #[arg(short, long, value_name = "CONFIG")]
        config: Option<PathBuf>,
    },

    /// Show statistics for a JSON-lines record file
    Stats {
        /// Path to the record file
        #[arg(value_name = "RECORDS")]
        records: PathBuf,
    },

    /// Validate a configuration file and show the resulting policy
    Config {
        /// Path to TOML configuration file
        #[arg(value_name = "CONFIG")]
        config: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Process {
            file,
            url,
            final_url,
            status,
            content_type,
            config,
        } => {
            let config = resolve_config(config.as_deref())?;
            let body = std::fs::read(&file)
                .with_context(|| format!("Failed to read page body from {}", file.display()))?;

            let mut resp = FetchResult::new(url.clone(), status).with_bytes(body);
            resp.final_url = final_url;
            resp.content_type = content_type;

            handle_process(&config, &url, &resp)
        }
        Command::Check { urls, config } => {
            let config = resolve_config(config.as_deref())?;
            handle_check(&config, &urls)
        }
        Command::Stats { records } => {
            let stats = load_statistics(&records)
                .with_context(|| format!("Failed to read records from {}", records.display()))?;
            print_statistics(&stats);
            Ok(())
        }
        Command::Config { config } => {
            let config = resolve_config(Some(&config))?;
            handle_show_config(&config);
            Ok(())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("page_scraper=info,warn"),
            1 => EnvFilter::new("page_scraper=debug,info"),
            2 => EnvFilter::new("page_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the configuration file if one was given, defaults otherwise
fn resolve_config(path: Option<&Path>) -> anyhow::Result<ScraperConfig> {
    let Some(path) = path else {
        tracing::debug!("No configuration file given, using defaults");
        return Ok(ScraperConfig::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    match load_config_with_hash(path) {
        Ok((config, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            Err(e.into())
        }
    }
}

/// Handles the process command: runs the page processor and prints links
fn handle_process(config: &ScraperConfig, url: &str, resp: &FetchResult) -> anyhow::Result<()> {
    let records = open_record_sink(&config.output).with_context(|| {
        format!("Failed to open record sink {}", config.output.records_path)
    })?;
    let diagnostics = open_diagnostic_sink(&config.output)
        .with_context(|| format!("Failed to open log file {}", config.output.log_path))?;

    let processor = PageProcessor::new(config);
    let links = processor.scrape(url, Some(resp), records.as_ref(), &diagnostics)?;

    tracing::info!("{} in-scope links found on {}", links.len(), url);
    for link in links {
        println!("{}", link);
    }

    Ok(())
}

/// Handles the check command: prints the scope decision for each URL
fn handle_check(config: &ScraperConfig, urls: &[String]) -> anyhow::Result<()> {
    let processor = PageProcessor::new(config);

    for url in urls {
        let verdict = if processor.scope().is_valid(url)? {
            "crawl"
        } else {
            "skip"
        };
        println!("{}\t{}", verdict, url);
    }

    Ok(())
}

/// Handles the config command: shows the effective policy
fn handle_show_config(config: &ScraperConfig) {
    println!("=== Page-Scraper Configuration ===\n");

    println!("Policy:");
    println!("  Accept redirects: {}", config.policy.accept_redirects);
    println!("  Analyze text: {}", config.policy.analyze_text);

    println!("\nScope:");
    match &config.scope.allowed_domains {
        Some(domains) => {
            println!("  Allowed domains ({}):", domains.len());
            for domain in domains {
                println!("    - {}", domain);
            }
        }
        None => println!("  Allowed domains: any"),
    }
    for restriction in &config.scope.path_restrictions {
        println!(
            "  Path restriction: {} -> {}",
            restriction.host, restriction.prefix
        );
    }

    println!("\nOutput:");
    println!(
        "  Records: {} ({:?})",
        config.output.records_path, config.output.records_format
    );
    println!("  Log: {}", config.output.log_path);

    println!("\n✓ Configuration is valid");
}
