//! Docsweep main entry point
//!
//! This is the command-line interface for the Docsweep documentation crawler.

use anyhow::{Context, Result};
use clap::Parser;
use docsweep::config::{load_config_with_hash, Config, OutputConfig};
use docsweep::output::{
    render_analysis, render_links, render_structured, render_text, write_output,
    ContentAnalysis,
};
use docsweep::{CrawlConfig, CrawlEngine, ExtractorKind, LinkOrder, ProgressCallback};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Docsweep: a polite documentation crawler
///
/// Docsweep crawls from a seed URL while respecting robots.txt and a rate
/// limit, extracts text, headings, code examples and tables of contents from
/// every page, and writes a text report and a JSON document.
#[derive(Parser, Debug)]
#[command(name = "docsweep")]
#[command(version)]
#[command(about = "A polite documentation crawler", long_about = None)]
struct Cli {
    /// URL to start crawling from (overrides the seed in --config)
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of pages to visit
    #[arg(short = 'm', long)]
    max_pages: Option<usize>,

    /// Maximum link depth from the seed
    #[arg(short = 'd', long)]
    max_depth: Option<u32>,

    /// Seconds to wait between requests
    #[arg(short = 'r', long)]
    rate_limit: Option<f64>,

    /// Only follow links on the same host
    #[arg(short = 's', long)]
    same_domain: bool,

    /// Ignore robots.txt
    #[arg(long)]
    no_robots: bool,

    /// Comma-separated keywords to highlight in page text
    #[arg(short = 'k', long, value_delimiter = ',')]
    keywords: Vec<String>,

    /// Take body text from the whole page instead of the documentation container
    #[arg(long)]
    generic: bool,

    /// Follow links in page order instead of documentation links first
    #[arg(long)]
    discovery_order: bool,

    /// Path of the text report
    #[arg(short = 'o', long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Path of the JSON document
    #[arg(short = 'j', long, value_name = "FILE")]
    json_output: Option<PathBuf>,

    /// Also write the numbered list of visited URLs to this file
    #[arg(long, value_name = "FILE")]
    links_out: Option<PathBuf>,

    /// Skip the text report and print the visited URLs instead
    #[arg(long)]
    links_only: bool,

    /// Print a short analysis of the extracted content
    #[arg(long)]
    analyze: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match load_or_default(&cli) {
        Ok(config) => apply_overrides(&cli, config),
        Err(e) => {
            tracing::error!("Failed to load configuration: {:#}", e);
            return Err(e);
        }
    };

    handle_crawl(&cli, config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("docsweep=info,warn"),
            1 => EnvFilter::new("docsweep=debug,info"),
            2 => EnvFilter::new("docsweep=trace,debug"),
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

/// Loads the config file if one was given, otherwise builds one from the URL
fn load_or_default(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Could not load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        None => {
            let seed = cli
                .url
                .clone()
                .context("Either a URL or --config must be given")?;
            Ok(Config {
                crawl: CrawlConfig::new(seed),
                output: OutputConfig::default(),
            })
        }
    }
}

/// Command-line flags take precedence over the config file
fn apply_overrides(cli: &Cli, mut config: Config) -> Config {
    let crawl = &mut config.crawl;

    if let Some(url) = &cli.url {
        crawl.seed = url.clone();
    }
    if let Some(max_pages) = cli.max_pages {
        crawl.max_pages = max_pages;
    }
    if let Some(max_depth) = cli.max_depth {
        crawl.max_depth = max_depth;
    }
    if let Some(rate_limit) = cli.rate_limit {
        crawl.rate_limit = rate_limit;
    }
    if cli.same_domain {
        crawl.same_domain_only = true;
    }
    if cli.no_robots {
        crawl.respect_robots = false;
    }
    if cli.generic {
        crawl.extractor = ExtractorKind::Generic;
    }
    if cli.discovery_order {
        crawl.link_order = LinkOrder::Discovery;
    }

    let keywords: Vec<String> = cli
        .keywords
        .iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect();
    if !keywords.is_empty() {
        crawl.keywords = keywords;
    }

    let output = &mut config.output;
    if let Some(path) = &cli.output {
        output.text_path = path.display().to_string();
    }
    if let Some(path) = &cli.json_output {
        output.json_path = path.display().to_string();
    }
    if let Some(path) = &cli.links_out {
        output.links_path = Some(path.display().to_string());
    }

    config
}

/// Runs the crawl and writes every requested document
async fn handle_crawl(cli: &Cli, config: Config) -> Result<()> {
    let crawl = &config.crawl;
    let mut engine = CrawlEngine::new().context("Failed to build HTTP client")?;

    // Ctrl-C stops the crawl after the current page; results are still written
    let cancel = engine.cancel_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the current page");
            cancel.cancel();
        }
    });

    if !cli.quiet {
        println!("Starting to crawl {}", crawl.seed);
        println!("Max pages: {}, max depth: {}", crawl.max_pages, crawl.max_depth);
        if crawl.same_domain_only {
            println!("Staying on the same domain");
        }
        if !crawl.keywords.is_empty() {
            println!("Highlighting keywords: {}", crawl.keywords.join(", "));
        }
    }

    let progress: Option<ProgressCallback> = if cli.quiet {
        None
    } else {
        Some(Arc::new(|current: usize, total: usize| {
            println!("Crawled {}/{} pages", current, total);
        }))
    };

    let result = match engine.crawl(crawl, progress).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    let stats = engine.stats();
    let output = &config.output;

    if !cli.links_only {
        let text = render_text(&result.pages, stats);
        write_document(&output.text_path, &text)?;
    }

    let json = render_structured(&result.pages).context("Failed to render JSON document")?;
    write_document(&output.json_path, &json)?;

    let links = render_links(&result.visited);
    if let Some(path) = &output.links_path {
        write_document(path, &links)?;
    }

    if !cli.quiet {
        println!("\nCrawl completed!");
        println!("Pages visited: {}", stats.pages_visited);
        println!("Successful fetches: {}", stats.successful_fetches);
        println!("Failed fetches: {}", stats.failed_fetches);
        println!("\nOutput files:");
        if !cli.links_only {
            println!("  - Text report: {}", output.text_path);
        }
        println!("  - Structured data: {}", output.json_path);
        if let Some(path) = &output.links_path {
            println!("  - Links: {}", path);
        }
    }

    if cli.links_only {
        println!("\n{}", links);
    }

    if cli.analyze {
        let analysis = ContentAnalysis::from_pages(&result.pages);
        println!("\n{}", render_analysis(&analysis));
    }

    Ok(())
}

fn write_document(path: &str, content: &str) -> Result<()> {
    write_output(Path::new(path), content).with_context(|| format!("Failed to write {}", path))
}
