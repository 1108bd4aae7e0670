//! indexscope main entry point
//!
//! This is the command-line interface for batch URL index inspection.

use anyhow::{anyhow, bail, Context};
use clap::Parser;
use indexscope::api::{
    build_http_client, filter_sites, list_sites, token_provider_from_config, ApiClient,
    ApiInspector,
};
use indexscope::batch::{inspect_batch, BatchError, BatchRequest, LogProgress};
use indexscope::config::{load_config_with_hash, Config, ExportFormat};
use indexscope::output::{export_run, export_to, print_results};
use indexscope::sitemap::SitemapLoader;
use indexscope::url::extract_urls;
use reqwest::Client;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// indexscope: batch URL index inspection
///
/// Reads a list of URLs (from a file, stdin, or a sitemap), inspects each one
/// against a Search Console property, and reports which pages are indexed.
#[derive(Parser, Debug)]
#[command(name = "indexscope")]
#[command(version = "1.0.0")]
#[command(about = "Batch URL index inspection for Search Console properties", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Property to inspect against (e.g. "sc-domain:example.com")
    #[arg(short, long)]
    site: Option<String>,

    /// File with one URL per line; "-" reads from stdin
    #[arg(short, long, value_name = "FILE", conflicts_with = "sitemap")]
    urls: Option<PathBuf>,

    /// Load URLs from a sitemap or sitemap index
    #[arg(long, value_name = "URL")]
    sitemap: Option<String>,

    /// Keep only the first N URLs
    #[arg(long, value_name = "N")]
    take: Option<usize>,

    /// List the properties you can inspect and exit
    #[arg(long, conflicts_with_all = ["dry_run", "urls", "sitemap"])]
    list_sites: bool,

    /// Only list properties containing this text (case-insensitive)
    #[arg(long, value_name = "TERM", requires = "list_sites")]
    filter: Option<String>,

    /// Write results as CSV to this path
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Write results as JSON to this path
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// Print only the summary, not the per-URL table
    #[arg(long)]
    no_table: bool,

    /// Validate config and input and show what would be inspected
    #[arg(long)]
    dry_run: bool,

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

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let http = build_http_client(&config.user_agent, config.api.request_timeout_secs)
        .context("Failed to build HTTP client")?;

    if cli.list_sites {
        return handle_list_sites(&config, http, cli.filter.as_deref()).await;
    }

    let urls = collect_urls(&cli, &config, &http).await?;

    if cli.dry_run {
        handle_dry_run(&config, cli.site.as_deref(), &urls);
        return Ok(());
    }

    handle_inspect(&cli, &config, http, urls).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("indexscope=info,warn"),
            1 => EnvFilter::new("indexscope=debug,info"),
            2 => EnvFilter::new("indexscope=trace,debug"),
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

/// Gathers the batch input from a sitemap, a file, or stdin
async fn collect_urls(cli: &Cli, config: &Config, http: &Client) -> anyhow::Result<Vec<String>> {
    let mut urls = if let Some(sitemap_url) = &cli.sitemap {
        let loader = SitemapLoader::new(http.clone(), &config.sitemap);
        let urls = loader
            .load(sitemap_url)
            .await
            .context("Failed to load sitemap")?;

        if urls.is_empty() {
            bail!("No URLs found in the sitemap. Make sure it's a valid XML sitemap.");
        }
        urls
    } else {
        let text = match cli.urls.as_deref() {
            Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read URL list {}", path.display()))?,
            _ => {
                tracing::info!("Reading URLs from stdin");
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read URLs from stdin")?;
                text
            }
        };

        let urls = extract_urls(&text);
        let candidate_lines = text.lines().filter(|l| !l.trim().is_empty()).count();
        if candidate_lines > urls.len() {
            tracing::warn!(
                "Skipped {} lines that are not valid URLs",
                candidate_lines - urls.len()
            );
        }
        urls
    };

    if let Some(n) = cli.take {
        if urls.len() > n {
            tracing::info!("Keeping the first {} of {} URLs", n, urls.len());
            urls.truncate(n);
        }
    }

    tracing::info!("{} URLs ready for inspection", urls.len());
    Ok(urls)
}

/// Handles the --list-sites mode: prints accessible properties
async fn handle_list_sites(config: &Config, http: Client, filter: Option<&str>) -> anyhow::Result<()> {
    let tokens = token_provider_from_config(&config.auth)?;
    let client = ApiClient::new(http, tokens);

    let sites = list_sites(&client, &config.api.sites_endpoint)
        .await
        .context("Error loading sites")?;

    if sites.is_empty() {
        println!("No properties found");
        return Ok(());
    }

    let matches = filter_sites(&sites, filter.unwrap_or(""));
    if matches.is_empty() {
        println!("No properties match filter");
        return Ok(());
    }

    println!("Properties ({}):", matches.len());
    for site in matches {
        match &site.permission_level {
            Some(level) => println!("  {} ({})", site.site_url, level),
            None => println!("  {}", site.site_url),
        }
    }

    Ok(())
}

/// Handles the --dry-run mode: shows what would be inspected
fn handle_dry_run(config: &Config, site: Option<&str>, urls: &[String]) {
    println!("=== indexscope Dry Run ===\n");

    println!("API:");
    println!("  Inspection endpoint: {}", config.api.inspection_endpoint);
    println!("  Sites endpoint: {}", config.api.sites_endpoint);
    println!("  Request timeout: {}s", config.api.request_timeout_secs);

    println!("\nInspection:");
    println!("  Concurrency: {}", config.inspection.concurrency);
    println!("  Max batch size: {}", config.inspection.max_batch_size);

    println!("\nAuth:");
    match (&config.auth.token_command, &config.auth.token_env) {
        (Some(command), _) => println!("  Token command: {}", command),
        (None, Some(var)) => println!("  Token environment variable: {}", var),
        (None, None) => println!("  No token source"),
    }

    println!("\nProperty: {}", site.unwrap_or("(none selected)"));

    println!("\nURLs ({}):", urls.len());
    for url in urls.iter().take(20) {
        println!("  - {}", url);
    }
    if urls.len() > 20 {
        println!("  ... and {} more", urls.len() - 20);
    }

    let request = BatchRequest::new(urls.to_vec(), site.unwrap_or(""))
        .with_limits(&config.inspection);
    match request.validate() {
        Ok(()) => println!("\n✓ Would inspect {} URLs", urls.len()),
        Err(e) => println!("\n✗ Batch would be refused: {}", e),
    }
}

/// Handles the main inspection run
async fn handle_inspect(
    cli: &Cli,
    config: &Config,
    http: Client,
    urls: Vec<String>,
) -> anyhow::Result<()> {
    let request = BatchRequest::new(urls, cli.site.clone().unwrap_or_default())
        .with_limits(&config.inspection);

    if let Err(e) = request.validate() {
        return Err(refusal(e));
    }

    let tokens = token_provider_from_config(&config.auth)?;
    let client = ApiClient::new(http, tokens);
    let inspector = ApiInspector::new(client, &config.api.inspection_endpoint);

    let mut progress = LogProgress::default();
    let run = match inspect_batch(request, &inspector, &mut progress).await {
        Ok(run) => run,
        Err(e) => {
            tracing::error!("Error inspecting URLs: {}", e);
            return Err(anyhow!("Failed to inspect URLs. Please try again."));
        }
    };

    print_results(&run, !cli.no_table);

    if let Some(path) = &cli.csv {
        export_to(&run, ExportFormat::Csv, path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("✓ CSV written to: {}", path.display());
    }

    if let Some(path) = &cli.json {
        export_to(&run, ExportFormat::Json, path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("✓ JSON written to: {}", path.display());
    }

    let written = export_run(
        &run,
        &config.output.formats,
        Path::new(&config.output.directory),
    )
    .context("Failed to export results")?;
    for path in written {
        println!("✓ Exported: {}", path.display());
    }

    Ok(())
}

/// Converts a refused batch into the message shown to the user
fn refusal(error: BatchError) -> anyhow::Error {
    match error {
        BatchError::TooManyUrls { count, max } => {
            tracing::warn!("Refusing batch of {} URLs (limit {})", count, max);
            anyhow!(error)
        }
        BatchError::MissingSite => {
            anyhow!("No property selected. Pass --site (see --list-sites for options).")
        }
        other => anyhow!(other),
    }
}
