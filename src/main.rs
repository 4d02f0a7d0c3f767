//! Mail-Ripple main entry point
//!
//! This is the command-line interface for the Mail-Ripple contact harvester.

use anyhow::Context;
use clap::Parser;
use mail_ripple::config::{load_config, validate, Config};
use mail_ripple::output::{generate_markdown_summary, generate_summary};
use mail_ripple::storage::open_storage;
use mail_ripple::{run_harvest, HarvestReport};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Mail-Ripple: a business-listing contact harvester
///
/// Mail-Ripple searches the Places API for a query across a set of zip
/// codes, crawls each listing's website for email addresses, and writes the
/// enriched listings to a named sheet.
#[derive(Parser, Debug)]
#[command(name = "mail-ripple")]
#[command(version)]
#[command(about = "A business-listing contact harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Places API key, overriding the configuration file
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,

    /// Prompt for API key, query, sheet name and zip codes before running
    #[arg(long, conflicts_with = "export_summary")]
    interactive: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Write the markdown summary of the existing sheet and exit
    #[arg(long)]
    export_summary: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let mut config = load_config(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    if let Some(api_key) = cli.api_key {
        config.places.api_key = api_key;
    }

    if cli.interactive {
        prompt_overrides(&mut config, &mut io::stdin().lock())?;
        validate(&config).context("Invalid interactive input")?;
    }

    if cli.export_summary {
        handle_export_summary(&config)
    } else {
        handle_harvest(&config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("mail_ripple=info,warn"),
            1 => EnvFilter::new("mail_ripple=debug,info"),
            2 => EnvFilter::new("mail_ripple=trace,debug"),
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

/// Asks for the run parameters on stdin; empty answers keep the config value
fn prompt_overrides(config: &mut Config, input: &mut impl BufRead) -> anyhow::Result<()> {
    if let Some(api_key) = prompt(input, "Places API key", None)? {
        config.places.api_key = api_key;
    }

    if let Some(query) = prompt(input, "Search query", Some(&config.places.query))? {
        config.places.query = query;
    }

    if let Some(sheet_name) = prompt(input, "Sheet name", Some(&config.output.sheet_name))? {
        config.output.sheet_name = sheet_name;
    }

    let current_zips = config.places.effective_zip_codes();
    let zip_hint = match current_zips.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [first, .., last] => format!("{}..{}", first, last),
    };
    if let Some(zips) = prompt(input, "Zip codes (comma separated)", Some(&zip_hint))? {
        config.places.zip_codes = zips
            .split(',')
            .map(str::trim)
            .filter(|z| !z.is_empty())
            .map(str::to_string)
            .collect();
    }

    Ok(())
}

/// Prints a prompt and reads one line; `None` for an empty answer
fn prompt(
    input: &mut impl BufRead,
    label: &str,
    current: Option<&str>,
) -> anyhow::Result<Option<String>> {
    match current {
        Some(current) => print!("{} [{}]: ", label, current),
        None => print!("{}: ", label),
    }
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let answer = line.trim();
    Ok((!answer.is_empty()).then(|| answer.to_string()))
}

/// Handles the --export-summary mode: renders the existing sheet as markdown
fn handle_export_summary(config: &Config) -> anyhow::Result<()> {
    let summary_path = config
        .output
        .summary_path
        .as_deref()
        .context("--export-summary needs output.summary-path in the configuration")?;

    let storage = open_storage(Path::new(&config.output.database_path))?;

    tracing::info!("Loading sheet '{}'...", config.output.sheet_name);
    let summary = generate_summary(&storage, &config.output.sheet_name)?;
    generate_markdown_summary(&summary, Path::new(summary_path))?;

    println!("✓ Summary exported to: {}", summary_path);

    Ok(())
}

/// Handles the main harvest run
async fn handle_harvest(config: &Config) -> anyhow::Result<()> {
    let mut storage = open_storage(Path::new(&config.output.database_path))?;

    tracing::info!(
        "Harvesting '{}' into sheet '{}' ({})",
        config.places.query,
        config.output.sheet_name,
        config.output.database_path
    );

    match run_harvest(config, &mut storage).await {
        Ok(report) => {
            print_report(&report);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}

fn print_report(report: &HarvestReport) {
    println!("Zip codes searched:  {}", report.zip_codes_searched);
    println!("Unique listings:     {}", report.unique_places);
    println!("Rows written:        {}", report.rows_written);
    println!("Listings with email: {}", report.listings_with_email);
}
