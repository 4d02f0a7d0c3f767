//! url2email: crawl one website and print the email addresses found on it

use clap::Parser;
use mail_ripple::crawler::crawl;
use mail_ripple::DEFAULT_PAGE_BUDGET;
use std::collections::HashSet;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

/// Crawls a website breadth-first, staying on its host, and prints every
/// email address found on the visited pages
#[derive(Parser, Debug)]
#[command(name = "url2email")]
#[command(version)]
#[command(about = "Find email addresses on a website", long_about = None)]
struct Cli {
    /// Starting page; only links on the same host are followed
    #[arg(value_name = "URL")]
    url: String,

    /// Maximum number of pages to fetch
    #[arg(
        long,
        value_name = "N",
        default_value_t = DEFAULT_PAGE_BUDGET,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    max_pages: usize,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("mail_ripple=warn"),
        1 => EnvFilter::new("mail_ripple=info,warn"),
        _ => EnvFilter::new("mail_ripple=debug,info"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    run(&cli, &mut io::stdout().lock()).await
}

/// Crawls the requested site and writes the report to `out`
async fn run(cli: &Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let emails = crawl(&cli.url, cli.max_pages).await?;
    write_emails(&emails, out)?;
    Ok(())
}

/// Writes the found emails one per line in lexical order
fn write_emails(emails: &HashSet<String>, out: &mut impl Write) -> io::Result<()> {
    if emails.is_empty() {
        return writeln!(out, "No email addresses found.");
    }

    let mut sorted: Vec<&String> = emails.iter().collect();
    sorted.sort();

    writeln!(out, "Found the following email addresses:")?;
    for email in sorted {
        writeln!(out, "{}", email)?;
    }
    Ok(())
}
