//! wiki-crawler main entry point
//!
//! This is the command-line interface for the wiki-crawler scraper.

use anyhow::Context;
use clap::{ArgGroup, Parser};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use wiki_crawler::config::{load_config, Config};
use wiki_crawler::crawler::{spell_row, WikiCrawlerSession, ERROR_MARKER};
use wiki_crawler::output::{
    read_csv, replay_columns, OutputColumn, OutputTable, Printer, WidthSource,
};

/// wiki-crawler: Blue Magic spell descriptions from a wiki
///
/// Lists spell descriptions as an aligned table (mirrored to CSV), prints a
/// single page's HTML, or replays a previously written CSV.
#[derive(Parser, Debug)]
#[command(name = "wiki-crawler")]
#[command(version)]
#[command(about = "Wiki crawler for Blue Magic spell descriptions", long_about = None)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["uri", "list_descriptions", "print_csv"]),
))]
struct Cli {
    /// Print debugging information, including response headers
    #[arg(short, long)]
    debug: bool,

    /// URI to retrieve and print as parsed HTML
    #[arg(short, long, value_name = "URI")]
    uri: Option<String>,

    /// List Blue Magic spell descriptions
    #[arg(short, long)]
    list_descriptions: bool,

    /// List Blue Magic spell descriptions from the CSV file
    #[arg(short, long)]
    print_csv: bool,

    /// Dump descriptions as json, json-pretty or pprint instead of a table
    #[arg(short, long, value_name = "FORMAT", requires = "list_descriptions")]
    format: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// CSV file to write (or replay), overriding the configuration
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    let config = match &cli.config {
        Some(path) => {
            tracing::debug!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    let csv_path = cli
        .csv
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.csv_path));

    if cli.list_descriptions {
        // Validate the format before any request goes out
        let printer = cli.format.as_deref().map(Printer::new).transpose()?;
        let session = WikiCrawlerSession::from_config(&config, cli.debug)?;
        match printer {
            Some(printer) => dump_descriptions(&session, &config, &printer).await?,
            None => list_descriptions(&session, &config, &csv_path).await?,
        }
    } else if let Some(uri) = &cli.uri {
        let session = WikiCrawlerSession::from_config(&config, cli.debug)?;
        let document = session.get_document(uri).await?;
        println!("{}", document.html());
    } else if cli.print_csv {
        print_csv(&csv_path)?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber; logs go to stderr so stdout
/// only carries tables and dumps
fn setup_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("wiki_crawler=debug,info")
    } else {
        EnvFilter::new("wiki_crawler=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Crawls the category page and prints one table row per spell, mirroring
/// every row into the CSV file
async fn list_descriptions(
    session: &WikiCrawlerSession,
    config: &Config,
    csv_path: &Path,
) -> anyhow::Result<()> {
    let links = session.get_links(&config.site.category_page).await?;

    let mut table = OutputTable::new(
        vec![
            (
                "spell",
                OutputColumn::new("Spell", WidthSource::keys(links.iter().map(|(s, u)| (s, u))))?,
            ),
            (
                "desc",
                OutputColumn::new(
                    "Description",
                    WidthSource::Fixed(config.output.description_width),
                )?,
            ),
        ],
        Some(csv_path),
    )?;
    table.print_header_row(true)?;

    for (spell, uri) in &links {
        let description = session.get_spell_description(uri).await;
        if let Err(e) = &description {
            tracing::warn!("Could not read description of {}: {}", spell, e);
        }
        table.print_row(&spell_row(spell, &description, true))?;
    }

    table.close()?;
    tracing::info!("Wrote {} rows to {}", links.len(), csv_path.display());
    Ok(())
}

/// Crawls the category page and dumps `{spell: description}` in one go
async fn dump_descriptions(
    session: &WikiCrawlerSession,
    config: &Config,
    printer: &Printer,
) -> anyhow::Result<()> {
    let descriptions: BTreeMap<String, String> = session
        .get_spell_descriptions(&config.site.category_page)
        .await?
        .into_iter()
        .map(|(spell, description)| {
            (spell, description.unwrap_or_else(|_| ERROR_MARKER.to_string()))
        })
        .collect();

    printer.pprint(&descriptions)?;
    Ok(())
}

/// Replays a CSV file written by `--list-descriptions` as a table
fn print_csv(csv_path: &Path) -> anyhow::Result<()> {
    let rows = read_csv(csv_path)
        .with_context(|| format!("Failed to read {}", csv_path.display()))?;
    let columns = replay_columns(&rows)
        .with_context(|| format!("Failed to size columns from {}", csv_path.display()))?;

    let mut table = OutputTable::new(columns, None)?;
    table.print_header_row(true)?;
    table.print_rows(&rows)?;
    Ok(())
}
