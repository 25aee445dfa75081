//! # GRBJ Scraper
//!
//! Fetches the Grand Rapids Business Journal archive homepage, scrapes every
//! linked article and blog post, and groups the records by author.
//!
//! ## Usage
//!
//! ```sh
//! grbj_scraper --deep -j ./json
//! ```
//!
//! ## Architecture
//!
//! 1. **Indexing**: collect article links from the homepage (and menu pages with `--deep`)
//! 2. **Scraping**: fetch each article or blog post and apply its selector table
//! 3. **Grouping**: index records by author name
//! 4. **Output**: write JSON to a dated file, or print it

use clap::Parser;
use grbj_scraper::outputs::json;
use grbj_scraper::scrapers::grbj::GrbjScraper;
use grbj_scraper::transport::TransportConfig;
use grbj_scraper::utils::{ensure_writable_dir, squash_whitespace, truncate_for_log};
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("grbj_scraper starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(path = %dir, error = %e, "JSON output directory is not writable");
            return Err(e.into());
        }
    }

    let config = TransportConfig {
        timeout: args.timeout(),
    };
    let scraper = GrbjScraper::new(args.base_url.as_deref(), config)?;
    info!(base_url = %scraper.base_url(), deep = args.deep, "Scraper configured");

    if args.teasers {
        let homepage = scraper.get_content(None).await?;
        for teaser in scraper.scrape_front_page(&homepage)? {
            info!(
                title = %squash_whitespace(teaser.get("article", "title").unwrap_or_default()),
                subject = %truncate_for_log(
                    &squash_whitespace(teaser.get("article", "subject").unwrap_or_default()),
                    120
                ),
                link = teaser.get("article", "link").unwrap_or_default(),
                "Front page teaser"
            );
        }
    }

    let by_author = scraper.get_data(args.deep).await?;

    match &args.json_output_dir {
        Some(dir) => {
            let path = json::write_author_index(&by_author, dir).await?;
            info!(path = %path.display(), "Wrote JSON output");
        }
        None => println!("{}", serde_json::to_string_pretty(&by_author)?),
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        authors = by_author.len(),
        records = by_author.record_count(),
        "Execution complete"
    );

    Ok(())
}
