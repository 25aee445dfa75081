//! Command-line interface definitions.
//!
//! All options can be given as flags; the base URL and timeout also fall back
//! to environment variables.

use clap::Parser;
use std::time::Duration;

/// Scrape the GRBJ archive and group articles by author.
///
/// # Examples
///
/// ```sh
/// # Homepage only, JSON to stdout
/// grbj_scraper
///
/// # Follow the navigation menu and write to ./json
/// grbj_scraper --deep -j ./json
///
/// # Different mirror with a 30 second timeout
/// grbj_scraper --base-url http://localhost:8080/ --timeout-secs 30
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Base URL of the archive (defaults to the public S3 mirror)
    #[arg(long, env = "GRBJ_BASE_URL")]
    pub base_url: Option<String>,

    /// Also follow navigation-menu pages when collecting links
    #[arg(short, long)]
    pub deep: bool,

    /// Request timeout in seconds (no timeout when omitted)
    #[arg(long, env = "GRBJ_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Output directory for the JSON file; prints to stdout when omitted
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// Log the homepage teaser list before scraping
    #[arg(long)]
    pub teasers: bool,
}

impl Cli {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["grbj_scraper"]);

        assert!(!cli.deep);
        assert!(!cli.teasers);
        assert_eq!(cli.json_output_dir, None);
        assert_eq!(cli.timeout(), None);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "grbj_scraper",
            "--deep",
            "--base-url",
            "http://localhost:8080/",
            "--timeout-secs",
            "30",
            "-j",
            "/tmp/json",
        ]);

        assert!(cli.deep);
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:8080/"));
        assert_eq!(cli.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(cli.json_output_dir.as_deref(), Some("/tmp/json"));
    }
}
