//! # GRBJ Scraper
//!
//! Scrapes article and blog records from the Grand Rapids Business Journal
//! archive and groups them by author.
//!
//! Each page template is described by a declarative table mapping
//! `"bucket.key"` field names to CSS selectors, optionally with an attribute
//! to read and a regex the value must satisfy. See [`scrapers::record`].
//!
//! ## Usage
//!
//! ```no_run
//! use grbj_scraper::scrapers::grbj::GrbjScraper;
//! use grbj_scraper::transport::TransportConfig;
//!
//! # async fn run() -> grbj_scraper::error::Result<()> {
//! let scraper = GrbjScraper::new(None, TransportConfig::default())?;
//! let by_author = scraper.get_data(false).await?;
//! for author in by_author.authors() {
//!     println!("{author}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod models;
pub mod outputs;
pub mod scrapers;
pub mod transport;
pub mod utils;
