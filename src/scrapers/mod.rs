//! Selector-driven scraping of the news archive.
//!
//! The pipeline is built from small layers, leaves first:
//!
//! | Layer | Module | Role |
//! |-------|--------|------|
//! | Extraction | [`extract`] | One selector spec against a document or element |
//! | Records | [`record`] | A `"bucket.key"` table of specs into an [`ArticleRecord`](crate::models::ArticleRecord) |
//! | Links | [`links`] | Trending, headline and menu link discovery |
//! | Site | [`grbj`] | Fetch, classify, scrape and group by author |
//!
//! Every page template is a static table in [`record`]. Adding a template
//! means adding a table and a [`LinkKind`](crate::models::LinkKind) variant.

pub mod extract;
pub mod grbj;
pub mod links;
pub mod record;
