//! Grand Rapids Business Journal archive scraper.
//!
//! [`GrbjScraper`] ties the pieces together:
//!
//! 1. fetch the homepage
//! 2. collect article and blog links, optionally through the menu pages
//! 3. scrape every link with the table for its template
//! 4. group the records by author
//!
//! Links are processed one at a time. A link is classified by
//! [`LinkKind::classify`]: directory listings and links matching neither
//! template produce no record.

use crate::error::{Result, ScrapeError};
use crate::models::{ArticleRecord, AuthorIndex, LinkKind, LinkSet, RecordSpec};
use crate::scrapers::extract::parse_selector;
use crate::scrapers::links::collect_links;
use crate::scrapers::record::{self, ARTICLE_SPEC, BLOG_SPEC, TEASER_SCOPE, TEASER_SPEC};
use crate::transport::{Fetch, HttpFetcher, TransportConfig};
use scraper::Html;
use tracing::{debug, info, instrument};
use url::Url;

/// Archive homepage used when no base URL is given.
pub const DEFAULT_BASE_URL: &str = "http://archive-grbj-2.s3-website-us-west-1.amazonaws.com/";

/// Scraper for a single archive site.
#[derive(Debug)]
pub struct GrbjScraper<F = HttpFetcher> {
    base_url: String,
    fetcher: F,
}

/// Validate the base URL, falling back to [`DEFAULT_BASE_URL`].
pub fn validate_base_url(base_url: Option<&str>) -> Result<(String, Url)> {
    let base_url = base_url.unwrap_or(DEFAULT_BASE_URL).trim();
    if base_url.is_empty() {
        return Err(ScrapeError::Configuration("Base URL is not defined".to_string()));
    }
    let parsed = Url::parse(base_url).map_err(|e| {
        ScrapeError::Configuration(format!("Base URL `{base_url}` is not valid: {e}"))
    })?;
    Ok((base_url.to_string(), parsed))
}

impl GrbjScraper<HttpFetcher> {
    /// Scraper over HTTP. The client is built on the first request.
    pub fn new(base_url: Option<&str>, config: TransportConfig) -> Result<Self> {
        let (base_url, parsed) = validate_base_url(base_url)?;
        Ok(Self {
            base_url,
            fetcher: HttpFetcher::new(parsed, config),
        })
    }
}

impl<F: Fetch> GrbjScraper<F> {
    /// Scraper over an injected transport.
    pub fn with_fetcher(base_url: Option<&str>, fetcher: F) -> Result<Self> {
        let (base_url, _) = validate_base_url(base_url)?;
        Ok(Self { base_url, fetcher })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Canonical URL of a scraped link: `base_url + "/" + link`, verbatim.
    ///
    /// Slashes are not collapsed, so the default base URL (which ends in `/`)
    /// joined with a root-relative link such as `/article/foo` gives
    /// `...amazonaws.com///article/foo`.
    pub fn canonical_url(&self, link: &str) -> String {
        format!("{}/{}", self.base_url, link)
    }

    /// Fetch `uri`, or the homepage when `None`.
    pub async fn get_content(&self, uri: Option<&str>) -> Result<String> {
        self.fetcher.fetch(uri.unwrap_or("/")).await
    }

    /// Article and blog links found in `content`.
    pub async fn get_article_links(&self, content: &str, deep: bool) -> Result<LinkSet> {
        collect_links(&self.fetcher, content, deep).await
    }

    /// Fetch `link` and parse it with `spec`, adding `article.url`.
    async fn scrape_page(&self, link: &str, spec: &RecordSpec) -> Result<ArticleRecord> {
        let content = self.get_content(Some(link)).await?;
        let mut record = record::parse(&Html::parse_document(&content), spec)?;
        record.set("article", "url", Some(self.canonical_url(link)));
        Ok(record)
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn scrape_article(&self, link: &str) -> Result<ArticleRecord> {
        self.scrape_page(link, &ARTICLE_SPEC).await
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn scrape_blog(&self, link: &str) -> Result<ArticleRecord> {
        self.scrape_page(link, &BLOG_SPEC).await
    }

    /// Teasers from the homepage's secondary record list.
    pub fn scrape_front_page(&self, content: &str) -> Result<Vec<ArticleRecord>> {
        let document = Html::parse_document(content);
        let scope = parse_selector(TEASER_SCOPE)?;
        let teasers = document
            .select(&scope)
            .map(|element| record::parse_scoped(element, &TEASER_SPEC))
            .collect::<Result<Vec<_>>>()?;
        debug!(count = teasers.len(), "Parsed front page teasers");
        Ok(teasers)
    }

    /// Scrape every article and blog post reachable from the homepage,
    /// grouped by author.
    ///
    /// Links containing `directories`, and links that are neither an article
    /// nor a blog post, are skipped. Records without an author name are
    /// dropped.
    ///
    /// # Arguments
    ///
    /// * `deep_search` - Also collect links from the navigation-menu pages
    ///
    /// # Returns
    ///
    /// An [`AuthorIndex`] mapping each author name to their records, in the
    /// order they were scraped.
    ///
    /// # Errors
    ///
    /// Fails if the homepage or any article or blog fetch fails. Menu pages
    /// that fail during a deep search are skipped instead.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let scraper = GrbjScraper::new(None, TransportConfig::default())?;
    /// let by_author = scraper.get_data(true).await?;
    /// println!("{} authors", by_author.len());
    /// ```
    #[instrument(level = "info", skip(self), fields(base_url = %self.base_url))]
    pub async fn get_data(&self, deep_search: bool) -> Result<AuthorIndex> {
        let homepage = self.get_content(None).await?;
        let links = self.get_article_links(&homepage, deep_search).await?;

        let mut index = AuthorIndex::new();
        let mut skipped = 0usize;
        let mut dropped = 0usize;

        for link in links.iter() {
            let record = match LinkKind::classify(link) {
                LinkKind::Article => self.scrape_article(link).await?,
                LinkKind::Blog => self.scrape_blog(link).await?,
                kind @ (LinkKind::Excluded | LinkKind::Unclassified) => {
                    debug!(%link, ?kind, "Skipping link");
                    skipped += 1;
                    continue;
                }
            };

            if !index.insert(record) {
                debug!(%link, "No author name; record dropped");
                dropped += 1;
            }
        }

        info!(
            links = links.len(),
            skipped,
            dropped,
            authors = index.len(),
            records = index.record_count(),
            "Scrape complete"
        );
        Ok(index)
    }
}
