//! Link discovery on the archive homepage.
//!
//! The base pass reads two lists from a page:
//!
//! - **trending**: `#section-3 .records li`
//! - **headlines**: `.record h2.headline`
//!
//! and takes the `href` of the first anchor inside each item. A deep search
//! also follows every navigation-menu link (`li.level2-li a`) once and runs
//! the base pass over each menu page. Menu pages are never scanned for
//! further menu links.

use crate::error::Result;
use crate::models::LinkSet;
use crate::scrapers::extract::parse_selector;
use crate::transport::Fetch;
use futures::stream::{self, StreamExt, TryStreamExt};
use scraper::Html;
use tracing::{debug, info, instrument, warn};

pub const TRENDING_SELECTOR: &str = "#section-3 .records li";
pub const HEADLINE_SELECTOR: &str = ".record h2.headline";
pub const MENU_SELECTOR: &str = "li.level2-li a";

/// `href` of the first anchor inside each element matching `container`.
///
/// Elements without an anchor, and anchors with a blank `href`, are skipped.
fn first_anchor_hrefs(document: &Html, container: &str) -> Result<Vec<String>> {
    let containers = parse_selector(container)?;
    let anchor = parse_selector("a")?;

    Ok(document
        .select(&containers)
        .filter_map(|element| element.select(&anchor).next())
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| !href.trim().is_empty())
        .map(str::to_string)
        .collect())
}

/// Trending and headline links of a single page.
pub fn base_links(document: &Html) -> Result<LinkSet> {
    let mut links = LinkSet::new();
    links.extend(first_anchor_hrefs(document, TRENDING_SELECTOR)?);
    links.extend(first_anchor_hrefs(document, HEADLINE_SELECTOR)?);
    Ok(links)
}

/// Navigation-menu links of a single page.
pub fn menu_links(document: &Html) -> Result<LinkSet> {
    let selector = parse_selector(MENU_SELECTOR)?;
    Ok(document
        .select(&selector)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| !href.trim().is_empty())
        .map(str::to_string)
        .collect())
}

/// Fetch one menu page and run the base pass over it.
///
/// A transport failure, including a link that cannot be resolved, is logged
/// and yields `None`; anything else propagates.
async fn scan_menu_page<F: Fetch>(fetcher: &F, menu_link: &str) -> Result<Option<LinkSet>> {
    match fetcher.fetch(menu_link).await {
        Ok(body) => {
            let found = base_links(&Html::parse_document(&body))?;
            debug!(%menu_link, count = found.len(), "Scanned menu page");
            Ok(Some(found))
        }
        Err(e) if e.is_transport() => {
            warn!(%menu_link, error = %e, "Menu page fetch failed; skipping");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Collect article and blog links from `content`.
///
/// With `deep`, every menu page is fetched sequentially and its links are
/// added to the result.
///
/// # Arguments
///
/// * `fetcher` - Transport used for menu pages
/// * `content` - HTML of the page to scan, usually the homepage
/// * `deep` - Whether to follow navigation-menu links one level
///
/// # Returns
///
/// The union of trending and headline links from `content` and, with `deep`,
/// from every menu page that could be fetched.
///
/// # Errors
///
/// Menu pages that fail to fetch are skipped. Only an invalid selector
/// fails the collection.
///
/// # Examples
///
/// ```ignore
/// let homepage = fetcher.fetch("/").await?;
/// let links = collect_links(&fetcher, &homepage, true).await?;
/// ```
#[instrument(level = "info", skip(fetcher, content))]
pub async fn collect_links<F: Fetch>(fetcher: &F, content: &str, deep: bool) -> Result<LinkSet> {
    let (mut links, menu) = {
        let document = Html::parse_document(content);
        let links = base_links(&document)?;
        let menu = if deep { menu_links(&document)? } else { LinkSet::new() };
        (links, menu)
    };
    info!(count = links.len(), "Collected homepage links");

    if !deep {
        return Ok(links);
    }

    info!(menu_pages = menu.len(), "Searching menu pages");
    let pages: Vec<Option<LinkSet>> = stream::iter(menu)
        .then(|menu_link| async move { scan_menu_page(fetcher, &menu_link).await })
        .try_collect()
        .await?;

    let scanned = pages.iter().filter(|page| page.is_some()).count();
    for found in pages.into_iter().flatten() {
        links.extend(found);
    }
    info!(count = links.len(), scanned, "Collected links with deep search");

    Ok(links)
}
