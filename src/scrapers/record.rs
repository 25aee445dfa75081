//! Record parsing driven by declarative selector tables.
//!
//! A [`RecordSpec`] maps `"bucket.key"` field names to [`SelectorSpec`]s.
//! [`parse`] applies every entry in order and stores the result at
//! `record[bucket][key]`. A selector that matches nothing still produces the
//! key, with a `null` value.
//!
//! The page templates of the archive differ only in their container
//! selectors, so each template is a small static table built by
//! [`template_spec`]:
//!
//! | Table | Container | Title | Author bio |
//! |-------|-----------|-------|------------|
//! | [`ARTICLE_SPEC`] | `.box1.article .records .record` | `h1` | `#section-2` recent-articles bio |
//! | [`BLOG_SPEC`] | `.box1.blog-post .records .record` | `h1.headline` | bio nested in the post record |
//!
//! [`TEASER_SPEC`] is applied per element of the homepage's secondary list.

use crate::error::{Result, ScrapeError};
use crate::models::{ArticleRecord, RecordSpec, SelectorSpec};
use crate::scrapers::extract::extract;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html};
use tracing::trace;

pub const ARTICLE_SCOPE: &str = ".box1.article .records .record";
pub const ARTICLE_BIO_SCOPE: &str =
    "#section-2 .recent-articles .article-author-bio .records .record .author-info .author_bio";

pub const BLOG_SCOPE: &str = ".box1.blog-post .records .record";
pub const BLOG_BIO_SCOPE: &str =
    ".box1.blog-post .records .record .article-author-bio .records .record .author-info .author_bio";

/// Publication date, page-global on both templates.
pub const DATE_SELECTOR: &str = ".meta div.date";

/// Homepage secondary list entries.
pub const TEASER_SCOPE: &str = ".box1 .records.secondary .record";

static TWITTER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"twitter").unwrap());

pub static ARTICLE_SPEC: Lazy<RecordSpec> =
    Lazy::new(|| template_spec(ARTICLE_SCOPE, "h1", ARTICLE_BIO_SCOPE));

pub static BLOG_SPEC: Lazy<RecordSpec> =
    Lazy::new(|| template_spec(BLOG_SCOPE, "h1.headline", BLOG_BIO_SCOPE));

pub static TEASER_SPEC: Lazy<RecordSpec> = Lazy::new(|| {
    vec![
        ("article.title", SelectorSpec::text("h2.headline a")),
        ("article.subject", SelectorSpec::text("div.abstract")),
        ("article.link", SelectorSpec::attr("h2.headline a", "href")),
    ]
});

/// Field table for a page template.
pub fn template_spec(scope: &str, title: &str, bio_scope: &str) -> RecordSpec {
    let author_link = format!("{scope} div.author a");
    vec![
        ("article.title", SelectorSpec::text(format!("{scope} {title}"))),
        ("article.date", SelectorSpec::text(DATE_SELECTOR)),
        ("author.name", SelectorSpec::text(author_link.clone())),
        ("author.url", SelectorSpec::attr(author_link, "href")),
        (
            "author.twitter",
            SelectorSpec::attr(format!("{bio_scope} a"), "href").validated(TWITTER_RE.clone()),
        ),
        ("author.bio", SelectorSpec::text(bio_scope)),
    ]
}

/// Split `"bucket.key"` on its single dot.
pub fn split_field(name: &str) -> Result<(&str, &str)> {
    match name.split_once('.') {
        Some((bucket, key)) if !bucket.is_empty() && !key.is_empty() && !key.contains('.') => {
            Ok((bucket, key))
        }
        _ => Err(ScrapeError::FieldName(name.to_string())),
    }
}

/// Apply `spec` to a whole document.
pub fn parse(document: &Html, spec: &RecordSpec) -> Result<ArticleRecord> {
    parse_scoped(document.root_element(), spec)
}

/// Apply `spec` to the descendants of `scope`.
pub fn parse_scoped(scope: ElementRef<'_>, spec: &RecordSpec) -> Result<ArticleRecord> {
    let mut record = ArticleRecord::new();

    for (name, selector) in spec {
        if selector.is_empty() {
            continue;
        }
        let (bucket, key) = split_field(name)?;
        record.ensure_bucket(bucket);

        let value = extract(scope, selector)?;
        trace!(field = %name, ?value, "Extracted field");
        record.set(bucket, key, value);
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::extract::parse_selector;

    const ARTICLE_PAGE: &str = r#"
        <html><body>
        <div class="meta"><div class="date">July 21, 2017</div></div>
        <div class="box1 article">
          <div class="records">
            <div class="record">
              <h1>Title A</h1>
              <div class="author"><a href="/authors/jane">Jane Doe</a></div>
            </div>
          </div>
        </div>
        <div id="section-2">
          <div class="recent-articles">
            <div class="article-author-bio"><div class="records"><div class="record">
              <div class="author-info"><div class="author_bio">Jane writes about banking.
                <a href="/facebook/x">fb</a>
                <a href="/twitter/jane">tw</a>
              </div></div>
            </div></div></div>
          </div>
        </div>
        </body></html>
    "#;

    const BLOG_PAGE: &str = r#"
        <html><body>
        <div class="meta"><div class="date">Aug 1, 2017</div></div>
        <div class="box1 blog-post">
          <div class="records">
            <div class="record">
              <h1>Not the headline</h1>
              <h1 class="headline">Blog Title</h1>
              <div class="author"><a href="/authors/john">John Roe</a></div>
              <div class="article-author-bio"><div class="records"><div class="record">
                <div class="author-info"><div class="author_bio">John blogs.
                  <a href="https://twitter.com/johnroe">tw</a>
                </div></div>
              </div></div></div>
            </div>
          </div>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_article_spec() {
        let document = Html::parse_document(ARTICLE_PAGE);
        let record = parse(&document, &ARTICLE_SPEC).unwrap();

        assert_eq!(record.get("article", "title"), Some("Title A"));
        assert_eq!(record.get("article", "date"), Some("July 21, 2017"));
        assert_eq!(record.get("author", "name"), Some("Jane Doe"));
        assert_eq!(record.get("author", "url"), Some("/authors/jane"));
        assert_eq!(record.get("author", "twitter"), Some("/twitter/jane"));
        assert!(record.get("author", "bio").unwrap().contains("Jane writes about banking."));
    }

    #[test]
    fn test_blog_spec() {
        let document = Html::parse_document(BLOG_PAGE);
        let record = parse(&document, &BLOG_SPEC).unwrap();

        assert_eq!(record.get("article", "title"), Some("Blog Title"));
        assert_eq!(record.get("article", "date"), Some("Aug 1, 2017"));
        assert_eq!(record.get("author", "name"), Some("John Roe"));
        assert_eq!(record.get("author", "url"), Some("/authors/john"));
        assert_eq!(record.get("author", "twitter"), Some("https://twitter.com/johnroe"));
        assert!(record.get("author", "bio").unwrap().contains("John blogs."));
    }

    #[test]
    fn test_article_spec_on_blog_page_records_nulls() {
        let document = Html::parse_document(BLOG_PAGE);
        let record = parse(&document, &ARTICLE_SPEC).unwrap();

        for (name, _) in ARTICLE_SPEC.iter() {
            let (bucket, key) = split_field(name).unwrap();
            assert!(record.contains(bucket, key), "missing {name}");
        }
        assert_eq!(record.get("article", "title"), None);
        assert_eq!(record.get("author", "name"), None);
        assert_eq!(record.get("article", "date"), Some("Aug 1, 2017"));
    }

    #[test]
    fn test_empty_specs_are_skipped() {
        let document = Html::parse_document("<h1>x</h1>");
        let spec: RecordSpec = vec![
            ("article.title", SelectorSpec::text("h1")),
            ("article.skipped", SelectorSpec::text("")),
        ];
        let record = parse(&document, &spec).unwrap();
        assert!(record.contains("article", "title"));
        assert!(!record.contains("article", "skipped"));
    }

    #[test]
    fn test_split_field() {
        assert_eq!(split_field("author.name").unwrap(), ("author", "name"));
        assert!(matches!(split_field("author"), Err(ScrapeError::FieldName(_))));
        assert!(matches!(split_field("author.name.first"), Err(ScrapeError::FieldName(_))));
        assert!(matches!(split_field(".name"), Err(ScrapeError::FieldName(_))));
    }

    #[test]
    fn test_teaser_spec_is_scoped_per_record() {
        let document = Html::parse_document(
            r#"
            <div class="box1"><div class="records secondary">
              <div class="record">
                <h2 class="headline"><a href="/article/one">One</a></h2>
                <div class="abstract">First abstract</div>
              </div>
              <div class="record">
                <h2 class="headline"><a href="/article/two">Two</a></h2>
              </div>
            </div></div>
            "#,
        );
        let scope = parse_selector(TEASER_SCOPE).unwrap();
        let records = document
            .select(&scope)
            .map(|element| parse_scoped(element, &TEASER_SPEC))
            .collect::<Result<Vec<_>>>()
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("article", "subject"), Some("First abstract"));
        assert_eq!(records[1].get("article", "title"), Some("Two"));
        assert_eq!(records[1].get("article", "link"), Some("/article/two"));
        assert!(records[1].contains("article", "subject"));
        assert_eq!(records[1].get("article", "subject"), None);
    }
}
