//! Single-field extraction from a parsed page.
//!
//! [`extract`] evaluates one [`SelectorSpec`] against a scope (the document
//! root or any element inside it) and returns the first acceptable value:
//!
//! - the element's concatenated text content, or the requested attribute
//!   (an absent attribute yields an empty string)
//! - without a validator, the first matched element wins
//! - with a validator, the first value matching it wins, and if no matched
//!   element satisfies it the result is `None`

use crate::error::{Result, ScrapeError};
use crate::models::SelectorSpec;
use scraper::{ElementRef, Html, Selector};
use tracing::trace;

/// Compile a CSS selector.
pub fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector.trim())
        .map_err(|e| ScrapeError::Parse(format!("Invalid selector `{selector}`: {e}")))
}

/// Text content of `element`, or the value of `attribute` when given.
pub fn element_value(element: ElementRef<'_>, attribute: Option<&str>) -> String {
    match attribute {
        None => element.text().collect::<String>(),
        Some(name) => element.value().attr(name).unwrap_or_default().to_string(),
    }
}

/// Evaluate `spec` against the descendants of `scope`.
///
/// # Arguments
///
/// * `scope` - Element whose descendants are queried, e.g. `document.root_element()`
/// * `spec` - Selector, optional attribute and optional validator
///
/// # Returns
///
/// The first acceptable value in document order, or `None` when nothing
/// matches the selector or no matched value satisfies the validator.
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] if the selector is not valid CSS.
///
/// # Examples
///
/// ```ignore
/// let spec = SelectorSpec::attr(".author_bio a", "href").validated(Regex::new("twitter")?);
/// let twitter = extract(document.root_element(), &spec)?;
/// ```
pub fn extract(scope: ElementRef<'_>, spec: &SelectorSpec) -> Result<Option<String>> {
    let selector = parse_selector(&spec.selector)?;

    for element in scope.select(&selector) {
        let value = element_value(element, spec.attribute.as_deref());
        match &spec.validator {
            None => return Ok(Some(value)),
            Some(validator) if validator.is_match(&value) => return Ok(Some(value)),
            Some(validator) => {
                trace!(selector = %spec.selector, %validator, %value, "Value rejected by validator");
            }
        }
    }

    Ok(None)
}

/// Evaluate `spec` against a whole document.
pub fn extract_from_document(document: &Html, spec: &SelectorSpec) -> Result<Option<String>> {
    extract(document.root_element(), spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    const BIO_LINKS: &str = r#"
        <div class="author_bio">
            <p>Jane covers <b>manufacturing</b>.</p>
            <a href="/facebook/x">Facebook</a>
            <a href="/twitter/jane">Twitter</a>
            <a href="/twitter/other">Twitter again</a>
            <a>No link</a>
        </div>
    "#;

    fn doc(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn test_first_match_text() {
        let document = doc("<ul><li>one</li><li>two</li></ul>");
        let value = extract_from_document(&document, &SelectorSpec::text("li")).unwrap();
        assert_eq!(value.as_deref(), Some("one"));
    }

    #[test]
    fn test_no_match_is_none() {
        let document = doc("<p>nothing here</p>");
        let value = extract_from_document(&document, &SelectorSpec::text("h1")).unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_text_concatenates_descendants() {
        let document = doc(BIO_LINKS);
        let value = extract_from_document(&document, &SelectorSpec::text(".author_bio p")).unwrap();
        assert_eq!(value.as_deref(), Some("Jane covers manufacturing."));
    }

    #[test]
    fn test_attribute_of_first_match() {
        let document = doc(BIO_LINKS);
        let value =
            extract_from_document(&document, &SelectorSpec::attr(".author_bio a", "href")).unwrap();
        assert_eq!(value.as_deref(), Some("/facebook/x"));
    }

    #[test]
    fn test_missing_attribute_is_empty() {
        let document = doc("<a>No link</a>");
        let value = extract_from_document(&document, &SelectorSpec::attr("a", "href")).unwrap();
        assert_eq!(value.as_deref(), Some(""));
    }

    #[test]
    fn test_validator_skips_to_first_valid_value() {
        let document = doc(BIO_LINKS);
        let spec = SelectorSpec::attr(".author_bio a", "href")
            .validated(Regex::new("twitter").unwrap());
        let value = extract_from_document(&document, &spec).unwrap();
        assert_eq!(value.as_deref(), Some("/twitter/jane"));
    }

    #[test]
    fn test_validator_without_valid_value_is_none() {
        let document = doc(BIO_LINKS);
        let spec = SelectorSpec::attr(".author_bio a", "href")
            .validated(Regex::new("linkedin").unwrap());
        let value = extract_from_document(&document, &spec).unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_scoped_extraction_ignores_outside_elements() {
        let document = doc(
            r#"<h2>outside</h2><div class="record"><h2>inside</h2></div>"#,
        );
        let record = parse_selector(".record").unwrap();
        let scope = document.select(&record).next().unwrap();
        let value = extract(scope, &SelectorSpec::text("h2")).unwrap();
        assert_eq!(value.as_deref(), Some("inside"));
    }

    #[test]
    fn test_invalid_selector_is_parse_error() {
        let document = doc("<p>x</p>");
        let err = extract_from_document(&document, &SelectorSpec::text("div[")).unwrap_err();
        assert!(matches!(err, ScrapeError::Parse(_)));
    }
}
