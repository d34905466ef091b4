//! Per-site scrapers behind a common capability.
//!
//! Each supported site gets one module implementing [`SiteScraper`]. The
//! variants differ only in which HTTP client they use, the structural
//! selectors for listing/item/content elements, how the displayed date is
//! matched against the reference date, and whether a text-normalization pass
//! is applied. Adding a site means adding a variant module and a factory arm;
//! shared logic never branches on site name.

use async_trait::async_trait;
use chrono::NaiveDate;
use scraper::ElementRef;
use url::Url;

use crate::errors::{FetchError, UnsupportedSiteError};
use crate::fetch::HtmlFetcher;
use crate::models::ArticleSummary;

pub mod darkreading;
pub mod hackernews;

pub use darkreading::DarkReadingScraper;
pub use hackernews::HackerNewsScraper;

/// One site's scraping strategy: fetch the listing, extract today's
/// summaries, fetch an article's body text.
#[async_trait]
pub trait SiteScraper: Send + Sync {
    /// Key under which this site's articles appear in the aggregated document.
    fn key(&self) -> &'static str;

    /// Base URL that relative article links are resolved against.
    fn base_url(&self) -> &Url;

    /// The HTTP client this site is fetched with.
    fn fetcher(&self) -> &dyn HtmlFetcher;

    /// Retrieve raw markup for `url` via this site's fetcher.
    async fn fetch_listing_html(&self, url: &str) -> Result<String, FetchError> {
        self.fetcher().fetch_html(url).await
    }

    /// Parse listing markup into the entries published on `reference_date`,
    /// in document order. Malformed entries are skipped, never an error; a
    /// missing listing container yields an empty vec.
    fn extract_summaries(&self, html: &str, reference_date: NaiveDate) -> Vec<ArticleSummary>;

    /// Fetch an article page and extract its body as plain text.
    ///
    /// Returns an empty string when the body container is absent; only the
    /// page fetch itself can fail.
    async fn fetch_article_body(&self, article_url: &str) -> Result<String, FetchError>;
}

impl std::fmt::Debug for dyn SiteScraper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteScraper").field("key", &self.key()).finish()
    }
}

/// Build the scraper for `site_name` (case-insensitive).
///
/// Pure construction: no I/O happens until the scraper is driven.
pub fn create(
    site_name: &str,
    base_url: Url,
) -> Result<Box<dyn SiteScraper>, UnsupportedSiteError> {
    match site_name.to_ascii_lowercase().as_str() {
        "darkreading" => Ok(Box::new(DarkReadingScraper::new(base_url))),
        "hackernews" => Ok(Box::new(HackerNewsScraper::new(base_url))),
        other => Err(UnsupportedSiteError(other.to_string())),
    }
}

/// Concatenated text of an element's descendants, trimmed.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Resolve `href` against `base`, yielding an absolute URL string.
pub(crate) fn resolve_link(base: &Url, href: &str) -> Option<String> {
    base.join(href).ok().map(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/").unwrap()
    }

    #[test]
    fn test_create_known_sites() {
        let dr = create("darkreading", base()).unwrap();
        assert_eq!(dr.key(), "darkreading");

        let hn = create("hackernews", base()).unwrap();
        assert_eq!(hn.key(), "thehackernews");
    }

    #[test]
    fn test_create_is_case_insensitive() {
        assert!(create("DarkReading", base()).is_ok());
        assert!(create("HACKERNEWS", base()).is_ok());
    }

    #[test]
    fn test_create_rejects_unknown_site() {
        let err = create("other", base()).unwrap_err();
        assert_eq!(err.to_string(), "unsupported site: other");
    }

    #[test]
    fn test_resolve_link_root_relative() {
        let base = Url::parse("https://example.com/").unwrap();
        assert_eq!(
            resolve_link(&base, "/news/x").as_deref(),
            Some("https://example.com/news/x")
        );
    }

    #[test]
    fn test_resolve_link_passes_absolute_through() {
        let base = Url::parse("https://example.com/").unwrap();
        assert_eq!(
            resolve_link(&base, "https://other.example/a").as_deref(),
            Some("https://other.example/a")
        );
    }
}
