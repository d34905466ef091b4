//! Run orchestration.
//!
//! Drives every configured site scraper sequentially, isolates per-site and
//! per-article failures, and assembles the run's [`AggregatedDocument`]. Only
//! factory misconfiguration escapes this module; everything else degrades to
//! empty results with a log line.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use tracing::{error, info, instrument, warn};
use url::Url;

use crate::errors::UnsupportedSiteError;
use crate::models::{AggregatedDocument, ArticleSummary};
use crate::scrapers::{self, SiteScraper};

/// One configured scrape target.
pub struct Site {
    pub id: &'static str,
    pub base_url: Url,
}

/// Sites processed each run, in document order.
pub static SITES: Lazy<Vec<Site>> = Lazy::new(|| {
    vec![
        Site {
            id: "hackernews",
            base_url: Url::parse("https://thehackernews.com/").unwrap(),
        },
        Site {
            id: "darkreading",
            base_url: Url::parse("https://www.darkreading.com/").unwrap(),
        },
    ]
});

/// Object name the document is persisted under, derived from the reference
/// date: `<ISO date>_cyber_articles.json`.
pub fn object_name(reference_date: NaiveDate) -> String {
    format!("{reference_date}_cyber_articles.json")
}

/// Scrape every configured site and assemble the aggregated document.
///
/// Fails only when the factory is handed an unknown site identifier; a site
/// whose listing cannot be fetched contributes an empty sequence instead.
#[instrument(level = "info")]
pub async fn run(reference_date: NaiveDate) -> Result<AggregatedDocument, UnsupportedSiteError> {
    let mut document = AggregatedDocument::new();
    for site in SITES.iter() {
        let scraper = scrapers::create(site.id, site.base_url.clone())?;
        let articles = scrape_site(scraper.as_ref(), reference_date).await;
        info!(site = scraper.key(), count = articles.len(), "Site scrape finished");
        document.insert(scraper.key(), articles);
    }
    info!(total = document.article_count(), "Aggregated document assembled");
    Ok(document)
}

/// Drive one scraper: listing fetch, date-filtered extraction, then a
/// sequential body fetch per retained summary.
pub(crate) async fn scrape_site(
    scraper: &dyn SiteScraper,
    reference_date: NaiveDate,
) -> Vec<ArticleSummary> {
    let listing_url = scraper.base_url().as_str().to_string();
    let html = match scraper.fetch_listing_html(&listing_url).await {
        Ok(html) => html,
        Err(error) => {
            error!(site = scraper.key(), url = %listing_url, %error, "Listing fetch failed; treating as zero articles");
            return Vec::new();
        }
    };

    let mut summaries = scraper.extract_summaries(&html, reference_date);
    for summary in &mut summaries {
        info!(site = scraper.key(), title = %summary.title, "Fetching article content");
        match scraper.fetch_article_body(&summary.link).await {
            Ok(content) => summary.content = content,
            Err(error) => {
                warn!(site = scraper.key(), url = %summary.link, %error, "Article fetch failed; leaving content empty");
            }
        }
    }
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::StaticFetcher;
    use crate::scrapers::{DarkReadingScraper, HackerNewsScraper};

    fn reference_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn hackernews_listing() -> &'static str {
        r#"<html><body><div class="blog-posts clear">
             <div class="body-post clear">
               <a class="story-link" href="/a">
                 <h2 class="home-title">X</h2>
                 <span class="h-datetime">Mar 01, 2024</span>
               </a>
             </div>
             <div class="body-post clear">
               <a class="story-link" href="/b">
                 <h2 class="home-title">Y</h2>
                 <span class="h-datetime">Feb 29, 2024</span>
               </a>
             </div>
           </div></body></html>"#
    }

    fn hackernews_article() -> &'static str {
        r#"<html><body><div id="articlebody">
             <p>Full article text.</p>
           </div></body></html>"#
    }

    #[test]
    fn test_object_name_uses_iso_date() {
        assert_eq!(
            object_name(reference_date()),
            "2024-03-01_cyber_articles.json"
        );
    }

    #[test]
    fn test_configured_sites() {
        let ids: Vec<&str> = SITES.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["hackernews", "darkreading"]);
    }

    #[tokio::test]
    async fn test_scrape_site_end_to_end() {
        let scraper = HackerNewsScraper::with_fetcher(
            Url::parse("https://thehackernews.com/").unwrap(),
            Box::new(
                StaticFetcher::new()
                    .with_page("https://thehackernews.com/", hackernews_listing())
                    .with_page("https://thehackernews.com/a", hackernews_article()),
            ),
        );

        let articles = scrape_site(&scraper, reference_date()).await;
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "X");
        assert_eq!(articles[0].link, "https://thehackernews.com/a");
        assert_eq!(articles[0].content, "Full article text.");
    }

    #[tokio::test]
    async fn test_body_fetch_failure_leaves_content_empty() {
        // Listing resolves but the article page does not.
        let scraper = HackerNewsScraper::with_fetcher(
            Url::parse("https://thehackernews.com/").unwrap(),
            Box::new(StaticFetcher::new().with_page("https://thehackernews.com/", hackernews_listing())),
        );

        let articles = scrape_site(&scraper, reference_date()).await;
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].content, "");
    }

    #[tokio::test]
    async fn test_one_failed_site_does_not_abort_the_run() {
        let failing = DarkReadingScraper::with_fetcher(
            Url::parse("https://www.darkreading.com/").unwrap(),
            Box::new(StaticFetcher::new()),
        );
        let working = HackerNewsScraper::with_fetcher(
            Url::parse("https://thehackernews.com/").unwrap(),
            Box::new(
                StaticFetcher::new()
                    .with_page("https://thehackernews.com/", hackernews_listing())
                    .with_page("https://thehackernews.com/a", hackernews_article()),
            ),
        );

        let mut document = AggregatedDocument::new();
        document.insert(working.key(), scrape_site(&working, reference_date()).await);
        document.insert(failing.key(), scrape_site(&failing, reference_date()).await);

        assert_eq!(document.get("thehackernews").unwrap().len(), 1);
        assert_eq!(document.get("darkreading").unwrap().len(), 0);
    }
}
