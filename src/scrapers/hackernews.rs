//! The Hacker News scraper.
//!
//! The front page is a flat list of `body-post` blocks. Displayed dates carry
//! a leading icon glyph, so instead of calendar-parsing, the cleaned date
//! text is string-compared against the reference date rendered in the same
//! `Mar 01, 2024` format. Every extracted fragment (title, date, tags, body
//! paragraphs) goes through the restricted-charset cleanup.

use async_trait::async_trait;
use chrono::NaiveDate;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::errors::FetchError;
use crate::fetch::{ChallengeFetcher, HtmlFetcher};
use crate::models::ArticleSummary;
use crate::scrapers::{element_text, resolve_link, SiteScraper};
use crate::utils::clean_text;

const DATE_FORMAT: &str = "%b %d, %Y";

pub struct HackerNewsScraper {
    base_url: Url,
    fetcher: Box<dyn HtmlFetcher>,
}

impl HackerNewsScraper {
    /// Scraper over the challenge-bypass client; the site blocks naive HTTP
    /// clients behind an anti-bot interstitial.
    pub fn new(base_url: Url) -> Self {
        Self::with_fetcher(base_url, Box::new(ChallengeFetcher::new()))
    }

    /// Scraper over an injected fetcher.
    pub fn with_fetcher(base_url: Url, fetcher: Box<dyn HtmlFetcher>) -> Self {
        Self { base_url, fetcher }
    }
}

#[async_trait]
impl SiteScraper for HackerNewsScraper {
    fn key(&self) -> &'static str {
        "thehackernews"
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn fetcher(&self) -> &dyn HtmlFetcher {
        self.fetcher.as_ref()
    }

    #[instrument(level = "info", skip(self, html))]
    fn extract_summaries(&self, html: &str, reference_date: NaiveDate) -> Vec<ArticleSummary> {
        let document = Html::parse_document(html);
        let section_selector = Selector::parse("div.blog-posts.clear").unwrap();
        let Some(section) = document.select(&section_selector).next() else {
            warn!(site = self.key(), "Blog-posts section not found in listing markup");
            return Vec::new();
        };

        let item_selector = Selector::parse("div.body-post.clear").unwrap();
        let link_selector = Selector::parse("a.story-link").unwrap();
        let title_selector = Selector::parse("h2.home-title").unwrap();
        let date_selector = Selector::parse("span.h-datetime").unwrap();
        let tags_selector = Selector::parse("span.h-tags").unwrap();

        let today = reference_date.format(DATE_FORMAT).to_string();

        let mut summaries = Vec::new();
        for item in section.select(&item_selector) {
            let href = item
                .select(&link_selector)
                .next()
                .and_then(|el| el.value().attr("href"));
            let title = item
                .select(&title_selector)
                .next()
                .map(|el| clean_text(&element_text(el)))
                .filter(|t| !t.is_empty());
            let date_text = item
                .select(&date_selector)
                .next()
                .map(|el| clean_text(&element_text(el)));

            let (Some(href), Some(title), Some(date_text)) = (href, title, date_text) else {
                debug!(site = self.key(), "Skipping listing item missing link, title, or date");
                continue;
            };

            // The site shows no calendar date in machine form; cleaned display
            // text is compared against today rendered the same way.
            if date_text != today {
                continue;
            }

            let Some(link) = resolve_link(&self.base_url, href) else {
                warn!(site = self.key(), href, "Unresolvable article link; skipping item");
                continue;
            };

            let tags = item
                .select(&tags_selector)
                .next()
                .map(|el| clean_text(&element_text(el)))
                .unwrap_or_default();

            summaries.push(ArticleSummary {
                title,
                date: date_text,
                link,
                author: None,
                tags,
                content: String::new(),
            });
        }

        info!(site = self.key(), count = summaries.len(), "Extracted listing summaries");
        summaries
    }

    #[instrument(level = "info", skip(self), fields(site = self.key()))]
    async fn fetch_article_body(&self, article_url: &str) -> Result<String, FetchError> {
        let html = self.fetch_listing_html(article_url).await?;
        let document = Html::parse_document(&html);
        let body_selector = Selector::parse("div#articlebody").unwrap();
        let Some(body) = document.select(&body_selector).next() else {
            warn!(site = self.key(), url = article_url, "Article body container not found");
            return Ok(String::new());
        };

        let paragraph_selector = Selector::parse("p").unwrap();
        let content = body
            .select(&paragraph_selector)
            .map(|paragraph| clean_text(&element_text(paragraph)))
            .filter(|fragment| !fragment.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Ok(content)
    }
}
