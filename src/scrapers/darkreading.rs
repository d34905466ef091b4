//! Dark Reading scraper.
//!
//! The homepage's "Latest News" column carries a preview block per article
//! with title, date, byline, and keyword labels. Dates are displayed as
//! `Mar 01, 2024` and are calendar-parsed before being compared against the
//! reference date. Article links are root-relative and resolved against the
//! site base URL.

use async_trait::async_trait;
use chrono::NaiveDate;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::errors::FetchError;
use crate::fetch::{HtmlFetcher, PlainFetcher};
use crate::models::ArticleSummary;
use crate::scrapers::{element_text, resolve_link, SiteScraper};

const DATE_FORMAT: &str = "%b %d, %Y";

pub struct DarkReadingScraper {
    base_url: Url,
    fetcher: Box<dyn HtmlFetcher>,
}

impl DarkReadingScraper {
    /// Scraper over the default plain HTTP client; the site does not
    /// challenge non-browser clients.
    pub fn new(base_url: Url) -> Self {
        Self::with_fetcher(base_url, Box::new(PlainFetcher::new()))
    }

    /// Scraper over an injected fetcher.
    pub fn with_fetcher(base_url: Url, fetcher: Box<dyn HtmlFetcher>) -> Self {
        Self { base_url, fetcher }
    }
}

#[async_trait]
impl SiteScraper for DarkReadingScraper {
    fn key(&self) -> &'static str {
        "darkreading"
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
        let section_selector = Selector::parse(
            r#"div.LatestFeatured-ColumnList.LatestFeatured-ColumnList_left[data-testid="list-content"]"#,
        )
        .unwrap();
        let Some(section) = document.select(&section_selector).next() else {
            warn!(site = self.key(), "Latest-news section not found in listing markup");
            return Vec::new();
        };

        let item_selector = Selector::parse(
            "div.ContentPreview.LatestFeatured-ContentItem.LatestFeatured-ContentItem_left",
        )
        .unwrap();
        let title_selector =
            Selector::parse(r#"a.ListPreview-Title[data-testid="preview-default-title"]"#).unwrap();
        let date_selector =
            Selector::parse(r#"span.ListPreview-Date[data-testid="list-preview-date"]"#).unwrap();
        let link_selector = Selector::parse("a.ListPreview-Title").unwrap();
        let author_selector =
            Selector::parse(r#"a.Contributors-ContributorName[data-testid="contributor-name"]"#)
                .unwrap();
        let tags_wrapper_selector = Selector::parse("div.ListPreview-KeywordWrapper").unwrap();
        let keyword_selector = Selector::parse("a.Keyword").unwrap();

        let mut summaries = Vec::new();
        for item in section.select(&item_selector) {
            let title = item
                .select(&title_selector)
                .next()
                .map(element_text)
                .filter(|t| !t.is_empty());
            let date_text = item.select(&date_selector).next().map(element_text);
            let href = item
                .select(&link_selector)
                .next()
                .and_then(|el| el.value().attr("href"));

            let (Some(title), Some(date_text), Some(href)) = (title, date_text, href) else {
                debug!(site = self.key(), "Skipping listing item missing title, date, or link");
                continue;
            };

            let article_date = match NaiveDate::parse_from_str(&date_text, DATE_FORMAT) {
                Ok(date) => date,
                Err(error) => {
                    warn!(site = self.key(), date = %date_text, %error, "Unparsable listing date; skipping item");
                    continue;
                }
            };
            if article_date != reference_date {
                continue;
            }

            let Some(link) = resolve_link(&self.base_url, href) else {
                warn!(site = self.key(), href, "Unresolvable article link; skipping item");
                continue;
            };

            let author = item
                .select(&author_selector)
                .next()
                .map(element_text)
                .unwrap_or_else(|| "Unknown".to_string());
            let tags = item
                .select(&tags_wrapper_selector)
                .next()
                .map(|wrapper| {
                    wrapper
                        .select(&keyword_selector)
                        .map(element_text)
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default();

            summaries.push(ArticleSummary {
                title,
                date: date_text,
                link,
                author: Some(author),
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
        let content_selector = Selector::parse(
            r#"div.ArticleBase-BodyContent.ArticleBase-BodyContent_Article[data-testid="article-base-body-content"]"#,
        )
        .unwrap();
        let Some(section) = document.select(&content_selector).next() else {
            warn!(site = self.key(), url = article_url, "Article body container not found");
            return Ok(String::new());
        };

        let paragraph_selector = Selector::parse("p.ContentParagraph").unwrap();
        let body = section
            .select(&paragraph_selector)
            .map(|paragraph| element_text(paragraph).replace('"', ""))
            .filter(|fragment| !fragment.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Ok(body)
    }
}
