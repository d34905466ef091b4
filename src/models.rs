//! Data models for scraped articles and the per-run aggregate.
//!
//! Two types cross module boundaries:
//! - [`ArticleSummary`]: one discovered listing entry, enriched with the full
//!   article body in a second pass
//! - [`AggregatedDocument`]: the run's site-keyed collection, serialized once
//!   and handed to a sink

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// One article discovered on a site's listing page.
///
/// `content` is empty at extraction time and populated when the article page
/// is fetched. `author` is only present for sites that expose a byline
/// (Dark Reading); it is omitted from the JSON output entirely when `None`,
/// so The Hacker News entries carry no `author` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleSummary {
    /// Headline text, trimmed.
    pub title: String,
    /// The displayed publication date, as shown on the listing page.
    pub date: String,
    /// Absolute URL of the article page.
    pub link: String,
    /// Byline, defaulting to `"Unknown"` when the site shows none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Comma-joined keyword labels, empty when the entry has none.
    pub tags: String,
    /// Full article text, filled in by the body-fetch pass.
    pub content: String,
}

/// The aggregated result of one run: site key to its ordered articles.
///
/// Insertion order is preserved through serialization, so the persisted JSON
/// object lists sites in the order the aggregator processed them. A document
/// is built fresh each run and discarded after persistence.
#[derive(Debug, Default)]
pub struct AggregatedDocument {
    entries: Vec<(String, Vec<ArticleSummary>)>,
}

impl AggregatedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a site's article sequence under its key.
    pub fn insert(&mut self, site: impl Into<String>, articles: Vec<ArticleSummary>) {
        self.entries.push((site.into(), articles));
    }

    /// Articles recorded for `site`, if the site was processed.
    pub fn get(&self, site: &str) -> Option<&[ArticleSummary]> {
        self.entries
            .iter()
            .find(|(key, _)| key == site)
            .map(|(_, articles)| articles.as_slice())
    }

    /// Site keys in insertion order.
    pub fn sites(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Total number of articles across all sites.
    pub fn article_count(&self) -> usize {
        self.entries.iter().map(|(_, articles)| articles.len()).sum()
    }
}

impl Serialize for AggregatedDocument {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (site, articles) in &self.entries {
            map.serialize_entry(site, articles)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(title: &str) -> ArticleSummary {
        ArticleSummary {
            title: title.to_string(),
            date: "Mar 01, 2024".to_string(),
            link: "https://example.com/a".to_string(),
            author: None,
            tags: String::new(),
            content: String::new(),
        }
    }

    #[test]
    fn test_author_omitted_when_absent() {
        let json = serde_json::to_string(&summary("X")).unwrap();
        assert!(!json.contains("author"));
    }

    #[test]
    fn test_author_serialized_when_present() {
        let mut s = summary("X");
        s.author = Some("Unknown".to_string());
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains(r#""author":"Unknown""#));
    }

    #[test]
    fn test_field_order() {
        let mut s = summary("X");
        s.author = Some("Jai Vijayan".to_string());
        let json = serde_json::to_string(&s).unwrap();
        let positions: Vec<usize> = ["title", "date", "link", "author", "tags", "content"]
            .iter()
            .map(|field| json.find(&format!("\"{field}\"")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_document_preserves_insertion_order() {
        let mut document = AggregatedDocument::new();
        document.insert("thehackernews", vec![summary("A")]);
        document.insert("darkreading", vec![]);

        let json = serde_json::to_string(&document).unwrap();
        let hn = json.find("thehackernews").unwrap();
        let dr = json.find("darkreading").unwrap();
        assert!(hn < dr);

        let sites: Vec<&str> = document.sites().collect();
        assert_eq!(sites, vec!["thehackernews", "darkreading"]);
    }

    #[test]
    fn test_document_lookup_and_count() {
        let mut document = AggregatedDocument::new();
        document.insert("thehackernews", vec![summary("A"), summary("B")]);
        document.insert("darkreading", vec![]);

        assert_eq!(document.get("thehackernews").unwrap().len(), 2);
        assert_eq!(document.get("darkreading").unwrap().len(), 0);
        assert!(document.get("other").is_none());
        assert_eq!(document.article_count(), 2);
    }

    #[test]
    fn test_summary_round_trip() {
        let json = r#"{
            "title": "X",
            "date": "Mar 01, 2024",
            "link": "https://example.com/a",
            "tags": "Threat Intelligence",
            "content": ""
        }"#;
        let s: ArticleSummary = serde_json::from_str(json).unwrap();
        assert_eq!(s.title, "X");
        assert!(s.author.is_none());
        assert_eq!(s.tags, "Threat Intelligence");
    }
}
