//! HTTP fetchers behind a common capability.
//!
//! Dark Reading serves naive clients fine, so it gets a [`PlainFetcher`].
//! The Hacker News sits behind an anti-bot interstitial that rejects clients
//! without a browser identity; [`ChallengeFetcher`] carries a persistent
//! cookie jar and desktop-browser headers so the challenge passes it through.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::errors::FetchError;
use crate::utils::truncate_for_log;

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Retrieves raw page markup for a URL.
#[async_trait]
pub trait HtmlFetcher: Send + Sync {
    /// Issue a GET and return the response body as text.
    ///
    /// Transport failures and non-2xx statuses both surface as
    /// [`FetchError`]; callers degrade to "no content this run".
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError>;
}

async fn get_text(client: &reqwest::Client, url: &str) -> Result<String, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    let body = response
        .text()
        .await
        .map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;
    debug!(url, bytes = body.len(), preview = %truncate_for_log(&body, 120), "Fetched page");
    Ok(body)
}

/// Plain HTTP client for sites that do not challenge scrapers.
pub struct PlainFetcher {
    client: reqwest::Client,
}

impl PlainFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(FETCH_TIMEOUT)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }
}

impl Default for PlainFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HtmlFetcher for PlainFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        get_text(&self.client, url).await
    }
}

/// Challenge-bypass-capable client: browser identity plus a cookie jar, so
/// clearance cookies issued after an interstitial are replayed on later
/// requests within the run.
pub struct ChallengeFetcher {
    client: reqwest::Client,
}

impl ChallengeFetcher {
    pub fn new() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        Self {
            client: reqwest::Client::builder()
                .timeout(FETCH_TIMEOUT)
                .cookie_store(true)
                .user_agent(BROWSER_USER_AGENT)
                .default_headers(headers)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }
}

impl Default for ChallengeFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HtmlFetcher for ChallengeFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        get_text(&self.client, url).await
    }
}

/// Canned URL-to-markup fetcher for tests.
#[cfg(test)]
pub(crate) struct StaticFetcher {
    pages: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl StaticFetcher {
    pub(crate) fn new() -> Self {
        Self {
            pages: std::collections::HashMap::new(),
        }
    }

    pub(crate) fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }
}

#[cfg(test)]
#[async_trait]
impl HtmlFetcher for StaticFetcher {
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: reqwest::StatusCode::NOT_FOUND,
            })
    }
}
