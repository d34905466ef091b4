//! Error types for fetching, scraper construction, and persistence.
//!
//! Parse-level problems (missing elements, unparsable dates) are deliberately
//! not represented here: malformed listing entries are an expected condition
//! and are skipped with a log line instead of failing the run.

use thiserror::Error;

/// A page could not be retrieved over HTTP.
///
/// Callers treat this as "no articles available this run" for the affected
/// site or article; it never aborts the whole run.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request failed before a response arrived (DNS, connect, timeout).
    #[error("request to {url} failed: {source}")]
    Transport {
        /// The URL that was being fetched.
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status code.
    #[error("{url} returned status {status}")]
    Status {
        /// The URL that was being fetched.
        url: String,
        /// The HTTP status code.
        status: reqwest::StatusCode,
    },
}

/// The scraper factory was given an identifier outside the known set.
///
/// This is a programming or configuration error and is fatal for the run.
#[derive(Debug, Error)]
#[error("unsupported site: {0}")]
pub struct UnsupportedSiteError(pub String);

/// The aggregated document could not be written to its destination.
///
/// The one failure in a run that propagates to the caller; there is nothing
/// further to isolate it from.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The document could not be serialized to JSON.
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The object store rejected the write (auth, connectivity, bucket).
    #[error("storage write of {name} failed: {message}")]
    Storage {
        /// Object name being written.
        name: String,
        /// Underlying storage error rendered as text.
        message: String,
    },

    /// A local filesystem write failed.
    #[error("failed writing {path}: {source}")]
    Io {
        /// Path being written.
        path: String,
        #[source]
        source: std::io::Error,
    },
}
