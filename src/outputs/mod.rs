//! Persistence sinks for the aggregated document.
//!
//! - [`blob`]: object storage (the scheduled deployment)
//! - [`json`]: local directory (the standalone-script variant)
//!
//! Both write the same artifact: indented, human-readable JSON with
//! non-ASCII characters preserved literally, overwriting any previous object
//! of the same name.

use async_trait::async_trait;
use serde::Serialize;

use crate::errors::PersistError;
use crate::models::AggregatedDocument;

pub mod blob;
pub mod json;

pub use blob::BlobSink;
pub use json::FileSink;

/// Destination for the run's aggregated document.
#[async_trait]
pub trait DocumentSink: Send + Sync {
    /// Persist `document` under `name`, creating the destination
    /// container/directory if needed and overwriting an existing object.
    async fn persist(
        &self,
        document: &AggregatedDocument,
        name: &str,
    ) -> Result<(), PersistError>;
}

/// Serialize to JSON with 4-space indentation.
///
/// serde_json never escapes non-ASCII characters, so the artifact keeps them
/// literal.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>, PersistError> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}
