//! Local-directory sink.
//!
//! Writes the aggregated document as a JSON file, creating the output
//! directory on first use. Mainly for manual runs and development; the
//! scheduled deployment uses the object-storage sink.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tracing::{info, instrument};

use crate::errors::PersistError;
use crate::models::AggregatedDocument;
use crate::outputs::{DocumentSink, to_pretty_json};

pub struct FileSink {
    output_dir: PathBuf,
}

impl FileSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

#[async_trait]
impl DocumentSink for FileSink {
    #[instrument(level = "info", skip(self, document), fields(dir = %self.output_dir.display()))]
    async fn persist(
        &self,
        document: &AggregatedDocument,
        name: &str,
    ) -> Result<(), PersistError> {
        let body = to_pretty_json(document)?;

        fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| PersistError::Io {
                path: self.output_dir.display().to_string(),
                source,
            })?;

        let path = self.output_dir.join(name);
        fs::write(&path, body)
            .await
            .map_err(|source| PersistError::Io {
                path: path.display().to_string(),
                source,
            })?;

        info!(path = %path.display(), "Wrote aggregated document");
        Ok(())
    }
}
