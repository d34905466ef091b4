//! Object-storage sink.
//!
//! Writes the aggregated document into an S3 bucket. Credentials are read
//! from the default AWS configuration chain (environment, profile, instance
//! role) and never pass through this crate's configuration surface.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::{Client, primitives::ByteStream};
use tracing::{info, instrument};

use crate::errors::PersistError;
use crate::models::AggregatedDocument;
use crate::outputs::{DocumentSink, to_pretty_json};

pub struct BlobSink {
    client: Client,
    bucket: String,
}

impl BlobSink {
    /// Sink over the default AWS configuration chain.
    pub async fn new(bucket: String) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest()).load().await;
        let client = Client::new(&config);
        info!(%bucket, "Object storage sink initialized");
        Self { client, bucket }
    }

    /// Create the bucket when it does not exist yet.
    ///
    /// A failed existence probe falls through to creation; if the probe
    /// failed for a real reason (auth, connectivity) the create call surfaces
    /// it as the run's [`PersistError`].
    async fn ensure_bucket(&self) -> Result<(), PersistError> {
        if self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok()
        {
            return Ok(());
        }

        info!(bucket = %self.bucket, "Bucket not found; creating it");
        self.client
            .create_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| PersistError::Storage {
                name: self.bucket.clone(),
                message: e.to_string(),
            })?;
        Ok(())
    }
}

#[async_trait]
impl DocumentSink for BlobSink {
    #[instrument(level = "info", skip(self, document), fields(bucket = %self.bucket))]
    async fn persist(
        &self,
        document: &AggregatedDocument,
        name: &str,
    ) -> Result<(), PersistError> {
        let body = to_pretty_json(document)?;
        self.ensure_bucket().await?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(name)
            .body(ByteStream::from(body))
            .content_type("application/json")
            .send()
            .await
            .map_err(|e| PersistError::Storage {
                name: name.to_string(),
                message: e.to_string(),
            })?;

        info!(bucket = %self.bucket, object = name, "Persisted aggregated document");
        Ok(())
    }
}
