use tracing::debug;

use super::{endpoint, expect_no_content, ClientConfig, ReadOnlyClient};
use crate::models::{DataPoints, QueryRequest};
use crate::Result;

/// Read-write client: a [`ReadOnlyClient`] plus the mutating operations.
/// Both halves share one connection pool. Consumers that only read should
/// hold a `ReadOnlyClient` instead.
#[derive(Debug, Clone)]
pub struct Client {
    reader: ReadOnlyClient,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(ClientConfig::new(base_url))
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let http = config.build_http()?;
        let base_url = config.parse_base()?;
        Ok(Client {
            reader: ReadOnlyClient::from_parts(http, base_url),
        })
    }

    /// The read-only half of this client.
    pub fn reader(&self) -> &ReadOnlyClient {
        &self.reader
    }

    /// Writes a batch of datapoints. Success is exactly HTTP 204.
    pub async fn write(&self, batch: &[DataPoints]) -> Result<()> {
        let url = endpoint(&self.reader.base_url, &["datapoints"])?;
        debug!(%url, records = batch.len(), "writing datapoints");
        let response = self.reader.http.post(url).json(&batch).send().await?;
        expect_no_content(response).await
    }

    /// Deletes the datapoints matched by a query request.
    pub async fn delete(&self, request: &QueryRequest) -> Result<()> {
        let url = endpoint(&self.reader.base_url, &["datapoints", "delete"])?;
        debug!(%url, metrics = request.metrics.len(), "deleting datapoints");
        let response = self.reader.http.post(url).json(request).send().await?;
        expect_no_content(response).await
    }

    /// Deletes a metric and everything stored under it.
    pub async fn delete_metric(&self, metric: &str) -> Result<()> {
        let url = endpoint(&self.reader.base_url, &["metric", metric])?;
        debug!(%url, metric, "deleting metric");
        let response = self.reader.http.delete(url).send().await?;
        expect_no_content(response).await
    }
}
