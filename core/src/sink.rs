//! Dataset sinks.
//!
//! A sink serializes a dataset and durably publishes it at a destination,
//! replacing whatever was there before. Publishing goes through a single
//! whole-object `put`, so a successful write is atomic and a failed run never
//! leaves a partially-replaced artifact behind.

use arrow::csv::WriterBuilder;
use arrow::record_batch::RecordBatch;
use async_trait::async_trait;
use sift_common::error::{Result, SiftError};
use sift_common::storage::BlobStore;
use std::sync::Arc;
use tracing::debug;

use crate::dataset::Dataset;

/// Destination writer for cleaned datasets.
#[async_trait]
pub trait Sink: Send + Sync {
    /// Serialize `dataset` and replace the object at `destination`.
    ///
    /// Returns the number of bytes written.
    async fn write(&self, dataset: &Dataset, destination: &str) -> Result<u64>;
}

/// Comma-delimited text sink with a header line.
///
/// The header lists column names in schema order; each data line carries the
/// column values of one row in the same order. Values containing the
/// delimiter, quotes, or newlines are quoted RFC-4180 style.
pub struct CsvSink {
    store: Arc<dyn BlobStore>,
}

impl CsvSink {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Sink for CsvSink {
    async fn write(&self, dataset: &Dataset, destination: &str) -> Result<u64> {
        let buf = render_csv(dataset)?;
        self.store.put(destination, &buf).await.map_err(|e| {
            SiftError::destination_unwritable_with_source(
                format!("Failed to publish output at '{}'", destination),
                e,
            )
        })?;
        debug!(destination, bytes = buf.len(), "output artifact published");
        Ok(buf.len() as u64)
    }
}

/// Serialize a dataset as comma-delimited text with a header line.
fn render_csv(dataset: &Dataset) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut writer = WriterBuilder::new().with_header(true).build(&mut buf);

    // The writer emits the header with the first batch, so a dataset whose
    // every row was dropped still needs one empty batch to produce a valid
    // header-only artifact.
    if dataset.batches().is_empty() {
        let empty = RecordBatch::new_empty(dataset.schema());
        writer.write(&empty).map_err(serialize_error)?;
    }
    for batch in dataset.batches() {
        writer.write(batch).map_err(serialize_error)?;
    }

    drop(writer);
    Ok(buf)
}

fn serialize_error(e: arrow::error::ArrowError) -> SiftError {
    SiftError::internal_with_source("CSV serialization failed", e)
}
