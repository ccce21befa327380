//! The cleaning pipeline: read, filter, write, commit.

use sift_common::error::Result;
use sift_common::storage::BlobStoreBuilder;
use std::sync::Arc;
use tracing::info;

use crate::catalog::{Catalog, ManifestCatalog};
use crate::config::{JobConfig, SourceRef};
use crate::context::{JobContext, JobSummary};
use crate::operations::drop_incomplete_rows;
use crate::sink::{CsvSink, Sink};

/// A single-pass cleaning job over one cataloged table.
///
/// Catalog and sink are polymorphic capabilities: any implementations
/// satisfying their contracts can back the pipeline, so storage and metadata
/// backends swap freely.
pub struct CleanJob {
    catalog: Arc<dyn Catalog>,
    sink: Arc<dyn Sink>,
}

impl CleanJob {
    pub fn new(catalog: Arc<dyn Catalog>, sink: Arc<dyn Sink>) -> Self {
        Self { catalog, sink }
    }

    /// Run the pipeline to completion: lookup, filter, write, commit.
    ///
    /// Stages execute strictly in sequence with no retries; the first error
    /// aborts the run and the context is dropped uncommitted.
    pub async fn run(
        &self,
        mut ctx: JobContext,
        source: &SourceRef,
        destination: &str,
    ) -> Result<JobSummary> {
        let dataset = self
            .catalog
            .lookup(ctx.session(), &source.database, &source.table)
            .await?;
        ctx.record_read(dataset.num_rows() as u64);
        info!(
            database = %source.database,
            table = %source.table,
            rows = dataset.num_rows(),
            "source table materialized"
        );

        let cleaned = drop_incomplete_rows(&dataset)?;
        ctx.record_kept(cleaned.num_rows() as u64);
        info!(
            rows_kept = cleaned.num_rows(),
            rows_dropped = dataset.num_rows() - cleaned.num_rows(),
            "incomplete rows removed"
        );

        let bytes = self.sink.write(&cleaned, destination).await?;
        ctx.record_write(bytes, destination);

        Ok(ctx.commit())
    }
}

/// Run the cleaning job described by `config` under the given job name.
pub async fn run_with_config(job_name: &str, config: &JobConfig) -> Result<JobSummary> {
    let ctx = JobContext::init(job_name);

    let catalog = ManifestCatalog::from_file(&config.catalog)?;
    let store = BlobStoreBuilder::new()
        .backend(config.storage.clone())
        .build()?;
    let sink = CsvSink::new(store);

    CleanJob::new(Arc::new(catalog), Arc::new(sink))
        .run(ctx, &config.source, &config.destination)
        .await
}
