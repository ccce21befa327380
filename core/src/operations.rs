//! Row-level dataset transformations.
//!
//! The pipeline performs exactly one transformation: null-row elimination.
//! It is built from Arrow compute kernels and never mutates its input.

use arrow::array::BooleanArray;
use arrow::compute::{and, filter_record_batch, is_not_null};
use arrow::record_batch::RecordBatch;
use sift_common::error::{Result, SiftError};

use crate::dataset::Dataset;

/// Return a new dataset holding exactly the rows of `dataset` in which every
/// column value is present.
///
/// Row order among retained rows and the schema are preserved. An input where
/// every row has at least one absent value yields an empty dataset, not an
/// error. The function is pure; it cannot fail on a well-formed dataset.
pub fn drop_incomplete_rows(dataset: &Dataset) -> Result<Dataset> {
    let mut kept = Vec::with_capacity(dataset.batches().len());
    for batch in dataset.batches() {
        let filtered = retain_complete(batch)?;
        if filtered.num_rows() > 0 {
            kept.push(filtered);
        }
    }
    Ok(Dataset::new_unchecked(dataset.schema(), kept))
}

/// Filter one batch down to its fully-populated rows.
fn retain_complete(batch: &RecordBatch) -> Result<RecordBatch> {
    // With zero columns no row can have an absent value.
    if batch.num_columns() == 0 {
        return Ok(batch.clone());
    }

    let mut mask: BooleanArray = is_not_null(batch.column(0)).map_err(kernel_error)?;
    for column in batch.columns().iter().skip(1) {
        let present = is_not_null(column).map_err(kernel_error)?;
        mask = and(&mask, &present).map_err(kernel_error)?;
    }

    filter_record_batch(batch, &mask).map_err(kernel_error)
}

fn kernel_error(e: arrow::error::ArrowError) -> SiftError {
    SiftError::internal_with_source("null-row filter kernel failed", e)
}
