//! In-memory tabular dataset.

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use sift_common::error::{Result, SiftError};

/// A materialized tabular dataset: an ordered sequence of rows with named,
/// typed columns.
///
/// Rows live in Arrow record batches; row order is batch order, then row
/// order within each batch. A column value is absent when its Arrow validity
/// bit is unset, which is distinct from any real value including the empty
/// string and zero. The schema is fixed at construction and immutable through
/// the pipeline.
#[derive(Debug, Clone)]
pub struct Dataset {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
}

impl Dataset {
    /// Create a dataset, verifying that every batch matches the schema.
    pub fn try_new(schema: SchemaRef, batches: Vec<RecordBatch>) -> Result<Self> {
        for batch in &batches {
            if batch.schema().fields() != schema.fields() {
                return Err(SiftError::internal(format!(
                    "record batch schema {:?} does not match dataset schema {:?}",
                    batch.schema().fields(),
                    schema.fields()
                )));
            }
        }
        Ok(Self { schema, batches })
    }

    /// Create a dataset from batches already known to share `schema`.
    pub(crate) fn new_unchecked(schema: SchemaRef, batches: Vec<RecordBatch>) -> Self {
        Self { schema, batches }
    }

    /// A dataset with the given schema and no rows.
    pub fn empty(schema: SchemaRef) -> Self {
        Self {
            schema,
            batches: Vec::new(),
        }
    }

    /// The dataset schema, inherited unchanged from the source table.
    pub fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    /// The underlying record batches, in row order.
    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    /// Total number of rows across all batches.
    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(|b| b.num_rows()).sum()
    }

    /// Number of columns in the schema.
    pub fn num_columns(&self) -> usize {
        self.schema.fields().len()
    }

    /// Whether the dataset holds no rows.
    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }
}
