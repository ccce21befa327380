//! Sift Core - batch cleaning pipeline for cataloged tables
//!
//! This crate implements a single-pass extract-transform-load job: resolve a
//! table through a catalog, drop every row with an absent column value, and
//! publish the result as comma-delimited text in overwrite mode.

pub mod catalog;
pub mod config;
pub mod context;
pub mod dataset;
pub mod job;
pub mod operations;
pub mod sink;

pub use catalog::{Catalog, ManifestCatalog, TableEntry, TableFormat};
pub use config::{JobConfig, SourceRef};
pub use context::{JobContext, JobSummary};
pub use dataset::Dataset;
pub use job::{CleanJob, run_with_config};
pub use operations::drop_incomplete_rows;
pub use sink::{CsvSink, Sink};
