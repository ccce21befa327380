//! Common utilities and abstractions for the Sift project.
//!
//! This module provides the shared error taxonomy and the trait-based
//! blob-storage abstraction used by the cleaning pipeline.

pub mod error;
pub mod storage;

pub use error::{Result, SiftError};
pub use storage::{BlobStore, BlobStoreBuilder, StorageBackend};
