//! Error handling for the sift-common crate.

use thiserror::Error;

/// Error type shared by every stage of a cleaning job.
///
/// Each variant carries a human-readable message and an optional underlying
/// error for chaining. All variants are fatal within a single job run; the
/// only recovery mechanism is an orchestrator-level re-run of the whole job.
#[derive(Error, Debug)]
pub enum SiftError {
    #[error("Source not found: {message}")]
    SourceNotFound {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    #[error("Source not readable: {message}")]
    SourceAccess {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    #[error("Destination not writable: {message}")]
    DestinationUnwritable {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    #[error("Invalid configuration: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    #[error("Storage operation failed: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },
}

/// Result type alias for sift operations.
pub type Result<T> = std::result::Result<T, SiftError>;

impl SiftError {
    /// Create a source-not-found error with a custom message.
    pub fn source_not_found<S: Into<String>>(message: S) -> Self {
        Self::SourceNotFound {
            message: message.into(),
            source: None,
        }
    }

    /// Create a source-not-found error with a custom message and source error.
    pub fn source_not_found_with_source<S: Into<String>, E: Into<anyhow::Error>>(
        message: S,
        source: E,
    ) -> Self {
        Self::SourceNotFound {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a source-access error with a custom message.
    pub fn source_access<S: Into<String>>(message: S) -> Self {
        Self::SourceAccess {
            message: message.into(),
            source: None,
        }
    }

    /// Create a source-access error with a custom message and source error.
    pub fn source_access_with_source<S: Into<String>, E: Into<anyhow::Error>>(
        message: S,
        source: E,
    ) -> Self {
        Self::SourceAccess {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a destination-unwritable error with a custom message.
    pub fn destination_unwritable<S: Into<String>>(message: S) -> Self {
        Self::DestinationUnwritable {
            message: message.into(),
            source: None,
        }
    }

    /// Create a destination-unwritable error with a custom message and source error.
    pub fn destination_unwritable_with_source<S: Into<String>, E: Into<anyhow::Error>>(
        message: S,
        source: E,
    ) -> Self {
        Self::DestinationUnwritable {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a configuration error with a custom message.
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with a custom message and source error.
    pub fn configuration_with_source<S: Into<String>, E: Into<anyhow::Error>>(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a storage error with a custom message.
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage {
            message: message.into(),
            source: None,
        }
    }

    /// Create a storage error with a custom message and source error.
    pub fn storage_with_source<S: Into<String>, E: Into<anyhow::Error>>(
        message: S,
        source: E,
    ) -> Self {
        Self::Storage {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create an internal error with a custom message.
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Create an internal error with a custom message and source error.
    pub fn internal_with_source<S: Into<String>, E: Into<anyhow::Error>>(
        message: S,
        source: E,
    ) -> Self {
        Self::Internal {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Whether re-running the whole job is a plausible remedy.
    ///
    /// Nothing is retried inside a job; this is a hint for the invoking
    /// orchestrator. A re-run is always idempotent because the sink writes in
    /// overwrite mode and the filter is pure.
    pub fn retryable(&self) -> bool {
        match self {
            SiftError::SourceNotFound { .. } => false,
            SiftError::SourceAccess { .. } => true,
            SiftError::DestinationUnwritable { .. } => true,
            SiftError::Configuration { .. } => false,
            SiftError::Storage { .. } => true,
            SiftError::Internal { .. } => false,
        }
    }
}
