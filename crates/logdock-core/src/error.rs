//! Error types and result aliases for Logdock.
//!
//! This module defines the shared error types used across all Logdock
//! components. Errors are structured for programmatic handling: the one
//! recoverable condition (a named log stream that does not exist) is a
//! dedicated variant, and every other backend failure keeps its original
//! identity so the invoking platform can distinguish failure modes.

/// The result type used throughout Logdock.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Logdock store operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The named log stream does not exist.
    ///
    /// This is the only recoverable condition in the pipeline: callers may
    /// fall back to synthesized content when attempt data is available.
    /// Backends must return it solely for the stream-missing case, never for
    /// other not-found shapes such as a missing log group.
    #[error("log stream not found: {log_group}/{log_stream}")]
    StreamNotFound {
        /// The log group that was queried.
        log_group: String,
        /// The log stream that does not exist.
        log_stream: String,
    },

    /// A log store operation failed for any reason besides a missing stream.
    #[error("log store error: {message}")]
    LogStore {
        /// Description of the log store failure.
        message: String,
        /// The underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An object store operation failed, at either the write or the tag step.
    #[error("object store error: {message}")]
    ObjectStore {
        /// Description of the object store failure.
        message: String,
        /// The underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A serialization or deserialization error occurred.
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of the serialization failure.
        message: String,
    },

    /// An internal error occurred that should not happen in normal operation.
    #[error("internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl Error {
    /// Creates a new stream-not-found error for the given group and stream.
    #[must_use]
    pub fn stream_not_found(log_group: impl Into<String>, log_stream: impl Into<String>) -> Self {
        Self::StreamNotFound {
            log_group: log_group.into(),
            log_stream: log_stream.into(),
        }
    }

    /// Creates a new log store error with the given message.
    #[must_use]
    pub fn log_store(message: impl Into<String>) -> Self {
        Self::LogStore {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new log store error with a source cause.
    #[must_use]
    pub fn log_store_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::LogStore {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new object store error with the given message.
    #[must_use]
    pub fn object_store(message: impl Into<String>) -> Self {
        Self::ObjectStore {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new object store error with a source cause.
    #[must_use]
    pub fn object_store_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ObjectStore {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns true when this error is the recoverable stream-missing marker.
    #[must_use]
    pub const fn is_stream_not_found(&self) -> bool {
        matches!(self, Self::StreamNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn stream_not_found_display_names_group_and_stream() {
        let err = Error::stream_not_found("myLogGroup", "myLogStream");
        assert_eq!(
            err.to_string(),
            "log stream not found: myLogGroup/myLogStream"
        );
        assert!(err.is_stream_not_found());
    }

    #[test]
    fn log_store_error_is_not_recoverable() {
        let err = Error::log_store("rate exceeded");
        assert!(err.to_string().contains("log store error"));
        assert!(!err.is_stream_not_found());
    }

    #[test]
    fn object_store_error_with_source() {
        let source = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset");
        let err = Error::object_store_with_source("failed to write object", source);
        assert!(err.to_string().contains("object store error"));
        assert!(StdError::source(&err).is_some());
    }
}
