//! Error types for the log aggregation pipeline.
//!
//! No internal retries happen anywhere in the pipeline: every fatal
//! condition surfaces to the invoking platform verbatim, with its original
//! identity preserved, so downstream tooling can distinguish "stream
//! missing" from "store unreachable" from "malformed event".

/// The result type used throughout the pipeline.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while aggregating and publishing a job log.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The invocation payload violates the task-result contract.
    ///
    /// Covers a result that carries neither a top-level log stream name nor
    /// a decodable `Cause` document, and a `Cause` string that is not valid
    /// JSON. The decode failure, when there is one, is kept as the source.
    #[error("malformed task result payload: {message}")]
    MalformedPayload {
        /// Description of the contract violation.
        message: String,
        /// The decode failure that triggered this, if any.
        #[source]
        source: Option<serde_json::Error>,
    },

    /// The fallback path was invoked with no usable diagnostic data.
    #[error("task result carries no attempts to aggregate")]
    EmptyAttempts,

    /// Required runtime configuration is missing or invalid.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// An error from a store client, carried unchanged.
    #[error(transparent)]
    Core(#[from] logdock_core::Error),
}

impl Error {
    /// Creates a new malformed-payload error with the given message.
    #[must_use]
    pub fn malformed_payload(message: impl Into<String>) -> Self {
        Self::MalformedPayload {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new malformed-payload error caused by a JSON decode failure.
    #[must_use]
    pub fn malformed_payload_with_source(
        message: impl Into<String>,
        source: serde_json::Error,
    ) -> Self {
        Self::MalformedPayload {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Creates a new configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns true when this error is the recoverable stream-missing marker.
    #[must_use]
    pub const fn is_stream_not_found(&self) -> bool {
        matches!(
            self,
            Self::Core(logdock_core::Error::StreamNotFound { .. })
        )
    }
}
