//! # logdock-core
//!
//! Core abstractions for the Logdock job-log aggregation pipeline.
//!
//! This crate provides the foundational types and traits used by the
//! pipeline crate:
//!
//! - **Client Traits**: Abstract log-store and object-store interfaces,
//!   substitutable with in-memory backends for testing
//! - **Typed Keys**: Deterministic object keys for published artifacts
//! - **Error Types**: Shared error definitions and result types
//! - **Page Tokens**: Opaque pagination token helpers for listing endpoints
//! - **Observability**: Structured logging bootstrap and span constructors
//!
//! ## Crate Boundary
//!
//! `logdock-core` is the **only** crate allowed to define shared primitives.
//! The pipeline crate composes these contracts; backend adapters for real
//! cloud services implement them out of tree.
//!
//! ## Example
//!
//! ```rust
//! use logdock_core::prelude::*;
//!
//! // Object keys are fully determined by the job id.
//! let key = LogKey::for_job("job-42");
//! assert_eq!(key.as_ref(), "job-42/job-42.log");
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod log_store;
pub mod object_store;
pub mod observability;
pub mod page_token;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use logdock_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::keys::{LogKey, StorageKey, FILE_TYPE_LOG, FILE_TYPE_TAG_KEY, LOG_CONTENT_TYPE};
    pub use crate::log_store::{LogEvent, LogEventsPage, LogStore, MemoryLogStore};
    pub use crate::object_store::{MemoryObjectStore, ObjectStore, ObjectTag, StoredObject};
    pub use crate::observability::{init_logging, pipeline_span, LogFormat};
    pub use crate::page_token::PageTokenError;
}

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result};
pub use keys::{LogKey, StorageKey, FILE_TYPE_LOG, FILE_TYPE_TAG_KEY, LOG_CONTENT_TYPE};
pub use log_store::{LogEvent, LogEventsPage, LogStore, MemoryLogStore};
pub use object_store::{MemoryObjectStore, ObjectStore, ObjectTag, StoredObject};
pub use observability::{init_logging, pipeline_span, LogFormat};
pub use page_token::PageTokenError;
