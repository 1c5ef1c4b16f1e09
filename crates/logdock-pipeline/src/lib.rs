//! # logdock-pipeline
//!
//! Log aggregation and publish pipeline for batch-processing jobs.
//!
//! One invocation turns a finished job's execution log into a single
//! durable artifact, whatever happened to the job's underlying task:
//!
//! - **Succeeded, or failed after starting**: the task's log stream is
//!   fetched page by page and its messages joined in chronological order
//! - **Failed before any stream existed**: the per-attempt failure reasons
//!   reported by the workflow engine stand in for the log body
//!
//! Either way the content is written to the object store at a key fully
//! determined by the job id, so republication overwrites rather than
//! duplicates.
//!
//! ## Guarantees
//!
//! - **Exactly one publish** on any successful path
//! - **No internal retries**: every fatal error surfaces to the invoking
//!   platform with its original identity intact
//! - **Stateless**: each invocation is independent; the written object is
//!   the only durable effect
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use logdock_core::prelude::*;
//! use logdock_pipeline::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> logdock_pipeline::error::Result<()> {
//! let log_store = Arc::new(MemoryLogStore::new());
//! log_store.insert_stream("jobs", "job-1-stream", vec![LogEvent::new(0, 0, "starting")]);
//!
//! let object_store = Arc::new(MemoryObjectStore::new());
//! let config = PipelineConfig {
//!     bucket: "job-logs".to_string(),
//! };
//!
//! let pipeline = LogPipeline::new(log_store, object_store.clone(), config);
//! let event = InvocationEvent {
//!     prefix: "job-1".to_string(),
//!     log_group: "jobs".to_string(),
//!     processing_results: ProcessingResults::for_stream("job-1-stream"),
//! };
//!
//! let published = pipeline.run(&event).await?;
//! assert_eq!(published.key.as_ref(), "job-1/job-1.log");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod attempts;
pub mod config;
pub mod error;
pub mod event;
pub mod fetch;
pub mod metrics;
pub mod pipeline;
pub mod publish;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::attempts::{content_from_attempts, processing_time_from_attempts};
    pub use crate::config::{log_format_from_env, PipelineConfig};
    pub use crate::error::{Error, Result};
    pub use crate::event::{
        Attempt, ContainerDetail, FailureCause, InvocationEvent, ProcessingResults,
    };
    pub use crate::fetch::fetch_log_content;
    pub use crate::metrics::PipelineMetrics;
    pub use crate::pipeline::{LogPipeline, LogSource, PublishedLog};
    pub use crate::publish::publish_log;
}

// Re-export key types at crate root for ergonomics
pub use config::PipelineConfig;
pub use error::{Error, Result};
pub use event::{Attempt, ContainerDetail, FailureCause, InvocationEvent, ProcessingResults};
pub use pipeline::{LogPipeline, LogSource, PublishedLog};
