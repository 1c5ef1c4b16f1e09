//! Pipeline orchestration.
//!
//! One invocation classifies the task result, fetches or synthesizes log
//! content, and publishes it, moving through
//! `Start → Classified → {Fetched | Aggregated} → Published | Failed`.
//! The fallback decision is an explicit branch on a typed error, not a
//! caught exception: aggregation is chosen iff the fetch failed with the
//! stream-missing marker *and* the payload's `Cause` decodes to a non-empty
//! attempt list. Every other combination re-raises the fetch error
//! unchanged.

use std::sync::Arc;

use tracing::{info, warn, Instrument};

use logdock_core::keys::LogKey;
use logdock_core::log_store::LogStore;
use logdock_core::object_store::ObjectStore;
use logdock_core::observability::pipeline_span;

use crate::attempts::content_from_attempts;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::event::InvocationEvent;
use crate::fetch::fetch_log_content;
use crate::metrics::PipelineMetrics;
use crate::publish::publish_log;

/// Where published content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSource {
    /// Content fetched from the task's log stream.
    Stream,
    /// Content synthesized from per-attempt failure reasons.
    FailedAttempts,
}

impl LogSource {
    /// Returns the stable label for this source.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stream => "stream",
            Self::FailedAttempts => "failed_attempts",
        }
    }
}

impl std::fmt::Display for LogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a successful invocation.
#[derive(Debug, Clone)]
pub struct PublishedLog {
    /// Key the artifact was written at.
    pub key: LogKey,
    /// Size of the published body in bytes.
    pub byte_size: u64,
    /// Where the content came from.
    pub source: LogSource,
}

/// The log aggregation pipeline.
///
/// Holds explicitly constructed client handles rather than module-level
/// singletons, so tests substitute in-memory stores without touching global
/// state. The pipeline itself is stateless across invocations; the only
/// durable effect of a run is the written object.
pub struct LogPipeline {
    log_store: Arc<dyn LogStore>,
    object_store: Arc<dyn ObjectStore>,
    config: PipelineConfig,
    metrics: PipelineMetrics,
}

impl LogPipeline {
    /// Creates a pipeline over the given client handles.
    #[must_use]
    pub fn new(
        log_store: Arc<dyn LogStore>,
        object_store: Arc<dyn ObjectStore>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            log_store,
            object_store,
            config,
            metrics: PipelineMetrics::new(),
        }
    }

    /// Aggregates and publishes the log for one finished job.
    ///
    /// # Errors
    ///
    /// Propagates every fatal condition verbatim: [`crate::Error::MalformedPayload`]
    /// for contract violations, the original stream-missing error when no
    /// usable attempt data exists, and any other store failure unchanged.
    /// Nothing is retried here; invocation-level retry belongs to the
    /// platform.
    pub async fn run(&self, event: &InvocationEvent) -> Result<PublishedLog> {
        let span = pipeline_span("aggregate_log", &event.prefix, &event.log_group);
        self.run_inner(event).instrument(span).await
    }

    async fn run_inner(&self, event: &InvocationEvent) -> Result<PublishedLog> {
        let log_stream = event
            .processing_results
            .log_stream()
            .inspect_err(|_| self.metrics.record_failure("classify"))?;

        info!(log_stream = %log_stream, "fetching task log");

        let (content, source) = match fetch_log_content(
            self.log_store.as_ref(),
            &event.log_group,
            &log_stream,
        )
        .await
        {
            Ok(content) => (content, LogSource::Stream),
            Err(err) if err.is_stream_not_found() => {
                let attempts = event.processing_results.failed_attempts();
                if attempts.is_empty() {
                    // No usable diagnostics: the original error stands.
                    self.metrics.record_failure("fetch");
                    return Err(err);
                }

                warn!(
                    log_stream = %log_stream,
                    attempts = attempts.len(),
                    "log stream missing, aggregating attempt failure reasons"
                );
                self.metrics.record_fallback();

                let content = content_from_attempts(&attempts)
                    .inspect_err(|_| self.metrics.record_failure("aggregate"))?;
                (content, LogSource::FailedAttempts)
            }
            Err(err) => {
                self.metrics.record_failure("fetch");
                return Err(err);
            }
        };

        let key = publish_log(
            self.object_store.as_ref(),
            &self.config.bucket,
            &event.prefix,
            &content,
        )
        .await
        .inspect_err(|_| self.metrics.record_failure("publish"))?;

        let byte_size = content.len() as u64;
        info!(key = %key, byte_size, source = %source, "published job log");
        self.metrics.record_published(source.as_str());

        Ok(PublishedLog {
            key,
            byte_size,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_source_labels_are_stable() {
        assert_eq!(LogSource::Stream.as_str(), "stream");
        assert_eq!(LogSource::FailedAttempts.to_string(), "failed_attempts");
    }
}
