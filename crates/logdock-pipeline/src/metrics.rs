//! Observability metrics for the pipeline.
//!
//! Metrics are exposed via the `metrics` crate facade; the embedding
//! platform installs a recorder of its choosing.
//!
//! ## Metrics Exported
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `logdock_published_logs_total` | Counter | `source` | Logs published, by content source |
//! | `logdock_attempt_fallbacks_total` | Counter | - | Invocations that aggregated attempt reasons |
//! | `logdock_pipeline_failures_total` | Counter | `stage` | Failed invocations, by pipeline stage |

use metrics::counter;

/// Metric names as constants for consistency.
pub mod names {
    /// Counter: Logs published, by content source.
    pub const PUBLISHED_LOGS_TOTAL: &str = "logdock_published_logs_total";
    /// Counter: Invocations that fell back to attempt-reason aggregation.
    pub const ATTEMPT_FALLBACKS_TOTAL: &str = "logdock_attempt_fallbacks_total";
    /// Counter: Failed invocations, by pipeline stage.
    pub const PIPELINE_FAILURES_TOTAL: &str = "logdock_pipeline_failures_total";
}

/// Label keys used across metrics.
pub mod labels {
    /// Content source (stream, failed_attempts).
    pub const SOURCE: &str = "source";
    /// Pipeline stage (classify, fetch, aggregate, publish).
    pub const STAGE: &str = "stage";
}

/// High-level interface for recording pipeline metrics.
///
/// Cheap to clone and share across invocations.
#[derive(Debug, Clone, Default)]
pub struct PipelineMetrics;

impl PipelineMetrics {
    /// Creates a new metrics recorder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Records a published log.
    ///
    /// Increments the `logdock_published_logs_total` counter with the
    /// content-source label.
    pub fn record_published(&self, source: &str) {
        counter!(
            names::PUBLISHED_LOGS_TOTAL,
            labels::SOURCE => source.to_string(),
        )
        .increment(1);
    }

    /// Records an invocation that aggregated attempt reasons instead of
    /// fetching a stream.
    pub fn record_fallback(&self) {
        counter!(names::ATTEMPT_FALLBACKS_TOTAL).increment(1);
    }

    /// Records a failed invocation.
    ///
    /// Increments the `logdock_pipeline_failures_total` counter with the
    /// failing-stage label.
    pub fn record_failure(&self, stage: &str) {
        counter!(
            names::PIPELINE_FAILURES_TOTAL,
            labels::STAGE => stage.to_string(),
        )
        .increment(1);
    }
}
