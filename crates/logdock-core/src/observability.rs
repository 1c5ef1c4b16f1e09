//! Observability infrastructure for Logdock.
//!
//! Structured logging with consistent spans. This module provides
//! initialization helpers and span constructors used across the pipeline.

use std::sync::Once;
use tracing::Span;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Log output format.
#[derive(Debug, Clone, Copy, Default)]
pub enum LogFormat {
    /// JSON structured logs (for production).
    Json,
    /// Pretty-printed logs (for development).
    #[default]
    Pretty,
}

/// Initializes the logging subsystem.
///
/// Call once at application startup. Safe to call multiple times;
/// subsequent calls are no-ops.
///
/// # Environment Variables
///
/// - `RUST_LOG`: Controls log levels (e.g., `info`, `logdock_pipeline=debug`)
///
/// # Example
///
/// ```rust
/// use logdock_core::observability::{init_logging, LogFormat};
///
/// init_logging(LogFormat::Pretty);
/// ```
pub fn init_logging(format: LogFormat) {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        match format {
            LogFormat::Json => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().json())
                    .init();
            }
            LogFormat::Pretty => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().pretty())
                    .init();
            }
        }
    });
}

/// Creates a span for one pipeline invocation with standard fields.
///
/// # Example
///
/// ```rust
/// use logdock_core::observability::pipeline_span;
///
/// let span = pipeline_span("aggregate_log", "job-42", "jobs");
/// let _guard = span.enter();
/// // ... do pipeline operation
/// ```
#[must_use]
pub fn pipeline_span(operation: &str, job_id: &str, log_group: &str) -> Span {
    tracing::info_span!(
        "pipeline",
        op = operation,
        job_id = job_id,
        log_group = log_group,
    )
}
