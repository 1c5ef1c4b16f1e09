//! Invocation event model and task-result classification.
//!
//! The workflow engine reports a finished task either as a success, with the
//! log stream name at the top level, or as a failure, with the same
//! structure nested inside a JSON-encoded `Cause` string alongside status
//! and per-attempt diagnostics. The `Cause` field arrives as a string inside
//! an otherwise structured payload, so it is treated as an untrusted
//! sub-document: decoded explicitly, with the decode failure kept as the
//! error source.

use serde::{Deserialize, Serialize};

use crate::attempts::processing_time_from_attempts;
use crate::error::{Error, Result};

/// The invocation payload delivered by the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationEvent {
    /// Object key prefix and filename stem for the published log.
    pub prefix: String,
    /// Log group to query for the task's log stream.
    pub log_group: String,
    /// Terminal task result from the workflow engine.
    pub processing_results: ProcessingResults,
}

/// Terminal result of a task, as reported by the workflow engine.
///
/// Success carries `Container.LogStreamName` at the top level. Failure
/// carries `Error` plus a `Cause` string that JSON-decodes to a
/// [`FailureCause`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProcessingResults {
    /// Container details for a task that started.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerDetail>,
    /// Workflow error code for a failed task.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// JSON-encoded failure description for a failed task.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
    /// Attempt history, when the engine reports it at the top level.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attempts: Vec<Attempt>,
}

/// Container details reported with a task result or attempt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerDetail {
    /// Name of the log stream the container wrote to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_stream_name: Option<String>,
    /// Failure reason for an attempt that never produced a stream.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Decoded form of a failed task's `Cause` string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FailureCause {
    /// Container details at the time of failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerDetail>,
    /// Terminal status reported by the engine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Human-readable status explanation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_reason: Option<String>,
    /// Per-attempt diagnostics, oldest first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attempts: Vec<Attempt>,
}

/// One retry of a task, with its timing and failure reason.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Attempt {
    /// Container details for the attempt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerDetail>,
    /// When the attempt started (epoch milliseconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<i64>,
    /// When the attempt stopped (epoch milliseconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopped_at: Option<i64>,
}

impl ProcessingResults {
    /// Creates a success result carrying the given log stream name.
    #[must_use]
    pub fn for_stream(log_stream: impl Into<String>) -> Self {
        Self {
            container: Some(ContainerDetail {
                log_stream_name: Some(log_stream.into()),
                reason: None,
            }),
            ..Self::default()
        }
    }

    /// Creates a failure result with the given error code and raw cause.
    #[must_use]
    pub fn for_failure(error: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            cause: Some(cause.into()),
            ..Self::default()
        }
    }

    /// Extracts the log stream name, whether the task succeeded or failed.
    ///
    /// A success carries the name at the top level; a failure that started
    /// carries it inside the decoded `Cause`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedPayload`] when neither field-set is present
    /// or the `Cause` string is not valid JSON.
    pub fn log_stream(&self) -> Result<String> {
        if let Some(name) = self
            .container
            .as_ref()
            .and_then(|container| container.log_stream_name.as_deref())
        {
            return Ok(name.to_string());
        }

        let cause = self.decoded_cause()?;
        cause
            .container
            .and_then(|container| container.log_stream_name)
            .ok_or_else(|| {
                Error::malformed_payload("Cause document carries no Container.LogStreamName")
            })
    }

    /// Decodes the `Cause` string into its structured form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedPayload`] when the field is absent or does
    /// not decode as JSON.
    pub fn decoded_cause(&self) -> Result<FailureCause> {
        let raw = self.cause.as_deref().ok_or_else(|| {
            Error::malformed_payload(
                "task result carries neither Container.LogStreamName nor a Cause document",
            )
        })?;

        serde_json::from_str(raw).map_err(|source| {
            Error::malformed_payload_with_source("Cause is not a valid JSON document", source)
        })
    }

    /// Re-derives the attempt history for the fallback path.
    ///
    /// An absent or undecodable `Cause` yields an empty list rather than an
    /// error, so decode noise here never masks the fetch error the caller
    /// is deciding whether to re-raise.
    #[must_use]
    pub fn failed_attempts(&self) -> Vec<Attempt> {
        self.cause
            .as_deref()
            .and_then(|raw| serde_json::from_str::<FailureCause>(raw).ok())
            .map(|cause| cause.attempts)
            .unwrap_or_default()
    }

    /// Computes the task's processing time in seconds from its attempts.
    ///
    /// Uses the top-level attempt list when the engine reported one, and the
    /// decoded `Cause`'s list otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyAttempts`] when no attempts are available, and
    /// [`Error::MalformedPayload`] when the payload or attempt timing is
    /// malformed.
    pub fn processing_time(&self) -> Result<f64> {
        if !self.attempts.is_empty() {
            return processing_time_from_attempts(&self.attempts);
        }
        processing_time_from_attempts(&self.decoded_cause()?.attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_payload_yields_top_level_stream() {
        let results: ProcessingResults = serde_json::from_value(serde_json::json!({
            "Container": {"LogStreamName": "mySucceededLogStream"}
        }))
        .expect("payload");

        assert_eq!(
            results.log_stream().expect("stream"),
            "mySucceededLogStream"
        );
    }

    #[test]
    fn failure_payload_yields_stream_nested_in_cause() {
        let results: ProcessingResults = serde_json::from_value(serde_json::json!({
            "Error": "States.TaskFailed",
            "Cause": "{\"Container\": {\"LogStreamName\": \"myFailedLogStream\"}}"
        }))
        .expect("payload");

        assert_eq!(results.log_stream().expect("stream"), "myFailedLogStream");
    }

    #[test]
    fn payload_without_either_field_set_is_malformed() {
        let results = ProcessingResults::default();
        let err = results.log_stream().expect_err("must fail");
        assert!(matches!(err, Error::MalformedPayload { .. }));
    }

    #[test]
    fn undecodable_cause_is_malformed() {
        let results = ProcessingResults::for_failure("States.TaskFailed", "not json");
        let err = results.log_stream().expect_err("must fail");
        assert!(matches!(
            err,
            Error::MalformedPayload { source: Some(_), .. }
        ));
    }

    #[test]
    fn cause_without_stream_name_is_malformed() {
        let results = ProcessingResults::for_failure("States.TaskFailed", "{\"Status\": \"FAILED\"}");
        let err = results.log_stream().expect_err("must fail");
        assert!(matches!(err, Error::MalformedPayload { .. }));
    }

    #[test]
    fn failed_attempts_decode_in_original_order() {
        let cause = serde_json::json!({
            "Container": {"LogStreamName": "s"},
            "Status": "FAILED",
            "StatusReason": "Task failed to start",
            "Attempts": [
                {"Container": {"Reason": "error message 1"}},
                {"Container": {"Reason": "error message 2"}},
                {"Container": {"Reason": "error message 3"}}
            ]
        });
        let results =
            ProcessingResults::for_failure("States.TaskFailed", cause.to_string());

        let attempts = results.failed_attempts();
        let reasons: Vec<_> = attempts
            .iter()
            .map(|a| a.container.as_ref().and_then(|c| c.reason.clone()))
            .collect();
        assert_eq!(
            reasons,
            vec![
                Some("error message 1".to_string()),
                Some("error message 2".to_string()),
                Some("error message 3".to_string()),
            ]
        );
    }

    #[test]
    fn failed_attempts_is_lenient_about_bad_cause() {
        assert!(ProcessingResults::default().failed_attempts().is_empty());
        assert!(
            ProcessingResults::for_failure("States.TaskFailed", "not json")
                .failed_attempts()
                .is_empty()
        );
    }

    #[test]
    fn processing_time_prefers_top_level_attempts() {
        let results: ProcessingResults = serde_json::from_value(serde_json::json!({
            "Attempts": [
                {"StartedAt": 1000, "StoppedAt": 4500}
            ]
        }))
        .expect("payload");

        let seconds = results.processing_time().expect("processing time");
        assert!((seconds - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn processing_time_falls_back_to_cause_attempts() {
        let cause = serde_json::json!({
            "Attempts": [
                {"StartedAt": 0, "StoppedAt": 1000},
                {"StartedAt": 2000, "StoppedAt": 12000}
            ]
        });
        let results =
            ProcessingResults::for_failure("States.TaskFailed", cause.to_string());

        let seconds = results.processing_time().expect("processing time");
        assert!((seconds - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn event_wire_format_round_trips() {
        let event: InvocationEvent = serde_json::from_value(serde_json::json!({
            "prefix": "test-prefix",
            "log_group": "test-log-group",
            "processing_results": {"Container": {"LogStreamName": "test-log-stream"}}
        }))
        .expect("event");

        assert_eq!(event.prefix, "test-prefix");
        assert_eq!(event.log_group, "test-log-group");

        let json = serde_json::to_value(&event).expect("serialize");
        assert_eq!(
            json["processing_results"]["Container"]["LogStreamName"],
            "test-log-stream"
        );
    }
}
