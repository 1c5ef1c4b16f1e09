//! Aggregation over a task's attempt history.
//!
//! When a task fails before ever producing a log stream, the only
//! diagnostics available are the per-attempt failure reasons reported by the
//! workflow engine. Those reasons stand in for the log body: all of them are
//! preserved, oldest first, since the final outcome is usually driven by the
//! most recent attempt but the earlier ones still matter for diagnosis.

use crate::error::{Error, Result};
use crate::event::Attempt;

/// Joins the attempts' failure reasons into synthesized log content.
///
/// Order is preserved: the output is the newline-joined `Container.Reason`
/// strings with the oldest attempt first.
///
/// # Errors
///
/// Returns [`Error::EmptyAttempts`] for an empty slice and
/// [`Error::MalformedPayload`] when an attempt carries no reason.
pub fn content_from_attempts(attempts: &[Attempt]) -> Result<String> {
    if attempts.is_empty() {
        return Err(Error::EmptyAttempts);
    }

    let mut reasons = Vec::with_capacity(attempts.len());
    for attempt in attempts {
        let reason = attempt
            .container
            .as_ref()
            .and_then(|container| container.reason.as_deref())
            .ok_or_else(|| Error::malformed_payload("attempt carries no Container.Reason"))?;
        reasons.push(reason);
    }

    Ok(reasons.join("\n"))
}

/// Computes the task's processing time in seconds from its attempts.
///
/// The billable window is the final attempt's, where "final" means the
/// attempt with the greatest `StoppedAt`. Timing fields arrive as epoch
/// milliseconds and the result is seconds.
///
/// # Errors
///
/// Returns [`Error::EmptyAttempts`] for an empty slice and
/// [`Error::MalformedPayload`] when the final attempt is missing a timing
/// field.
#[allow(clippy::cast_precision_loss)]
pub fn processing_time_from_attempts(attempts: &[Attempt]) -> Result<f64> {
    let final_attempt = attempts
        .iter()
        .max_by_key(|attempt| attempt.stopped_at)
        .ok_or(Error::EmptyAttempts)?;

    let (Some(started), Some(stopped)) = (final_attempt.started_at, final_attempt.stopped_at)
    else {
        return Err(Error::malformed_payload(
            "attempt carries no StartedAt/StoppedAt timing",
        ));
    };

    Ok((stopped - started) as f64 / 1000.0)
}
