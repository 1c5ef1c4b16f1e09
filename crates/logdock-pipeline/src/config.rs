//! Runtime configuration for the pipeline.
//!
//! Configuration comes from the process environment with strict validation,
//! and every loader accepts an injected key-lookup function so tests never
//! mutate global state.

use logdock_core::observability::LogFormat;

use crate::error::{Error, Result};

const ENV_BUCKET: &str = "BUCKET";
const ENV_LOG_FORMAT: &str = "LOGDOCK_LOG_FORMAT";

/// Pipeline runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Destination object-store bucket for published logs.
    pub bucket: String,
}

impl PipelineConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `BUCKET` is missing or blank.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Loads configuration with a custom environment source.
    ///
    /// This entry point is test-friendly and accepts a key lookup function.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `BUCKET` is missing or blank.
    pub fn from_env_with<F>(get_env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bucket = get_env(ENV_BUCKET)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| Error::configuration(format!("missing {ENV_BUCKET}")))?;

        Ok(Self { bucket })
    }
}

/// Selects the log output format from the process environment.
///
/// `LOGDOCK_LOG_FORMAT=json` selects JSON logs; anything else (including an
/// unset variable) selects pretty logs.
#[must_use]
pub fn log_format_from_env() -> LogFormat {
    log_format_from_env_with(|key| std::env::var(key).ok())
}

/// Selects the log output format with a custom environment source.
#[must_use]
pub fn log_format_from_env_with<F>(get_env: F) -> LogFormat
where
    F: Fn(&str) -> Option<String>,
{
    match get_env(ENV_LOG_FORMAT).as_deref() {
        Some("json") => LogFormat::Json,
        _ => LogFormat::Pretty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_bucket_from_env() {
        let config = PipelineConfig::from_env_with(|key| match key {
            "BUCKET" => Some("job-logs".to_string()),
            _ => None,
        })
        .expect("config");
        assert_eq!(config.bucket, "job-logs");
    }

    #[test]
    fn missing_bucket_is_a_configuration_error() {
        let err = PipelineConfig::from_env_with(|_| None).expect_err("must fail");
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(err.to_string().contains("BUCKET"));
    }

    #[test]
    fn blank_bucket_is_a_configuration_error() {
        let err = PipelineConfig::from_env_with(|key| match key {
            "BUCKET" => Some("   ".to_string()),
            _ => None,
        })
        .expect_err("must fail");
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn log_format_defaults_to_pretty() {
        assert!(matches!(
            log_format_from_env_with(|_| None),
            LogFormat::Pretty
        ));
        assert!(matches!(
            log_format_from_env_with(|_| Some("json".to_string())),
            LogFormat::Json
        ));
    }
}
