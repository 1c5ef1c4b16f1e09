//! Typed object keys for published log artifacts.
//!
//! Published objects live at deterministic, job-derived keys so that
//! republication overwrites rather than duplicates. Keys are strongly typed
//! to keep path structure out of call sites: use `LogKey` instead of a
//! `&str` assembled by hand.

/// Content type for published log objects.
pub const LOG_CONTENT_TYPE: &str = "text/plain";

/// Tag key identifying the file type of a published object.
pub const FILE_TYPE_TAG_KEY: &str = "file_type";

/// Tag value for log artifacts.
pub const FILE_TYPE_LOG: &str = "log";

/// A typed storage key that encodes path structure.
///
/// All key types implement this trait to provide uniform access to the
/// underlying path string.
pub trait StorageKey: AsRef<str> {
    /// Returns the underlying path string.
    fn path(&self) -> &str {
        self.as_ref()
    }
}

/// A typed key for a published job log.
///
/// # Path Format
///
/// `{job_id}/{job_id}.log`
///
/// The key is fully determined by the job id, with no random component, so
/// publishing the same job twice overwrites the prior artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogKey(String);

impl LogKey {
    /// Creates the log key for the given job.
    #[must_use]
    pub fn for_job(job_id: &str) -> Self {
        Self(format!("{job_id}/{job_id}.log"))
    }
}

impl StorageKey for LogKey {}

impl AsRef<str> for LogKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LogKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
