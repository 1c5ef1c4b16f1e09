//! Publishing assembled log content to the object store.

use bytes::Bytes;
use logdock_core::keys::{LogKey, FILE_TYPE_LOG, FILE_TYPE_TAG_KEY, LOG_CONTENT_TYPE};
use logdock_core::object_store::{ObjectStore, ObjectTag};

use crate::error::Result;

/// Writes the content at the job's deterministic key, then tags it.
///
/// Two backend calls, in order: a `text/plain` object write at
/// `{job_id}/{job_id}.log`, then a tagging call setting `file_type=log`.
/// There is no transactional guarantee across the two; a failure after the
/// write leaves a stored-but-untagged object, which is accepted and not
/// rolled back.
///
/// # Errors
///
/// Returns the object store error unchanged when either call fails.
pub async fn publish_log(
    store: &dyn ObjectStore,
    bucket: &str,
    job_id: &str,
    content: &str,
) -> Result<LogKey> {
    let key = LogKey::for_job(job_id);

    store
        .put_object(
            bucket,
            key.as_ref(),
            Bytes::from(content.to_owned()),
            LOG_CONTENT_TYPE,
        )
        .await?;

    store
        .put_object_tagging(
            bucket,
            key.as_ref(),
            &[ObjectTag::new(FILE_TYPE_TAG_KEY, FILE_TYPE_LOG)],
        )
        .await?;

    Ok(key)
}
