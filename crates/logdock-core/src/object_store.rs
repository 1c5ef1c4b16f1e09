//! Object store client abstraction.
//!
//! This module defines the write contract for durable artifacts: a plain
//! object write followed by a tagging call. The two steps are separate
//! backend operations with no transactional guarantee across them; a failure
//! between them leaves a stored-but-untagged object behind.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A key/value tag attached to a stored object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ObjectTag {
    /// Tag key.
    pub key: String,
    /// Tag value.
    pub value: String,
}

impl ObjectTag {
    /// Creates a new tag.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Object store client trait.
///
/// Implementations may target a cloud object service or an in-memory store
/// for testing. Writes are last-writer-wins; keys are unique per job, so
/// concurrent invocations for different jobs never contend.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Writes an object, replacing any existing one at the same key.
    ///
    /// # Errors
    ///
    /// Returns an object store error when the write fails.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<()>;

    /// Replaces the tag set of an existing object.
    ///
    /// # Errors
    ///
    /// Returns an object store error when the object does not exist or the
    /// tagging call fails.
    async fn put_object_tagging(&self, bucket: &str, key: &str, tags: &[ObjectTag]) -> Result<()>;
}

/// A stored object as recorded by [`MemoryObjectStore`].
#[derive(Debug, Clone)]
pub struct StoredObject {
    /// Object body.
    pub body: Bytes,
    /// Content type supplied at write time.
    pub content_type: String,
    /// Current tag set. Cleared by an overwriting `put_object`.
    pub tags: Vec<ObjectTag>,
    /// Monotonic version, incremented on each overwrite.
    pub version: i64,
    /// Last modification timestamp.
    pub last_modified: DateTime<Utc>,
}

/// In-memory object store for testing.
///
/// Thread-safe via `RwLock`. Not suitable for production. Records bodies,
/// content types, tags, and versions, and counts write and tagging calls so
/// tests can assert on exact call sequences.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
    put_calls: Arc<AtomicUsize>,
    tagging_calls: Arc<AtomicUsize>,
}

impl MemoryObjectStore {
    /// Creates a new empty memory object store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the object at `bucket`/`key`, if present.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .read()
            .expect("memory object store lock poisoned")
            .get(&object_path(bucket, key))
            .cloned()
    }

    /// Returns the number of stored objects.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects
            .read()
            .expect("memory object store lock poisoned")
            .len()
    }

    /// Returns how many `put_object` calls have been issued.
    #[must_use]
    pub fn put_count(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }

    /// Returns how many `put_object_tagging` calls have been issued.
    #[must_use]
    pub fn tagging_count(&self) -> usize {
        self.tagging_calls.load(Ordering::SeqCst)
    }
}

fn object_path(bucket: &str, key: &str) -> String {
    format!("{bucket}/{key}")
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<()> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);

        let mut objects = self.objects.write().map_err(|_| Error::Internal {
            message: "lock poisoned".into(),
        })?;

        let path = object_path(bucket, key);
        let version = objects.get(&path).map_or(1, |o| o.version + 1);
        objects.insert(
            path,
            StoredObject {
                body,
                content_type: content_type.to_string(),
                tags: Vec::new(),
                version,
                last_modified: Utc::now(),
            },
        );
        drop(objects);

        Ok(())
    }

    async fn put_object_tagging(&self, bucket: &str, key: &str, tags: &[ObjectTag]) -> Result<()> {
        self.tagging_calls.fetch_add(1, Ordering::SeqCst);

        let mut objects = self.objects.write().map_err(|_| Error::Internal {
            message: "lock poisoned".into(),
        })?;

        let path = object_path(bucket, key);
        let object = objects
            .get_mut(&path)
            .ok_or_else(|| Error::object_store(format!("cannot tag missing object: {path}")))?;
        object.tags = tags.to_vec();

        Ok(())
    }
}
