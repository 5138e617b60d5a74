//! Key-value blob storage for uploaded resumes, job descriptions and results

pub mod fs;
pub mod layout;
pub mod memory;

pub use fs::FsBlobStore;
pub use memory::MemoryBlobStore;

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Object metadata returned by [`BlobStore::list`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectInfo {
    pub key: String,
    pub size: u64,
    pub last_modified: Option<DateTime<Utc>>,
}

impl ObjectInfo {
    /// Last path segment of the key.
    pub fn name(&self) -> &str {
        self.key.rsplit('/').next().unwrap_or(&self.key)
    }
}

/// Flat string-keyed object store.
///
/// `get` fails with `NotFound` for absent keys, `delete` is idempotent and
/// `list` returns every object whose key starts with `prefix`, ordered by key.
/// Backend failures surface as `Store` errors.
pub trait BlobStore: Send + Sync {
    fn get(&self, key: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;

    fn put(&self, key: &str, data: &[u8]) -> impl std::future::Future<Output = Result<()>> + Send;

    fn delete(&self, key: &str) -> impl std::future::Future<Output = Result<()>> + Send;

    fn list(&self, prefix: &str) -> impl std::future::Future<Output = Result<Vec<ObjectInfo>>> + Send;
}
