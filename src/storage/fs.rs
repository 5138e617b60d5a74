//! Filesystem-backed blob store
//!
//! Keys map to paths below a root directory, `/` separated. Keys that are
//! absolute or contain `.`/`..` segments are rejected.

use crate::error::{Result, ResumeScorerError};
use crate::storage::{BlobStore, ObjectInfo};
use chrono::{DateTime, Utc};
use log::debug;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() {
            return Err(ResumeScorerError::InvalidInput("Empty storage key".to_string()));
        }

        let relative = Path::new(key);
        let is_safe = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if !is_safe || key.split('/').any(str::is_empty) {
            return Err(ResumeScorerError::InvalidInput(format!(
                "Invalid storage key: {}",
                key
            )));
        }

        Ok(self.root.join(relative))
    }

    fn key_for(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect();
        Some(segments.join("/"))
    }

    async fn walk(&self, start: PathBuf, prefix: &str) -> Result<Vec<ObjectInfo>> {
        let mut objects = Vec::new();
        let mut pending = vec![start];

        while let Some(dir) = pending.pop() {
            let mut entries = match fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(store_error("list", &dir.to_string_lossy(), e)),
            };

            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|e| store_error("list", &dir.to_string_lossy(), e))?
            {
                let path = entry.path();
                let metadata = entry
                    .metadata()
                    .await
                    .map_err(|e| store_error("stat", &path.to_string_lossy(), e))?;

                if metadata.is_dir() {
                    pending.push(path);
                    continue;
                }

                let Some(key) = self.key_for(&path) else {
                    continue;
                };
                if key.starts_with(prefix) {
                    objects.push(ObjectInfo {
                        key,
                        size: metadata.len(),
                        last_modified: metadata.modified().ok().map(DateTime::<Utc>::from),
                    });
                }
            }
        }

        objects.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(objects)
    }
}

fn store_error(action: &str, key: &str, err: std::io::Error) -> ResumeScorerError {
    ResumeScorerError::Store(format!("Failed to {} '{}': {}", action, key, err))
}

impl BlobStore for FsBlobStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.resolve(key)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(ResumeScorerError::NotFound(key.to_string()))
            }
            Err(e) => Err(store_error("read", key, e)),
        }
    }

    async fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| store_error("create directory for", key, e))?;
        }

        fs::write(&path, data)
            .await
            .map_err(|e| store_error("write", key, e))?;
        debug!("Stored {} bytes at {}", data.len(), path.display());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.resolve(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(store_error("delete", key, e)),
        }
    }

    async fn list(&self, prefix: &str) -> Result<Vec<ObjectInfo>> {
        // Start from the deepest directory the prefix fully names.
        let start = match prefix.rfind('/') {
            Some(idx) if idx > 0 => self.resolve(&prefix[..idx])?,
            _ => self.root.clone(),
        };
        self.walk(start, prefix).await
    }
}
