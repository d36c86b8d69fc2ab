//! Byte stores keeping whole documents with their modification time.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{StorageError, StorageResult};

/// A stored document and the time it was last written.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub bytes: Bytes,
    pub modified: SystemTime,
}

/// Keyed storage of whole documents.
///
/// A write replaces the previous document atomically: readers observe either
/// the old or the new bytes, never a mix.
#[async_trait]
pub trait ByteStore: Send + Sync {
    /// Read a document, `None` if absent.
    async fn read(&self, key: &str) -> StorageResult<Option<StoredDocument>>;

    /// Replace a document.
    async fn write(&self, key: &str, bytes: &[u8]) -> StorageResult<()>;

    /// Delete a document. Returns false if there was nothing to delete.
    async fn delete(&self, key: &str) -> StorageResult<bool>;
}

/// Documents stored as files of one directory, `<root>/<key>`.
#[derive(Debug, Clone)]
pub struct FsByteStore {
    root: PathBuf,
}

impl FsByteStore {
    /// The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait]
impl ByteStore for FsByteStore {
    async fn read(&self, key: &str) -> StorageResult<Option<StoredDocument>> {
        let path = self.path_for(key);
        let metadata = match fs::metadata(&path).await {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::io(&path, e)),
        };
        let modified = metadata
            .modified()
            .map_err(|e| StorageError::io(&path, e))?;

        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(StoredDocument {
                bytes: Bytes::from(bytes),
                modified,
            })),
            // Deleted between the two calls.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(&path, e)),
        }
    }

    async fn write(&self, key: &str, bytes: &[u8]) -> StorageResult<()> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StorageError::io(&self.root, e))?;

        let target = self.path_for(key);
        let temp = self.root.join(format!(".{}.{}.tmp", key, Uuid::new_v4()));

        fs::write(&temp, bytes)
            .await
            .map_err(|e| StorageError::io(&temp, e))?;

        if let Err(e) = fs::rename(&temp, &target).await {
            if let Err(cleanup) = fs::remove_file(&temp).await {
                warn!(path = %temp.display(), error = %cleanup, "Failed to remove temporary file");
            }
            return Err(StorageError::io(&target, e));
        }

        debug!(path = %target.display(), bytes = bytes.len(), "Stored document");
        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<bool> {
        let path = self.path_for(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::io(&path, e)),
        }
    }
}

/// In-memory store whose modification times can be set, for tests and
/// ephemeral deployments.
#[derive(Debug, Default)]
pub struct MemoryByteStore {
    documents: RwLock<HashMap<String, StoredDocument>>,
}

impl MemoryByteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document with an explicit modification time.
    pub async fn insert_at(&self, key: &str, bytes: impl Into<Bytes>, modified: SystemTime) {
        self.documents.write().await.insert(
            key.to_string(),
            StoredDocument {
                bytes: bytes.into(),
                modified,
            },
        );
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.documents.read().await.contains_key(key)
    }
}

#[async_trait]
impl ByteStore for MemoryByteStore {
    async fn read(&self, key: &str) -> StorageResult<Option<StoredDocument>> {
        Ok(self.documents.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, bytes: &[u8]) -> StorageResult<()> {
        self.insert_at(key, Bytes::copy_from_slice(bytes), SystemTime::now())
            .await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<bool> {
        Ok(self.documents.write().await.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fs_store_creates_directory_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsByteStore::new(dir.path().join("cache/capabilities"));

        assert!(store.read("wmts.xml").await.unwrap().is_none());

        store.write("wmts.xml", b"<a/>").await.unwrap();
        store.write("wmts.xml", b"<b/>").await.unwrap();

        let doc = store.read("wmts.xml").await.unwrap().unwrap();
        assert_eq!(&doc.bytes[..], b"<b/>");

        // No temporary files are left behind.
        let entries: Vec<_> = std::fs::read_dir(store.root()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_fs_store_concurrent_writes_never_mix() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsByteStore::new(dir.path());
        let first = vec![b'a'; 256 * 1024];
        let second = vec![b'b'; 256 * 1024];

        for _ in 0..20 {
            let (a, b) = (store.clone(), store.clone());
            let (first_copy, second_copy) = (first.clone(), second.clone());
            let (ra, rb) = tokio::join!(
                tokio::spawn(async move { a.write("wmts.xml", &first_copy).await }),
                tokio::spawn(async move { b.write("wmts.xml", &second_copy).await }),
            );
            ra.unwrap().unwrap();
            rb.unwrap().unwrap();

            let doc = store.read("wmts.xml").await.unwrap().unwrap();
            assert!(doc.bytes[..] == first[..] || doc.bytes[..] == second[..]);
        }

        let entries: Vec<_> = std::fs::read_dir(store.root()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_fs_store_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsByteStore::new(dir.path());

        assert!(!store.delete("tms.xml").await.unwrap());
        store.write("tms.xml", b"x").await.unwrap();
        assert!(store.delete("tms.xml").await.unwrap());
        assert!(store.read("tms.xml").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store_keeps_mtime() {
        let store = MemoryByteStore::new();
        let then = SystemTime::UNIX_EPOCH;
        store.insert_at("wms-r.xml", &b"doc"[..], then).await;
        let doc = store.read("wms-r.xml").await.unwrap().unwrap();
        assert_eq!(doc.modified, then);
        assert!(store.delete("wms-r.xml").await.unwrap());
        assert!(!store.contains("wms-r.xml").await);
    }
}
