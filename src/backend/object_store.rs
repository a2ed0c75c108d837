//! Object storage seam.
//!
//! Receipt photos live in a blob store keyed by path. The accessor only
//! needs upload, signed-url, and remove; the trait mirrors that contract.
//! [`LocalObjectStore`] keeps blobs on disk for local runs,
//! [`MemoryObjectStore`] backs tests and can simulate mid-sequence upload
//! failures for compensation paths.

use crate::errors::{Error, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Contract for the hosting platform's object storage.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores a blob at `path`, overwriting any existing object.
    async fn upload(&self, path: &str, bytes: &[u8], content_type: &str) -> Result<()>;

    /// Returns a time-limited URL for reading the object at `path`.
    async fn create_signed_url(&self, path: &str, ttl_secs: u64) -> Result<String>;

    /// Removes the given objects. Missing paths are not an error.
    async fn remove(&self, paths: &[String]) -> Result<()>;
}

/// Filesystem-backed object store rooted at a configured directory.
#[derive(Debug)]
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    /// Creates a store rooted at `root`. The directory is created lazily.
    #[must_use]
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn upload(&self, path: &str, bytes: &[u8], _content_type: &str) -> Result<()> {
        let full = self.resolve(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&full, bytes)?;
        Ok(())
    }

    async fn create_signed_url(&self, path: &str, ttl_secs: u64) -> Result<String> {
        let full = self.resolve(path);
        if !full.exists() {
            return Err(Error::Storage {
                message: format!("no object at {path}"),
            });
        }
        // Not a real signature; local files need no access control.
        let expires = Utc::now().timestamp() + i64::try_from(ttl_secs).unwrap_or(i64::MAX);
        Ok(format!("file://{}?expires={expires}", full.display()))
    }

    async fn remove(&self, paths: &[String]) -> Result<()> {
        for path in paths {
            match std::fs::remove_file(self.resolve(path)) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Vec<u8>,
    content_type: String,
}

/// In-memory object store for tests.
///
/// `failing_after(n)` makes every upload past the first `n` fail, which is
/// how compensation paths are exercised.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, StoredObject>>,
    uploads: AtomicUsize,
    fail_after: Option<usize>,
}

impl MemoryObjectStore {
    /// Creates an empty store that accepts every upload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose uploads fail after the first `n` succeed.
    #[must_use]
    pub fn failing_after(n: usize) -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            uploads: AtomicUsize::new(0),
            fail_after: Some(n),
        }
    }

    /// Paths of all stored objects, sorted for stable assertions.
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.lock().keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Number of stored objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True when the store holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, StoredObject>> {
        self.objects
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn upload(&self, path: &str, bytes: &[u8], content_type: &str) -> Result<()> {
        let count = self.uploads.fetch_add(1, Ordering::SeqCst);
        if let Some(limit) = self.fail_after {
            if count >= limit {
                return Err(Error::Storage {
                    message: format!("simulated upload failure for {path}"),
                });
            }
        }
        self.lock().insert(
            path.to_string(),
            StoredObject {
                bytes: bytes.to_vec(),
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn create_signed_url(&self, path: &str, ttl_secs: u64) -> Result<String> {
        if !self.lock().contains_key(path) {
            return Err(Error::Storage {
                message: format!("no object at {path}"),
            });
        }
        let expires = Utc::now().timestamp() + i64::try_from(ttl_secs).unwrap_or(i64::MAX);
        Ok(format!("memory://{path}?expires={expires}"))
    }

    async fn remove(&self, paths: &[String]) -> Result<()> {
        let mut objects = self.lock();
        for path in paths {
            objects.remove(path);
        }
        Ok(())
    }
}
