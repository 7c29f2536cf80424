//! File-based LocalCache
//!
//! Each key is a file under the cache directory holding the raw value.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{CacheError, LocalCache};

/// File-backed local cache
#[derive(Debug, Clone)]
pub struct FileLocalCache {
    base_path: PathBuf,
}

impl FileLocalCache {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Keys are restricted to `[A-Za-z0-9._-]` so they map to plain file names.
    fn key_path(&self, key: &str) -> Result<PathBuf, CacheError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if !valid {
            return Err(CacheError::InvalidKey(key.to_string()));
        }
        Ok(self.base_path.join(key))
    }
}

#[async_trait]
impl LocalCache for FileLocalCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .await
            .map(Some)
            .map_err(|e| CacheError::IoError(e.to_string()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let path = self.key_path(key)?;
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| CacheError::IoError(e.to_string()))?;
        fs::write(&path, value)
            .await
            .map_err(|e| CacheError::IoError(e.to_string()))
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::IoError(e.to_string())),
        }
    }
}
