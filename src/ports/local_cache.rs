//! LocalCache port - client-side key/value fallback storage.
//!
//! Values are opaque text (JSON documents in practice), addressed by
//! well-known keys.

use async_trait::async_trait;

/// Key holding the JSON array of cached profiles.
pub const PROFILES_KEY: &str = "decision-scale-profiles";

/// Key of the legacy single-decision format: a bare JSON array of categories.
pub const LEGACY_CATEGORIES_KEY: &str = "decision-scale-data";

/// Errors that can occur during cache operations
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Invalid cache key: {0}")]
    InvalidKey(String),
}

/// Port for the local fallback cache
#[async_trait]
pub trait LocalCache: Send + Sync {
    /// Read the value under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Replace the value under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), CacheError>;
}
