//! Storage configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Which ProfileStore adapter backs the server
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    File,
    Postgres,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Store adapter
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory for the file backend
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// PostgreSQL connection URL (postgres backend only)
    pub database_url: Option<Secret<String>>,

    /// Maximum pool connections (postgres backend only)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl StorageConfig {
    /// Database URL, if configured.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_ref().map(|url| url.expose_secret().as_str())
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.backend {
            StorageBackend::Memory => Ok(()),
            StorageBackend::File => {
                if self.data_dir.as_os_str().is_empty() {
                    return Err(ValidationError::MissingRequired("STORAGE__DATA_DIR"));
                }
                Ok(())
            }
            StorageBackend::Postgres => {
                let url = self
                    .database_url()
                    .filter(|url| !url.is_empty())
                    .ok_or(ValidationError::MissingRequired("STORAGE__DATABASE_URL"))?;
                if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                    return Err(ValidationError::InvalidDatabaseUrl);
                }
                if self.max_connections == 0 || self.max_connections > 100 {
                    return Err(ValidationError::InvalidPoolSize);
                }
                Ok(())
            }
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: default_data_dir(),
            database_url: None,
            max_connections: default_max_connections(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data/profiles")
}

fn default_max_connections() -> u32 {
    5
}
