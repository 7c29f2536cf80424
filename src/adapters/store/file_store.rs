//! File-based Profile Store
//!
//! Stores each profile as a YAML file named after its id under a base
//! directory. Writes go through a temp file and a rename so a reader never
//! observes a half-written profile.

use async_trait::async_trait;
use futures::future::try_join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::decision::Profile;
use crate::domain::foundation::{ProfileId, ValidationError};
use crate::ports::{ProfilePatch, ProfileStore, StoreError};

const EXTENSION: &str = "yaml";

/// File-based storage for profiles
#[derive(Debug, Clone)]
pub struct FileProfileStore {
    base_path: PathBuf,
    // Serializes read-modify-write sequences within this process.
    write_lock: Arc<Mutex<()>>,
}

impl FileProfileStore {
    /// Create a new file store rooted at `base_path`.
    ///
    /// # Example
    /// ```ignore
    /// let store = FileProfileStore::new("./data/profiles");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    fn profile_path(&self, id: &ProfileId) -> Result<PathBuf, StoreError> {
        let raw = id.as_str();
        if raw == "." || raw == ".." || raw.contains(['/', '\\']) {
            return Err(ValidationError::invalid_format(
                "profile.id",
                "must not contain path separators",
            )
            .into());
        }
        Ok(self.base_path.join(format!("{}.{}", raw, EXTENSION)))
    }

    async fn ensure_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| StoreError::internal(e.to_string()))
    }

    async fn read_profile(path: PathBuf) -> Result<Profile, StoreError> {
        let yaml = fs::read_to_string(&path)
            .await
            .map_err(|e| StoreError::internal(e.to_string()))?;
        serde_yaml::from_str(&yaml).map_err(|e| {
            StoreError::internal(format!("corrupt profile file {}: {}", path.display(), e))
        })
    }

    async fn load(&self, id: &ProfileId) -> Result<Option<Profile>, StoreError> {
        let path = self.profile_path(id)?;
        if !path.exists() {
            return Ok(None);
        }
        Self::read_profile(path).await.map(Some)
    }

    async fn write(&self, profile: &Profile) -> Result<(), StoreError> {
        self.ensure_dir().await?;
        let path = self.profile_path(&profile.id)?;
        let tmp = path.with_extension("yaml.tmp");

        let yaml =
            serde_yaml::to_string(profile).map_err(|e| StoreError::internal(e.to_string()))?;
        fs::write(&tmp, yaml)
            .await
            .map_err(|e| StoreError::internal(e.to_string()))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| StoreError::internal(e.to_string()))
    }
}

#[async_trait]
impl ProfileStore for FileProfileStore {
    async fn list(&self) -> Result<Vec<Profile>, StoreError> {
        if !self.base_path.exists() {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&self.base_path)
            .await
            .map_err(|e| StoreError::internal(e.to_string()))?;

        let mut paths = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::internal(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some(EXTENSION) {
                paths.push(path);
            }
        }

        let mut profiles = try_join_all(paths.into_iter().map(Self::read_profile)).await?;
        Profile::sort_for_display(&mut profiles);
        Ok(profiles)
    }

    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, StoreError> {
        self.load(id).await
    }

    async fn create(&self, profile: &Profile) -> Result<Profile, StoreError> {
        profile.validate()?;
        let _guard = self.write_lock.lock().await;

        if self.profile_path(&profile.id)?.exists() {
            return Err(StoreError::Conflict(profile.id.clone()));
        }
        self.write(profile).await?;
        Ok(profile.clone())
    }

    async fn update(&self, id: &ProfileId, patch: &ProfilePatch) -> Result<Profile, StoreError> {
        let _guard = self.write_lock.lock().await;

        let existing = self
            .load(id)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        let merged = patch.apply_to(&existing);
        merged.validate()?;

        self.write(&merged).await?;
        Ok(merged)
    }

    async fn delete(&self, id: &ProfileId) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let path = self.profile_path(id)?;
        if !path.exists() {
            return Err(StoreError::NotFound(id.clone()));
        }
        fs::remove_file(&path)
            .await
            .map_err(|e| StoreError::internal(e.to_string()))
    }
}
