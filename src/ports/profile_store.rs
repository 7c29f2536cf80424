//! ProfileStore port for durable profile persistence.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::decision::{Category, Profile, Theme};
use crate::domain::foundation::{ErrorCode, ProfileId, Timestamp, ValidationError};

/// Errors that can occur during store operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid profile: {0}")]
    Validation(#[from] ValidationError),

    #[error("Profile not found: {0}")]
    NotFound(ProfileId),

    #[error("Profile already exists: {0}")]
    Conflict(ProfileId),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store error: {0}")]
    Internal(String),
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        StoreError::Unavailable(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        StoreError::Internal(message.into())
    }

    /// True for connectivity failures that callers may degrade around.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            StoreError::Validation(_) => ErrorCode::ValidationFailed,
            StoreError::NotFound(_) => ErrorCode::ProfileNotFound,
            StoreError::Conflict(_) => ErrorCode::Conflict,
            StoreError::Unavailable(_) => ErrorCode::StoreUnavailable,
            StoreError::Internal(_) => ErrorCode::DatabaseError,
        }
    }
}

/// Field-wise update of a stored profile. `None` leaves a field unchanged.
///
/// The id is never patched; unknown fields in an incoming body are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starred: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
}

impl ProfilePatch {
    /// Patch carrying every field of a snapshot.
    pub fn snapshot(profile: &Profile) -> Self {
        Self {
            name: Some(profile.name.clone()),
            categories: Some(profile.categories.clone()),
            last_modified: Some(profile.last_modified),
            starred: Some(profile.starred),
            theme: profile.theme,
        }
    }

    /// Patch touching only the starred flag.
    pub fn starred(starred: bool) -> Self {
        Self {
            starred: Some(starred),
            ..Self::default()
        }
    }

    /// Applies the patch, returning the merged profile.
    pub fn apply_to(&self, profile: &Profile) -> Profile {
        let mut merged = profile.clone();
        if let Some(name) = &self.name {
            merged.name = name.clone();
        }
        if let Some(categories) = &self.categories {
            merged.categories = categories.clone();
        }
        if let Some(last_modified) = self.last_modified {
            merged.last_modified = last_modified;
        }
        if let Some(starred) = self.starred {
            merged.starred = starred;
        }
        if let Some(theme) = self.theme {
            merged.theme = Some(theme);
        }
        merged
    }
}

/// CRUD persistence of profiles.
///
/// Each record is independently updatable by id. Concurrent writes to the
/// same id are last-write-wins.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// All profiles, starred first, then most recently modified first.
    async fn list(&self) -> Result<Vec<Profile>, StoreError>;

    /// Find a profile by id.
    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, StoreError>;

    /// Store a new profile. The caller assigns the id; duplicates conflict.
    async fn create(&self, profile: &Profile) -> Result<Profile, StoreError>;

    /// Apply a patch to an existing profile.
    ///
    /// # Errors
    /// `NotFound` if no record has this id; `Validation` if the merged
    /// profile is malformed.
    async fn update(&self, id: &ProfileId, patch: &ProfilePatch) -> Result<Profile, StoreError>;

    /// Delete a profile and everything it owns.
    ///
    /// # Errors
    /// `NotFound` if no record has this id.
    async fn delete(&self, id: &ProfileId) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile::new(
            ProfileId::parse("p").unwrap(),
            "Decision",
            Vec::new(),
            Timestamp::from_millis(10),
        )
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let p = profile();
        assert_eq!(ProfilePatch::default().apply_to(&p), p);
    }

    #[test]
    fn starred_patch_only_touches_flag() {
        let p = profile();
        let patched = ProfilePatch::starred(true).apply_to(&p);
        assert!(patched.starred);
        assert_eq!(patched.name, p.name);
        assert_eq!(patched.last_modified, p.last_modified);
    }

    #[test]
    fn snapshot_patch_reproduces_profile() {
        let mut source = profile();
        source.name = "Renamed".to_string();
        source.starred = true;
        source.theme = Some(Theme::Food);

        let target = ProfilePatch::snapshot(&source).apply_to(&profile());
        assert_eq!(target, source);
    }

    #[test]
    fn patch_deserializes_from_full_profile_body() {
        let body = r#"{"id": "ignored", "name": "N", "categories": [], "lastModified": 7, "starred": true}"#;
        let patch: ProfilePatch = serde_json::from_str(body).unwrap();
        assert_eq!(patch.name.as_deref(), Some("N"));
        assert_eq!(patch.last_modified, Some(Timestamp::from_millis(7)));
        assert_eq!(patch.starred, Some(true));
        assert_eq!(patch.theme, None);
    }

    #[test]
    fn store_error_codes() {
        let id = ProfileId::parse("x").unwrap();
        assert_eq!(StoreError::NotFound(id.clone()).code(), ErrorCode::ProfileNotFound);
        assert_eq!(StoreError::Conflict(id).code(), ErrorCode::Conflict);
        assert!(StoreError::unavailable("down").is_unavailable());
        assert_eq!(
            StoreError::from(ValidationError::empty_field("profile.id")).code(),
            ErrorCode::ValidationFailed
        );
    }
}
