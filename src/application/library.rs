//! ProfileLibrary - the client's view of saved decisions.
//!
//! Wraps a durable `ProfileStore` and a `LocalCache`. While the store is
//! reachable the cache mirrors it; while it is not, reads and writes fall
//! back to the cache so editing is never blocked.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::decision::{create_from_template, Category, Profile};
use crate::domain::foundation::{ErrorCode, ProfileId, Timestamp};
use crate::ports::{
    CacheError, LocalCache, ProfilePatch, ProfileStore, StoreError, LEGACY_CATEGORIES_KEY,
    PROFILES_KEY,
};

/// Id given to the profile built from legacy single-decision data.
pub const LEGACY_PROFILE_ID: &str = "legacy-migrated";

/// Name given to the profile built from legacy single-decision data.
pub const LEGACY_PROFILE_NAME: &str = "My Previous Decision";

/// Where a write ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Accepted by the durable store.
    Durable,
    /// The store was unreachable; the change only exists in the local cache.
    LocalOnly,
}

/// Errors surfaced to callers of the library.
///
/// Store connectivity failures never appear here; they degrade to the cache.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Local cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Failed to encode cached profiles: {0}")]
    Encode(#[from] serde_json::Error),
}

impl LibraryError {
    pub fn code(&self) -> ErrorCode {
        match self {
            LibraryError::Store(e) => e.code(),
            LibraryError::Cache(_) | LibraryError::Encode(_) => ErrorCode::CacheError,
        }
    }
}

/// Profile collection with local fallback.
pub struct ProfileLibrary {
    store: Arc<dyn ProfileStore>,
    cache: Arc<dyn LocalCache>,
}

impl ProfileLibrary {
    pub fn new(store: Arc<dyn ProfileStore>, cache: Arc<dyn LocalCache>) -> Self {
        Self { store, cache }
    }

    /// All profiles in listing order.
    ///
    /// Lists from the store and mirrors the result into the cache; reads
    /// the cache when the store is unavailable. Legacy data found in the
    /// cache is migrated into a profile and included.
    pub async fn load(&self) -> Result<Vec<Profile>, LibraryError> {
        let mut profiles = match self.store.list().await {
            Ok(profiles) => {
                if let Err(e) = self.write_cache(&profiles).await {
                    warn!(error = %e, "Failed to mirror profiles into local cache");
                }
                profiles
            }
            Err(e) if e.is_unavailable() => {
                warn!(error = %e, "Profile store unavailable, loading from local cache");
                self.read_cache().await?
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(migrated) = self.migrate_legacy(Timestamp::now()).await? {
            profiles.retain(|p| p.id != migrated.id);
            profiles.push(migrated);
        }

        Profile::sort_for_display(&mut profiles);
        Ok(profiles)
    }

    /// Build a profile from a catalog template and persist it.
    ///
    /// Unknown template ids produce the blank decision.
    pub async fn create_from_template(
        &self,
        template_id: &str,
    ) -> Result<(Profile, SaveOutcome), LibraryError> {
        let mut profile = create_from_template(template_id, Timestamp::now());
        profile.id = ProfileId::new();

        let outcome = self.create(&profile).await?;
        info!(profile_id = %profile.id, template = template_id, ?outcome, "Created profile");
        Ok((profile, outcome))
    }

    /// Persist a new profile, keeping it locally if the store is unreachable.
    pub async fn create(&self, profile: &Profile) -> Result<SaveOutcome, LibraryError> {
        match self.store.create(profile).await {
            Ok(created) => {
                self.mirror(&created).await;
                Ok(SaveOutcome::Durable)
            }
            Err(e) if e.is_unavailable() => {
                warn!(profile_id = %profile.id, error = %e, "Store unavailable, keeping new profile locally");
                self.cache_upsert(profile).await?;
                Ok(SaveOutcome::LocalOnly)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write a full snapshot of the profile.
    pub async fn save(&self, profile: &Profile) -> Result<SaveOutcome, LibraryError> {
        debug!(profile_id = %profile.id, "Saving profile snapshot");
        self.write_patch(profile, &ProfilePatch::snapshot(profile))
            .await
    }

    /// Star or unstar a profile immediately.
    ///
    /// `profile` is the caller's current snapshot, used for the cached copy
    /// when the store is unreachable.
    pub async fn set_starred(
        &self,
        profile: &Profile,
        starred: bool,
    ) -> Result<SaveOutcome, LibraryError> {
        let mut local = profile.clone();
        local.starred = starred;
        self.write_patch(&local, &ProfilePatch::starred(starred))
            .await
    }

    /// Delete a profile from the store and from the cache.
    pub async fn delete(&self, id: &ProfileId) -> Result<SaveOutcome, LibraryError> {
        let outcome = match self.store.delete(id).await {
            Ok(()) => SaveOutcome::Durable,
            Err(e) if e.is_unavailable() => {
                warn!(profile_id = %id, error = %e, "Store unavailable, deleting locally only");
                SaveOutcome::LocalOnly
            }
            Err(e) => return Err(e.into()),
        };
        self.cache_remove(id).await?;
        Ok(outcome)
    }

    async fn write_patch(
        &self,
        local: &Profile,
        patch: &ProfilePatch,
    ) -> Result<SaveOutcome, LibraryError> {
        match self.store.update(&local.id, patch).await {
            Ok(updated) => {
                self.mirror(&updated).await;
                Ok(SaveOutcome::Durable)
            }
            Err(e) if e.is_unavailable() => {
                warn!(profile_id = %local.id, error = %e, "Store unavailable, saved to local cache only");
                self.cache_upsert(local).await?;
                Ok(SaveOutcome::LocalOnly)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Keeps the cache in step with a durable write. Failures are not fatal.
    async fn mirror(&self, profile: &Profile) {
        if let Err(e) = self.cache_upsert(profile).await {
            warn!(profile_id = %profile.id, error = %e, "Failed to update local cache");
        }
    }

    /// Cached profiles. A corrupt cache entry reads as empty.
    async fn read_cache(&self) -> Result<Vec<Profile>, LibraryError> {
        let Some(raw) = self.cache.get(PROFILES_KEY).await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<Profile>>(&raw) {
            Ok(profiles) => Ok(profiles),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable cached profiles");
                Ok(Vec::new())
            }
        }
    }

    async fn write_cache(&self, profiles: &[Profile]) -> Result<(), LibraryError> {
        let json = serde_json::to_string(profiles)?;
        self.cache.set(PROFILES_KEY, &json).await?;
        Ok(())
    }

    async fn cache_upsert(&self, profile: &Profile) -> Result<(), LibraryError> {
        let mut profiles = self.read_cache().await?;
        match profiles.iter_mut().find(|p| p.id == profile.id) {
            Some(existing) => *existing = profile.clone(),
            None => profiles.push(profile.clone()),
        }
        self.write_cache(&profiles).await
    }

    async fn cache_remove(&self, id: &ProfileId) -> Result<(), LibraryError> {
        let mut profiles = self.read_cache().await?;
        let before = profiles.len();
        profiles.retain(|p| &p.id != id);
        if profiles.len() != before {
            self.write_cache(&profiles).await?;
        }
        Ok(())
    }

    /// Turns legacy single-decision data into a profile, once.
    ///
    /// The legacy key is removed only after the profile has been stored
    /// (durably or in the cache). Unparseable legacy data is left in place.
    async fn migrate_legacy(&self, now: Timestamp) -> Result<Option<Profile>, LibraryError> {
        let Some(raw) = self.cache.get(LEGACY_CATEGORIES_KEY).await? else {
            return Ok(None);
        };

        let categories: Vec<Category> = match serde_json::from_str(&raw) {
            Ok(categories) => categories,
            Err(e) => {
                warn!(error = %e, "Legacy decision data is unreadable, leaving it in place");
                return Ok(None);
            }
        };

        let id = ProfileId::parse(LEGACY_PROFILE_ID).map_err(StoreError::from)?;
        let profile = Profile::new(id, LEGACY_PROFILE_NAME, categories, now);
        if let Err(e) = profile.validate() {
            warn!(error = %e, "Legacy decision data is invalid, leaving it in place");
            return Ok(None);
        }

        let profile = match self.create(&profile).await {
            Ok(_) => profile,
            // Migrated by an earlier run whose key removal failed.
            Err(LibraryError::Store(StoreError::Conflict(_))) => {
                info!("Legacy profile already migrated");
                self.cache.remove(LEGACY_CATEGORIES_KEY).await?;
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        self.cache.remove(LEGACY_CATEGORIES_KEY).await?;
        info!(categories = profile.categories.len(), "Migrated legacy decision data");
        Ok(Some(profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::cache::InMemoryLocalCache;
    use crate::adapters::store::InMemoryProfileStore;
    use crate::domain::decision::Theme;

    fn library(store: &InMemoryProfileStore, cache: &InMemoryLocalCache) -> ProfileLibrary {
        ProfileLibrary::new(Arc::new(store.clone()), Arc::new(cache.clone()))
    }

    fn stored_profile(id: &str, modified: i64) -> Profile {
        let mut profile = create_from_template("food", Timestamp::from_millis(modified));
        profile.id = ProfileId::parse(id).unwrap();
        profile
    }

    async fn cached(cache: &InMemoryLocalCache) -> Vec<Profile> {
        let raw = cache.get(PROFILES_KEY).await.unwrap().unwrap_or_else(|| "[]".into());
        serde_json::from_str(&raw).unwrap()
    }

    #[tokio::test]
    async fn load_mirrors_store_into_cache() {
        let store = InMemoryProfileStore::with_profiles(vec![stored_profile("a", 1)]);
        let cache = InMemoryLocalCache::new();

        let loaded = library(&store, &cache).load().await.unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(cached(&cache).await, loaded);
    }

    #[tokio::test]
    async fn load_falls_back_to_cache_when_store_offline() {
        let store = InMemoryProfileStore::new();
        let cache = InMemoryLocalCache::with_entry(
            PROFILES_KEY,
            serde_json::to_string(&vec![stored_profile("cached", 5)]).unwrap(),
        );
        store.set_offline(true);

        let loaded = library(&store, &cache).load().await.unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id.as_str(), "cached");
    }

    #[tokio::test]
    async fn load_with_corrupt_cache_while_offline_is_empty() {
        let store = InMemoryProfileStore::new();
        let cache = InMemoryLocalCache::with_entry(PROFILES_KEY, "{not json");
        store.set_offline(true);

        assert!(library(&store, &cache).load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn load_migrates_legacy_data_once() {
        let store = InMemoryProfileStore::new();
        let legacy = r#"[{"id": "1", "name": "Stay", "pros": [{"id": "f1", "description": "Cheap", "weight": 3}], "cons": []}]"#;
        let cache = InMemoryLocalCache::with_entry(LEGACY_CATEGORIES_KEY, legacy);
        let lib = library(&store, &cache);

        let loaded = lib.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id.as_str(), LEGACY_PROFILE_ID);
        assert_eq!(loaded[0].name, LEGACY_PROFILE_NAME);
        assert_eq!(loaded[0].categories[0].pros[0].weight.value(), 3);
        assert!(!cache.contains_key(LEGACY_CATEGORIES_KEY).await);

        let reloaded = lib.load().await.unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn unreadable_legacy_data_is_left_in_place() {
        let store = InMemoryProfileStore::new();
        let cache = InMemoryLocalCache::with_entry(LEGACY_CATEGORIES_KEY, "garbage");

        let loaded = library(&store, &cache).load().await.unwrap();

        assert!(loaded.is_empty());
        assert!(cache.contains_key(LEGACY_CATEGORIES_KEY).await);
    }

    #[tokio::test]
    async fn create_from_template_assigns_fresh_id() {
        let store = InMemoryProfileStore::new();
        let cache = InMemoryLocalCache::new();
        let lib = library(&store, &cache);

        let (first, outcome) = lib.create_from_template("job").await.unwrap();
        let (second, _) = lib.create_from_template("job").await.unwrap();

        assert_eq!(outcome, SaveOutcome::Durable);
        assert_ne!(first.id, second.id);
        assert_eq!(first.theme, Some(Theme::Job));
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn create_offline_keeps_profile_locally() {
        let store = InMemoryProfileStore::new();
        let cache = InMemoryLocalCache::new();
        store.set_offline(true);

        let (profile, outcome) = library(&store, &cache)
            .create_from_template("unknown")
            .await
            .unwrap();

        assert_eq!(outcome, SaveOutcome::LocalOnly);
        assert_eq!(cached(&cache).await, vec![profile]);
    }

    #[tokio::test]
    async fn save_offline_degrades_to_cache() {
        let store = InMemoryProfileStore::with_profiles(vec![stored_profile("a", 1)]);
        let cache = InMemoryLocalCache::new();
        let lib = library(&store, &cache);
        let mut edited = stored_profile("a", 1);
        edited.name = "Edited offline".into();

        store.set_offline(true);
        assert_eq!(lib.save(&edited).await.unwrap(), SaveOutcome::LocalOnly);
        assert_eq!(cached(&cache).await[0].name, "Edited offline");

        store.set_offline(false);
        assert_eq!(lib.save(&edited).await.unwrap(), SaveOutcome::Durable);
        let stored = store.find_by_id(&edited.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Edited offline");
    }

    #[tokio::test]
    async fn save_of_missing_profile_is_not_found() {
        let store = InMemoryProfileStore::new();
        let cache = InMemoryLocalCache::new();

        let err = library(&store, &cache)
            .save(&stored_profile("ghost", 1))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ProfileNotFound);
    }

    #[tokio::test]
    async fn set_starred_patches_only_the_flag() {
        let store = InMemoryProfileStore::with_profiles(vec![stored_profile("a", 1)]);
        let cache = InMemoryLocalCache::new();
        let mut stale = stored_profile("a", 1);
        stale.name = "Unsaved name".into();

        library(&store, &cache).set_starred(&stale, true).await.unwrap();

        let stored = store.find_by_id(&stale.id).await.unwrap().unwrap();
        assert!(stored.starred);
        assert_ne!(stored.name, "Unsaved name");
    }

    #[tokio::test]
    async fn delete_removes_from_store_and_cache() {
        let store = InMemoryProfileStore::with_profiles(vec![stored_profile("a", 1)]);
        let cache = InMemoryLocalCache::new();
        let lib = library(&store, &cache);
        lib.load().await.unwrap();

        let id = ProfileId::parse("a").unwrap();
        assert_eq!(lib.delete(&id).await.unwrap(), SaveOutcome::Durable);
        assert!(store.is_empty().await);
        assert!(cached(&cache).await.is_empty());
    }
}
