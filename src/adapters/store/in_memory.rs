//! In-Memory Profile Store
//!
//! Keeps profiles in a shared map. Used for development, for the
//! `memory` storage backend and as the store double in tests.
//!
//! # Features
//!
//! - Offline switch that makes every call fail with `Unavailable`
//! - Simulated latency for in-flight write testing
//! - Write tracking for verification

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::decision::Profile;
use crate::domain::foundation::ProfileId;
use crate::ports::{ProfilePatch, ProfileStore, StoreError};

/// A write observed by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedWrite {
    Create(ProfileId),
    Update(ProfileId, ProfilePatch),
    Delete(ProfileId),
}

/// In-memory profile store
#[derive(Debug, Clone)]
pub struct InMemoryProfileStore {
    profiles: Arc<RwLock<HashMap<ProfileId, Profile>>>,
    offline: Arc<AtomicBool>,
    delay: Duration,
    writes: Arc<Mutex<Vec<RecordedWrite>>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self {
            profiles: Arc::new(RwLock::new(HashMap::new())),
            offline: Arc::new(AtomicBool::new(false)),
            delay: Duration::ZERO,
            writes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Store pre-populated with the given profiles.
    pub fn with_profiles(profiles: impl IntoIterator<Item = Profile>) -> Self {
        let map = profiles.into_iter().map(|p| (p.id.clone(), p)).collect();
        Self {
            profiles: Arc::new(RwLock::new(map)),
            ..Self::new()
        }
    }

    /// Delay applied to every call before it touches the map.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Simulate the store becoming unreachable (or reachable again).
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Writes seen so far, in call order. Failed offline calls are not recorded.
    pub fn writes(&self) -> Vec<RecordedWrite> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }

    /// Number of update calls seen so far.
    pub fn update_count(&self) -> usize {
        self.writes()
            .iter()
            .filter(|w| matches!(w, RecordedWrite::Update(..)))
            .count()
    }

    /// Number of stored profiles
    pub async fn len(&self) -> usize {
        self.profiles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.profiles.read().await.is_empty()
    }

    async fn enter(&self) -> Result<(), StoreError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("in-memory store is offline"));
        }
        Ok(())
    }

    fn record(&self, write: RecordedWrite) {
        if let Ok(mut writes) = self.writes.lock() {
            writes.push(write);
        }
    }
}

impl Default for InMemoryProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn list(&self) -> Result<Vec<Profile>, StoreError> {
        self.enter().await?;
        let mut profiles: Vec<Profile> = self.profiles.read().await.values().cloned().collect();
        Profile::sort_for_display(&mut profiles);
        Ok(profiles)
    }

    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, StoreError> {
        self.enter().await?;
        Ok(self.profiles.read().await.get(id).cloned())
    }

    async fn create(&self, profile: &Profile) -> Result<Profile, StoreError> {
        self.enter().await?;
        profile.validate()?;

        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(&profile.id) {
            return Err(StoreError::Conflict(profile.id.clone()));
        }
        profiles.insert(profile.id.clone(), profile.clone());
        self.record(RecordedWrite::Create(profile.id.clone()));
        Ok(profile.clone())
    }

    async fn update(&self, id: &ProfileId, patch: &ProfilePatch) -> Result<Profile, StoreError> {
        self.enter().await?;

        let mut profiles = self.profiles.write().await;
        let existing = profiles
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        let merged = patch.apply_to(existing);
        merged.validate()?;

        profiles.insert(id.clone(), merged.clone());
        self.record(RecordedWrite::Update(id.clone(), patch.clone()));
        Ok(merged)
    }

    async fn delete(&self, id: &ProfileId) -> Result<(), StoreError> {
        self.enter().await?;
        self.profiles
            .write()
            .await
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        self.record(RecordedWrite::Delete(id.clone()));
        Ok(())
    }
}
