//! EditingContext - one open decision and its persistence.

use std::sync::Arc;
use tokio::sync::watch;

use super::debounce::{DebounceConfig, DebouncedWriter, SaveStatus};
use super::library::{LibraryError, ProfileLibrary, SaveOutcome};
use crate::domain::analysis::{Scale, ScaleMapper, ScoredCategory, Scorer};
use crate::domain::decision::{apply_edit, Profile, ProfileMutation};
use crate::domain::foundation::Timestamp;

/// Owns the snapshot of the profile being edited.
///
/// Edits apply synchronously and are persisted through a debounced
/// writer. Scores and the scale are derived on every read.
pub struct EditingContext {
    profile: Profile,
    library: Arc<ProfileLibrary>,
    writer: DebouncedWriter,
}

impl EditingContext {
    /// Open a profile for editing. Must be called inside a tokio runtime.
    pub fn open(profile: Profile, library: Arc<ProfileLibrary>, config: DebounceConfig) -> Self {
        let writer = DebouncedWriter::spawn(Arc::clone(&library), config);
        Self {
            profile,
            library,
            writer,
        }
    }

    /// Current snapshot.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Apply an edit now and schedule the new snapshot for writing.
    pub fn apply(&mut self, mutation: ProfileMutation) -> &Profile {
        self.apply_at(mutation, Timestamp::now())
    }

    /// Like [`apply`](Self::apply) with an explicit edit time.
    pub fn apply_at(&mut self, mutation: ProfileMutation, now: Timestamp) -> &Profile {
        self.profile = apply_edit(&self.profile, mutation, now);
        self.writer.schedule(self.profile.clone());
        &self.profile
    }

    pub fn scored(&self) -> Vec<ScoredCategory> {
        Scorer::score_all(&self.profile.categories)
    }

    pub fn scale(&self) -> Scale {
        ScaleMapper::map(&self.scored())
    }

    /// Flip the starred flag and persist it immediately.
    ///
    /// A pending debounced snapshot is refreshed first so it cannot write
    /// the old flag back.
    pub async fn toggle_star(&mut self) -> Result<SaveOutcome, LibraryError> {
        self.profile.starred = !self.profile.starred;
        self.writer.refresh(self.profile.clone());
        self.library
            .set_starred(&self.profile, self.profile.starred)
            .await
    }

    /// Subscribe to the outcome of debounced writes.
    pub fn save_status(&self) -> watch::Receiver<SaveStatus> {
        self.writer.status()
    }

    /// End the session, discarding any pending write.
    pub fn close(&mut self) {
        self.writer.close();
    }

    pub fn is_closed(&self) -> bool {
        self.writer.is_closed()
    }
}
