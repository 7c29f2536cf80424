//! DebouncedWriter - coalesces rapid edits into one durable write.
//!
//! A background task owns a single pending-write slot fed by a channel of
//! write intents:
//!
//! 1. An intent stores its snapshot in the slot and (re)arms the timer
//! 2. A later intent replaces the snapshot and re-arms the timer
//! 3. When the timer fires, the latest snapshot is written once
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `window` | 1000ms | Quiescence required before a write |
//!
//! ## Cancellation
//!
//! Closing the writer (or dropping it) discards the pending snapshot. A
//! write already in flight runs to completion but its outcome is not
//! published.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, warn};

use super::library::{ProfileLibrary, SaveOutcome};
use crate::domain::decision::Profile;

/// Outcome of the most recent write, as seen by the editor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SaveStatus {
    /// Nothing written yet.
    #[default]
    Idle,
    /// A snapshot is waiting for the window to elapse.
    Pending,
    /// The last write reached the durable store.
    Saved,
    /// The last write only reached the local cache.
    LocalOnly,
    /// The last write was rejected.
    Failed(String),
}

/// Configuration for the DebouncedWriter.
#[derive(Debug, Clone)]
pub struct DebounceConfig {
    /// Quiescence window before the pending snapshot is written.
    pub window: Duration,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_millis(1000),
        }
    }
}

impl DebounceConfig {
    /// Create config with a custom window.
    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }
}

#[derive(Debug)]
enum WriteIntent {
    /// Replace the pending snapshot and re-arm the timer.
    Schedule(Profile),
    /// Replace the pending snapshot, if any, keeping the current deadline.
    Refresh(Profile),
}

/// Handle to the debounce task of one editing session.
pub struct DebouncedWriter {
    intents: Option<mpsc::UnboundedSender<WriteIntent>>,
    status: Arc<watch::Sender<SaveStatus>>,
    closed: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl DebouncedWriter {
    /// Spawn the debounce task on the current tokio runtime.
    pub fn spawn(library: Arc<ProfileLibrary>, config: DebounceConfig) -> Self {
        let (intents, rx) = mpsc::unbounded_channel();
        let (status, _) = watch::channel(SaveStatus::Idle);
        let status = Arc::new(status);
        let closed = Arc::new(AtomicBool::new(false));

        let task = tokio::spawn(run(
            library,
            config.window,
            rx,
            Arc::clone(&status),
            Arc::clone(&closed),
        ));

        Self {
            intents: Some(intents),
            status,
            closed,
            task,
        }
    }

    /// Queue a snapshot for writing once edits go quiet.
    pub fn schedule(&self, profile: Profile) {
        if self.send(WriteIntent::Schedule(profile)) {
            self.status.send_replace(SaveStatus::Pending);
        }
    }

    /// Swap in a newer snapshot for a pending write without delaying it.
    pub fn refresh(&self, profile: Profile) {
        self.send(WriteIntent::Refresh(profile));
    }

    /// Subscribe to save status changes.
    pub fn status(&self) -> watch::Receiver<SaveStatus> {
        self.status.subscribe()
    }

    /// Cancel any pending write and stop publishing outcomes.
    pub fn close(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
        self.intents.take();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// True once the background task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    fn send(&self, intent: WriteIntent) -> bool {
        match &self.intents {
            Some(tx) => tx.send(intent).is_ok(),
            None => false,
        }
    }
}

impl Drop for DebouncedWriter {
    fn drop(&mut self) {
        self.close();
    }
}

async fn run(
    library: Arc<ProfileLibrary>,
    window: Duration,
    mut intents: mpsc::UnboundedReceiver<WriteIntent>,
    status: Arc<watch::Sender<SaveStatus>>,
    closed: Arc<AtomicBool>,
) {
    let mut pending: Option<Profile> = None;
    let timer = time::sleep(window);
    tokio::pin!(timer);

    loop {
        // Intents first: a close racing the deadline must win over the write.
        tokio::select! {
            biased;

            intent = intents.recv() => {
                // Channel closed: the session ended, drop whatever is pending.
                let Some(intent) = intent else { break };
                if closed.load(Ordering::SeqCst) {
                    break;
                }
                match intent {
                    WriteIntent::Schedule(profile) => {
                        pending = Some(profile);
                        timer.as_mut().reset(Instant::now() + window);
                    }
                    WriteIntent::Refresh(profile) => {
                        if pending.is_some() {
                            pending = Some(profile);
                        }
                    }
                }
            }

            () = &mut timer, if pending.is_some() => {
                if closed.load(Ordering::SeqCst) {
                    break;
                }
                let Some(profile) = pending.take() else { continue };
                debug!(profile_id = %profile.id, "Debounce window elapsed, writing snapshot");

                let result = library.save(&profile).await;
                if closed.load(Ordering::SeqCst) {
                    debug!(profile_id = %profile.id, "Session closed during write, discarding outcome");
                    break;
                }

                let next = match result {
                    Ok(SaveOutcome::Durable) => SaveStatus::Saved,
                    Ok(SaveOutcome::LocalOnly) => SaveStatus::LocalOnly,
                    Err(e) => {
                        warn!(profile_id = %profile.id, error = %e, "Failed to save profile");
                        SaveStatus::Failed(e.to_string())
                    }
                };
                // A newer intent queued during the write keeps the status pending.
                if pending.is_none() && intents.is_empty() {
                    status.send_replace(next);
                }
            }
        }
    }
}
