//! PreferenceStore - owner of the live PreferenceSnapshot.
//!
//! The store keeps the snapshot in memory and writes it through to a
//! `MemoryStorage` port:
//!
//! - `hydrate` reads the durable record once. Until it completes no write is
//!   issued; updates made meanwhile are kept and replayed over whatever was
//!   loaded.
//! - `update` merges a patch immediately and schedules a debounced write. A
//!   newer update aborts the pending write task and schedules a fresh one, so a
//!   burst of edits costs one write of the final state.
//! - Storage failures never surface as errors. They are recorded as a
//!   [`StoreNotice`] and the in-memory snapshot stays authoritative.
//!
//! Must be used from within a Tokio runtime.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde_json::Value;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::domain::foundation::ValidationError;
use crate::domain::memory::{PreferencePatch, PreferenceSnapshot, SetupForm};
use crate::ports::{MemoryStorage, StorageError};

/// Delay between the last update and the durable write.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(350);

/// Last storage problem the store ran into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreNotice {
    /// The stored record did not decode and was deleted.
    CorruptRecordReset,
    /// The stored record could not be read.
    ReadFailed(String),
    /// A debounced or flushed write failed.
    WriteFailed(String),
    /// Deleting the record during reset failed.
    DeleteFailed(String),
}

impl StoreNotice {
    /// Text suitable for showing to the user.
    pub fn message(&self) -> &'static str {
        match self {
            StoreNotice::CorruptRecordReset => {
                "Saved memory could not be read and was reset to defaults."
            }
            StoreNotice::ReadFailed(_) => "Saved memory could not be loaded; using defaults for now.",
            StoreNotice::WriteFailed(_) => {
                "Memory could not be saved; changes are kept for this session only."
            }
            StoreNotice::DeleteFailed(_) => "Saved memory could not be cleared.",
        }
    }

    /// Underlying storage error, when there is one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            StoreNotice::CorruptRecordReset => None,
            StoreNotice::ReadFailed(d) | StoreNotice::WriteFailed(d) | StoreNotice::DeleteFailed(d) => {
                Some(d)
            }
        }
    }
}

impl std::fmt::Display for StoreNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.detail() {
            Some(detail) => write!(f, "{} ({})", self.message(), detail),
            None => f.write_str(self.message()),
        }
    }
}

/// Observable state of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStatus {
    pub hydrated: bool,
    /// Still waiting on the first read, with nothing to report yet.
    pub loading: bool,
    pub notice: Option<StoreNotice>,
}

#[derive(Debug, Default)]
struct StoreState {
    snapshot: PreferenceSnapshot,
    hydrated: bool,
    hydrating: bool,
    /// Patches applied before hydration, replayed over the loaded record.
    early_patches: Vec<PreferencePatch>,
    /// A reset happened before hydration; the loaded record is stale.
    discard_loaded: bool,
    pending_write: Option<JoinHandle<()>>,
    version: u64,
    persisted_version: u64,
    notice: Option<StoreNotice>,
}

impl StoreState {
    fn is_dirty(&self) -> bool {
        self.version != self.persisted_version
    }

    fn cancel_pending_write(&mut self) {
        if let Some(handle) = self.pending_write.take() {
            handle.abort();
        }
    }
}

struct StoreInner {
    storage: Arc<dyn MemoryStorage>,
    debounce: Duration,
    state: Mutex<StoreState>,
}

impl StoreInner {
    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Writes the current snapshot. The lock is released before awaiting.
    async fn write_latest(&self) {
        let (snapshot, version) = {
            let state = self.state();
            (state.snapshot.clone(), state.version)
        };

        let outcome = match serde_json::to_string(&snapshot) {
            Ok(record) => self.storage.save(&record).await,
            Err(err) => Err(err.into()),
        };

        let mut state = self.state();
        match outcome {
            Ok(()) => {
                state.persisted_version = state.persisted_version.max(version);
                if matches!(state.notice, Some(StoreNotice::WriteFailed(_))) {
                    state.notice = None;
                }
                tracing::debug!(version, "Preferences written");
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to write preferences");
                state.notice = Some(StoreNotice::WriteFailed(err.to_string()));
            }
        }
    }
}

/// Service owning the user's relationship context.
///
/// Cheap to clone; clones share the same snapshot.
#[derive(Clone)]
pub struct PreferenceStore {
    inner: Arc<StoreInner>,
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceStore")
            .field("debounce", &self.inner.debounce)
            .field("status", &self.status())
            .finish()
    }
}

impl PreferenceStore {
    /// Creates a store with default state and the standard debounce.
    pub fn new(storage: Arc<dyn MemoryStorage>) -> Self {
        Self::with_debounce(storage, DEFAULT_DEBOUNCE)
    }

    /// Creates a store with a custom debounce delay.
    pub fn with_debounce(storage: Arc<dyn MemoryStorage>, debounce: Duration) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                storage,
                debounce,
                state: Mutex::new(StoreState::default()),
            }),
        }
    }

    /// Loads the durable record. Runs once; later calls return immediately.
    pub async fn hydrate(&self) {
        {
            let mut state = self.inner.state();
            if state.hydrated || state.hydrating {
                return;
            }
            state.hydrating = true;
        }

        let (loaded, notice) = self.read_record().await;

        let mut state = self.inner.state();
        let mut snapshot = if state.discard_loaded {
            PreferenceSnapshot::default()
        } else {
            loaded
        };
        let early = std::mem::take(&mut state.early_patches);
        for patch in &early {
            snapshot.apply(patch);
        }

        state.snapshot = snapshot;
        state.hydrated = true;
        state.hydrating = false;
        state.discard_loaded = false;
        if notice.is_some() {
            state.notice = notice;
        }

        tracing::debug!(
            replayed = early.len(),
            setup_complete = state.snapshot.is_setup_complete,
            "Preferences hydrated"
        );

        if early.is_empty() {
            state.persisted_version = state.version;
        } else {
            self.schedule_write(&mut state);
        }
    }

    async fn read_record(&self) -> (PreferenceSnapshot, Option<StoreNotice>) {
        let raw = match self.inner.storage.load().await {
            Ok(Some(raw)) => raw,
            Ok(None) => return (PreferenceSnapshot::default(), None),
            Err(StorageError::Undecodable(reason)) => {
                tracing::warn!(%reason, "Stored preferences are not text, resetting");
                return self.discard_corrupt().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to read stored preferences");
                return (
                    PreferenceSnapshot::default(),
                    Some(StoreNotice::ReadFailed(err.to_string())),
                );
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(record)) => (PreferenceSnapshot::from_stored(&record), None),
            _ => {
                tracing::warn!(len = raw.len(), "Stored preferences are corrupt, resetting");
                self.discard_corrupt().await
            }
        }
    }

    async fn discard_corrupt(&self) -> (PreferenceSnapshot, Option<StoreNotice>) {
        if let Err(err) = self.inner.storage.remove().await {
            tracing::warn!(error = %err, "Failed to delete corrupt preferences");
        }
        (
            PreferenceSnapshot::default(),
            Some(StoreNotice::CorruptRecordReset),
        )
    }

    /// Current snapshot.
    pub fn get(&self) -> PreferenceSnapshot {
        self.inner.state().snapshot.clone()
    }

    /// Merges a patch now and schedules a durable write.
    pub fn update(&self, patch: PreferencePatch) {
        if patch.is_empty() {
            return;
        }

        let mut state = self.inner.state();
        state.snapshot.apply(&patch);
        state.version += 1;

        if state.hydrated {
            self.schedule_write(&mut state);
        } else {
            state.early_patches.push(patch);
        }
    }

    /// Applies a validated setup form and unlocks normal use.
    pub fn complete_setup(&self, form: SetupForm) -> Result<(), ValidationError> {
        let patch = form.into_patch()?;
        self.update(patch);
        Ok(())
    }

    /// Marks setup as done without touching any other field.
    pub fn skip_setup(&self) {
        self.update(PreferencePatch::new().with_setup_complete(true));
    }

    /// Restores defaults immediately, then deletes the durable record.
    pub async fn reset(&self) {
        {
            let mut state = self.inner.state();
            state.cancel_pending_write();
            state.snapshot = PreferenceSnapshot::default();
            state.early_patches.clear();
            state.notice = None;
            if !state.hydrated {
                state.discard_loaded = true;
            }
            state.version += 1;
            state.persisted_version = state.version;
        }

        if let Err(err) = self.inner.storage.remove().await {
            tracing::warn!(error = %err, "Failed to delete stored preferences");
            self.inner.state().notice = Some(StoreNotice::DeleteFailed(err.to_string()));
        }
    }

    /// Cancels the pending debounce and writes now if anything is unsaved.
    ///
    /// Does nothing before hydration.
    pub async fn flush(&self) {
        {
            let mut state = self.inner.state();
            state.cancel_pending_write();
            if !state.hydrated || !state.is_dirty() {
                return;
            }
        }
        self.inner.write_latest().await;
    }

    /// Whether hydration has completed.
    pub fn is_hydrated(&self) -> bool {
        self.inner.state().hydrated
    }

    /// Last storage notice, if any.
    pub fn notice(&self) -> Option<StoreNotice> {
        self.inner.state().notice.clone()
    }

    /// Hydration and notice state together.
    pub fn status(&self) -> StoreStatus {
        let state = self.inner.state();
        StoreStatus {
            hydrated: state.hydrated,
            loading: !state.hydrated && state.notice.is_none(),
            notice: state.notice.clone(),
        }
    }

    fn schedule_write(&self, state: &mut StoreState) {
        state.cancel_pending_write();

        let Ok(runtime) = Handle::try_current() else {
            tracing::warn!("No async runtime available, write not scheduled");
            state.notice = Some(StoreNotice::WriteFailed(
                "no async runtime available".to_string(),
            ));
            return;
        };

        let inner = Arc::clone(&self.inner);
        let delay = inner.debounce;
        state.pending_write = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            inner.write_latest().await;
        }));
    }
}
