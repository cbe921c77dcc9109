// State management module
//
// This module provides the FormManager which wraps FormState with thread-safe access
// using Arc<RwLock<T>>, regenerates the password whenever the Configuration changes,
// and emits change events for GUI updates.

use crate::metrics::Metrics;
use crate::models::{
    CopyStatus, DEFAULT_COPY_RESET_DELAY, FormState, GeneratorConfig, PasswordLength,
};
use crate::services::clipboard::ClipboardSink;
use crate::services::generator;
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Change events emitted when form state is modified
#[derive(Clone, Debug, PartialEq)]
pub enum FormChange {
    /// Length or one of the inclusion flags changed
    ConfigurationChanged { config: GeneratorConfig },

    /// A new password replaced the previous one
    PasswordGenerated { length: usize },

    /// The copy button switched between `Copy` and `Copied!`
    CopyStatusChanged { status: CopyStatus },
}

/// Thread-safe owner of the password form state
///
/// This is the central state component that:
/// - Provides thread-safe access to [`FormState`] via `Arc<RwLock<T>>`
/// - Regenerates the password synchronously after every Configuration setter
/// - Runs the copy-status revert timer on the tokio runtime
/// - Emits [`FormChange`] events through a tokio broadcast channel
///
/// # Copy status timer
///
/// Only one revert is ever pending. Each successful copy aborts the previous
/// revert task and schedules a new one, so `Copied!` is shown until the reset
/// delay has elapsed since the most recent copy.
///
/// # Related Types
///
/// - [`crate::models::FormState`]: The underlying state structure
/// - [`FormChange`]: Event types emitted on state mutations
/// - [`crate::ui::controller::GuiController`]: Primary consumer of state events
pub struct FormManager {
    state: Arc<RwLock<FormState>>,

    /// Broadcast channel for emitting state change events
    state_tx: broadcast::Sender<FormChange>,

    /// Pending copy-status revert, if any
    copy_reset_task: Arc<Mutex<Option<JoinHandle<()>>>>,

    copy_reset_delay: Duration,

    /// Runtime the revert timer is spawned on
    runtime: tokio::runtime::Handle,

    metrics: Arc<Metrics>,
}

impl FormManager {
    /// Create a manager for `config` and generate the initial password
    ///
    /// # Arguments
    /// * `config` - Configuration shown at first render
    /// * `runtime` - Handle used to spawn the copy-status revert timer
    pub fn new(config: GeneratorConfig, runtime: tokio::runtime::Handle) -> Self {
        Self::with_metrics(config, runtime, Arc::new(Metrics::new()))
    }

    /// Like [`new`](Self::new), recording into shared metrics
    pub fn with_metrics(
        config: GeneratorConfig,
        runtime: tokio::runtime::Handle,
        metrics: Arc<Metrics>,
    ) -> Self {
        let (state_tx, _) = broadcast::channel(100);
        let manager = Self {
            state: Arc::new(RwLock::new(FormState::with_config(config))),
            state_tx,
            copy_reset_task: Arc::new(Mutex::new(None)),
            copy_reset_delay: DEFAULT_COPY_RESET_DELAY,
            runtime,
            metrics,
        };

        manager.regenerate();
        manager
    }

    /// Override how long `Copied!` stays visible
    pub fn with_copy_reset_delay(mut self, delay: Duration) -> Self {
        self.copy_reset_delay = delay;
        self
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    pub fn copy_reset_delay(&self) -> Duration {
        self.copy_reset_delay
    }

    /// Get a read-only snapshot of the current state
    pub fn snapshot(&self) -> FormState {
        self.read_guard().clone()
    }

    /// Execute a function with read access to the state
    ///
    /// # Example
    /// ```ignore
    /// let length = form.read(|state| state.config.length);
    /// ```
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&FormState) -> R,
    {
        f(&self.read_guard())
    }

    pub fn password(&self) -> String {
        self.read(|s| s.password.clone())
    }

    pub fn config(&self) -> GeneratorConfig {
        self.read(|s| s.config)
    }

    pub fn copy_status(&self) -> CopyStatus {
        self.read(|s| s.copy_status)
    }

    /// Subscribe to state change events
    pub fn subscribe(&self) -> broadcast::Receiver<FormChange> {
        self.state_tx.subscribe()
    }

    /// Replace the password using the current Configuration
    pub fn regenerate(&self) -> Vec<FormChange> {
        let changes = self.update(|state| {
            state.password = generator::generate(&state.config);
        });
        self.metrics.record_password_generated();
        tracing::debug!("Password regenerated");
        changes
    }

    /// Set the password length, pinned into the slider's range
    pub fn set_length(&self, length: usize) -> Vec<FormChange> {
        let clamped = PasswordLength::clamped(length);
        if clamped.get() != length {
            tracing::warn!("Length {} out of range, clamped to {}", length, clamped);
        }
        self.apply_configuration(|config| config.length = clamped)
    }

    pub fn set_include_digits(&self, include_digits: bool) -> Vec<FormChange> {
        self.apply_configuration(|config| config.include_digits = include_digits)
    }

    pub fn set_include_symbols(&self, include_symbols: bool) -> Vec<FormChange> {
        self.apply_configuration(|config| config.include_symbols = include_symbols)
    }

    /// Replace the whole Configuration at once
    pub fn set_config(&self, new_config: GeneratorConfig) -> Vec<FormChange> {
        self.apply_configuration(|config| *config = new_config)
    }

    /// Copy the current password through `sink`
    ///
    /// Does nothing when no password exists. Otherwise writes the password,
    /// switches the copy status to [`CopyStatus::Copied`] and (re)starts the
    /// revert timer. Clipboard failures are logged and otherwise ignored.
    pub fn copy_current_password(&self, sink: &dyn ClipboardSink) -> Vec<FormChange> {
        let password = self.password();
        if password.is_empty() {
            tracing::debug!("Copy requested with no password - ignoring");
            self.metrics.record_copy_ignored();
            return Vec::new();
        }

        if let Err(e) = sink.write_text(&password) {
            tracing::warn!("Failed to copy password to clipboard: {}", e);
            self.metrics.record_clipboard_error();
        }
        self.metrics.record_copy();

        let changes = self.update(|state| state.copy_status = CopyStatus::Copied);
        self.schedule_copy_reset();

        tracing::info!("Password copied ({} characters)", password.len());
        changes
    }

    /// Abort a pending copy-status revert, leaving the status as it is
    pub fn cancel_copy_reset(&self) {
        if let Some(task) = self.copy_reset_slot().take() {
            task.abort();
            tracing::debug!("Pending copy status reset cancelled");
        }
    }

    /// Apply a Configuration mutation and regenerate in the same critical section
    fn apply_configuration<F>(&self, mutate: F) -> Vec<FormChange>
    where
        F: FnOnce(&mut GeneratorConfig),
    {
        let changes = self.update(|state| {
            mutate(&mut state.config);
            state.password = generator::generate(&state.config);
        });
        self.metrics.record_password_generated();
        changes
    }

    fn schedule_copy_reset(&self) {
        let manager = self.clone();
        let delay = self.copy_reset_delay;

        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            manager.update(|state| state.copy_status = CopyStatus::Idle);
            tracing::debug!("Copy status reset after {:?}", delay);
        });

        if let Some(previous) = self.copy_reset_slot().replace(task) {
            previous.abort();
        }
    }

    /// Update the state and emit change events
    ///
    /// Captures the old state, applies the update, and broadcasts one event
    /// per detected difference.
    fn update<F>(&self, update_fn: F) -> Vec<FormChange>
    where
        F: FnOnce(&mut FormState),
    {
        let changes = {
            let mut state = self.write_guard();
            let old_state = state.clone();
            update_fn(&mut state);
            Self::detect_changes(&old_state, &state)
        };

        for change in &changes {
            // Ignore send errors - it's OK if no one is listening
            if self.state_tx.send(change.clone()).is_ok() {
                self.metrics.record_state_broadcast();
            }
        }

        changes
    }

    fn detect_changes(old: &FormState, new: &FormState) -> Vec<FormChange> {
        let mut changes = Vec::new();

        if old.config != new.config {
            changes.push(FormChange::ConfigurationChanged { config: new.config });
        }

        if old.password != new.password {
            changes.push(FormChange::PasswordGenerated {
                length: new.password.chars().count(),
            });
        }

        if old.copy_status != new.copy_status {
            changes.push(FormChange::CopyStatusChanged {
                status: new.copy_status,
            });
        }

        changes
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, FormState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, FormState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn copy_reset_slot(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.copy_reset_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

// Cloning shares the same state, channel and timer slot
impl Clone for FormManager {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            state_tx: self.state_tx.clone(),
            copy_reset_task: Arc::clone(&self.copy_reset_task),
            copy_reset_delay: self.copy_reset_delay,
            runtime: self.runtime.clone(),
            metrics: Arc::clone(&self.metrics),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::clipboard::{ClipboardError, MockClipboardSink};
    use crate::services::generator::Alphabet;
    use std::sync::atomic::Ordering;

    fn manager() -> FormManager {
        FormManager::new(GeneratorConfig::default(), tokio::runtime::Handle::current())
    }

    #[tokio::test]
    async fn test_initial_password_generated() {
        let form = manager();
        let state = form.snapshot();

        assert_eq!(state.password.len(), 12);
        assert_eq!(state.copy_status, CopyStatus::Idle);
        assert_eq!(form.metrics().passwords_generated.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_set_length_regenerates() {
        let form = manager();
        let changes = form.set_length(20);

        assert!(matches!(changes[0], FormChange::ConfigurationChanged { .. }));
        assert!(changes.contains(&FormChange::PasswordGenerated { length: 20 }));
        assert_eq!(form.password().len(), 20);
    }

    #[tokio::test]
    async fn test_set_length_clamps() {
        let form = manager();

        form.set_length(3);
        assert_eq!(form.config().length.get(), 6);
        assert_eq!(form.password().len(), 6);

        form.set_length(99);
        assert_eq!(form.config().length.get(), 32);
        assert_eq!(form.password().len(), 32);
    }

    #[tokio::test]
    async fn test_toggles_regenerate_within_alphabet() {
        let form = manager();
        form.set_include_digits(false);
        form.set_include_symbols(false);

        let config = form.config();
        let alphabet = Alphabet::for_config(&config);
        assert!(form.password().chars().all(|c| alphabet.contains(c)));
        assert!(form.password().chars().all(|c| c.is_ascii_alphabetic()));
    }

    #[tokio::test]
    async fn test_regenerate_keeps_configuration() {
        let form = manager();
        let before = form.config();
        let changes = form.regenerate();

        assert_eq!(form.config(), before);
        assert!(
            !changes
                .iter()
                .any(|c| matches!(c, FormChange::ConfigurationChanged { .. }))
        );
    }

    #[tokio::test]
    async fn test_copy_writes_password_to_sink() {
        let form = manager();
        let password = form.password();
        assert!(!password.is_empty());

        let mut sink = MockClipboardSink::new();
        sink.expect_write_text()
            .withf(move |text| text == password)
            .times(1)
            .returning(|_| Ok(()));

        let changes = form.copy_current_password(&sink);

        assert_eq!(
            changes,
            vec![FormChange::CopyStatusChanged {
                status: CopyStatus::Copied
            }]
        );
        assert_eq!(form.copy_status(), CopyStatus::Copied);
        form.cancel_copy_reset();
    }

    #[tokio::test]
    async fn test_copy_empty_password_is_noop() {
        let form = manager();
        form.write_guard().password.clear();

        let mut sink = MockClipboardSink::new();
        sink.expect_write_text().never();

        let changes = form.copy_current_password(&sink);

        assert!(changes.is_empty());
        assert_eq!(form.copy_status(), CopyStatus::Idle);
        assert_eq!(form.metrics().copies_ignored.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_clipboard_failure_still_acknowledges_copy() {
        let form = manager();

        let mut sink = MockClipboardSink::new();
        sink.expect_write_text()
            .returning(|_| Err(ClipboardError::Unavailable("no display".to_string())));

        form.copy_current_password(&sink);

        assert_eq!(form.copy_status(), CopyStatus::Copied);
        assert_eq!(form.metrics().clipboard_errors.load(Ordering::Relaxed), 1);
        form.cancel_copy_reset();
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_status_reverts_after_delay() {
        let form = manager();
        let mut sink = MockClipboardSink::new();
        sink.expect_write_text().returning(|_| Ok(()));

        form.copy_current_password(&sink);

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert_eq!(form.copy_status(), CopyStatus::Copied);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(form.copy_status(), CopyStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_copy_reset_keeps_status() {
        let form = manager();
        let mut sink = MockClipboardSink::new();
        sink.expect_write_text().returning(|_| Ok(()));

        form.copy_current_password(&sink);
        form.cancel_copy_reset();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(form.copy_status(), CopyStatus::Copied);
    }

    #[tokio::test]
    async fn test_subscribe_to_changes() {
        let form = manager();
        let mut rx = form.subscribe();

        form.set_include_symbols(false);

        let event = rx.try_recv();
        assert!(matches!(
            event,
            Ok(FormChange::ConfigurationChanged { config }) if !config.include_symbols
        ));
        assert!(matches!(
            rx.try_recv(),
            Ok(FormChange::PasswordGenerated { length: 12 })
        ));
    }

    #[tokio::test]
    async fn test_clone_shares_state() {
        let form1 = manager();
        let form2 = form1.clone();

        form1.set_length(8);

        assert_eq!(form2.config().length.get(), 8);
        assert_eq!(form2.password(), form1.password());
    }
}
