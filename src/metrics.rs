// Usage metrics module
//
// Lightweight counters for what the form did during a session

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Session metrics
///
/// Uses atomic operations for thread-safe metric tracking without locks.
/// Counters are bumped by the form manager and the event loop bridge and
/// logged once on shutdown.
#[derive(Debug)]
pub struct Metrics {
    /// Passwords generated, including the initial one
    pub passwords_generated: AtomicU64,

    /// Copy actions that reached the clipboard sink
    pub copies: AtomicU64,

    /// Copy actions ignored because no password existed
    pub copies_ignored: AtomicU64,

    /// Clipboard writes that reported an error
    pub clipboard_errors: AtomicU64,

    /// Number of state change events broadcast
    pub state_broadcasts: AtomicU64,

    /// Number of UI updates sent
    pub ui_updates: AtomicU64,

    /// Number of UI update channel full errors
    pub ui_update_channel_full: AtomicU64,

    /// Application start time
    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            passwords_generated: AtomicU64::new(0),
            copies: AtomicU64::new(0),
            copies_ignored: AtomicU64::new(0),
            clipboard_errors: AtomicU64::new(0),
            state_broadcasts: AtomicU64::new(0),
            ui_updates: AtomicU64::new(0),
            ui_update_channel_full: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_password_generated(&self) {
        self.passwords_generated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_copy(&self) {
        self.copies.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_copy_ignored(&self) {
        self.copies_ignored.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_clipboard_error(&self) {
        self.clipboard_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_state_broadcast(&self) {
        self.state_broadcasts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_ui_update(&self) {
        self.ui_updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_ui_channel_full(&self) {
        self.ui_update_channel_full.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total uptime
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::info!("=== Session Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Passwords generated: {}",
            self.passwords_generated.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Copies: {} ({} ignored, {} clipboard errors)",
            self.copies.load(Ordering::Relaxed),
            self.copies_ignored.load(Ordering::Relaxed),
            self.clipboard_errors.load(Ordering::Relaxed)
        );
        tracing::info!(
            "State broadcasts: {}, UI updates: {}, channel full errors: {}",
            self.state_broadcasts.load(Ordering::Relaxed),
            self.ui_updates.load(Ordering::Relaxed),
            self.ui_update_channel_full.load(Ordering::Relaxed)
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
