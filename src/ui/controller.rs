// GUI Controller - Bridges the Slint window with the password form state
//
// This module contains the GuiController which coordinates between:
// - Slint UI (MainWindow)
// - FormManager (form state, generation, copy status timer)
// - EventLoopBridge (state events from other threads -> UI)

use crate::models::{FormState, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
use crate::services::clipboard::{ClipboardError, ClipboardSink};
use crate::state::{FormChange, FormManager};
use crate::ui::bridge::EventLoopBridge;
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

// Include the generated Slint code
slint::include_modules!();

/// GUI Controller that wires up the Slint UI with the form state
///
/// # Example
/// ```ignore
/// let runtime = tokio::runtime::Runtime::new()?;
/// let form = FormManager::new(GeneratorConfig::default(), runtime.handle().clone());
///
/// let controller = GuiController::new(form)?;
/// controller.run()?;  // Blocks until window is closed
/// ```
pub struct GuiController {
    ui: MainWindow,

    /// Keeps the update handler thread's sender alive
    _bridge: EventLoopBridge<MainWindow>,
}

impl GuiController {
    pub fn new(form: FormManager) -> Result<Self> {
        let ui = MainWindow::new().context("Failed to create Slint UI")?;
        let bridge = EventLoopBridge::new(&ui, Arc::clone(form.metrics()));

        ui.set_min_length(MIN_PASSWORD_LENGTH as i32);
        ui.set_max_length(MAX_PASSWORD_LENGTH as i32);
        Self::sync_ui_with_state(&ui, &form.snapshot());

        Self::setup_callbacks(&ui, &form);
        Self::setup_state_subscription(&bridge, &form);

        tracing::info!("GUI controller initialized");

        Ok(Self {
            ui,
            _bridge: bridge,
        })
    }

    /// Run the GUI (blocks until window is closed)
    pub fn run(self) -> Result<(), slint::PlatformError> {
        tracing::info!("Starting GUI event loop");
        self.ui.run()
    }

    /// Push every displayed field from a state snapshot into the window
    fn sync_ui_with_state(ui: &MainWindow, state: &FormState) {
        ui.set_password(state.password.as_str().into());
        ui.set_password_length(state.config.length.get() as i32);
        ui.set_include_numbers(state.config.include_digits);
        ui.set_include_symbols(state.config.include_symbols);
        ui.set_copied(state.copy_status.is_copied());
        ui.set_copy_label(state.copy_status.button_label().into());
    }

    /// Connect Slint UI events to the form manager
    fn setup_callbacks(ui: &MainWindow, form: &FormManager) {
        let state = form.clone();
        ui.on_length_changed(move |length| {
            let length = slider_length(length);
            if state.config().length.get() != length {
                tracing::debug!("Length slider moved to {}", length);
                state.set_length(length);
            }
        });

        let state = form.clone();
        ui.on_numbers_toggled(move |checked| {
            tracing::debug!("Include numbers toggled: {}", checked);
            state.set_include_digits(checked);
        });

        let state = form.clone();
        ui.on_symbols_toggled(move |checked| {
            tracing::debug!("Include symbols toggled: {}", checked);
            state.set_include_symbols(checked);
        });

        let state = form.clone();
        ui.on_generate_password(move || {
            tracing::debug!("Generate button clicked");
            state.regenerate();
        });

        let state = form.clone();
        let ui_weak = ui.as_weak();
        ui.on_copy_password(move || {
            tracing::debug!("Copy button clicked");
            if let Some(ui) = ui_weak.upgrade() {
                state.copy_current_password(&WindowClipboard { ui: &ui });
            }
        });

        tracing::debug!("UI callbacks configured");
    }

    /// Subscribe to form changes and mirror them into the window
    ///
    /// Changes can originate on the tokio runtime (copy status revert), so
    /// updates always travel through the EventLoopBridge.
    fn setup_state_subscription(bridge: &EventLoopBridge<MainWindow>, form: &FormManager) {
        let bridge_handle = bridge.clone_handle();
        let state = form.clone();
        let mut rx = form.subscribe();

        std::thread::spawn(move || {
            tracing::debug!("State subscription thread started");

            loop {
                match rx.blocking_recv() {
                    Ok(change) => {
                        tracing::trace!("Form change received: {:?}", change);

                        if let FormChange::CopyStatusChanged { status } = change {
                            bridge_handle.update_ui(move |ui| {
                                ui.set_copied(status.is_copied());
                                ui.set_copy_label(status.button_label().into());
                            });
                        } else {
                            let snapshot = state.snapshot();
                            bridge_handle
                                .update_ui(move |ui| Self::sync_ui_with_state(ui, &snapshot));
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("State subscription lagged by {} events", skipped);
                        let snapshot = state.snapshot();
                        bridge_handle.update_ui(move |ui| Self::sync_ui_with_state(ui, &snapshot));
                    }
                    Err(RecvError::Closed) => break,
                }
            }

            tracing::debug!("State subscription thread terminated");
        });
    }
}

/// Clipboard sink backed by the window's read-only password field
///
/// Selects the field's text and copies it through Slint, which talks to the
/// platform clipboard.
struct WindowClipboard<'a> {
    ui: &'a MainWindow,
}

impl ClipboardSink for WindowClipboard<'_> {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if !self.ui.window().is_visible() {
            return Err(ClipboardError::Unavailable(
                "password window is not shown".to_string(),
            ));
        }

        self.ui.set_password(text.into());
        self.ui.invoke_select_and_copy();
        Ok(())
    }
}

/// Slider values arrive as `i32`; negative values collapse to zero and are
/// then clamped by the form.
fn slider_length(value: i32) -> usize {
    usize::try_from(value).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeneratorConfig;

    #[test]
    fn test_slider_length() {
        assert_eq!(slider_length(12), 12);
        assert_eq!(slider_length(-4), 0);
    }

    #[tokio::test]
    async fn test_slider_length_feeds_clamped_setter() {
        // The window itself needs a display; exercise the path the callback takes
        let form = FormManager::new(GeneratorConfig::default(), tokio::runtime::Handle::current());

        form.set_length(slider_length(-1));
        assert_eq!(form.config().length.get(), MIN_PASSWORD_LENGTH);

        form.set_length(slider_length(32));
        assert_eq!(form.password().len(), 32);
    }
}
