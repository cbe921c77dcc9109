//! passgen - Desktop password generator
//!
//! Main entry point for the GUI application.
//!
//! # Overview
//!
//! This binary initializes:
//! - Configuration loading ([`ConfigManager`]) from `Passgen Data/`
//! - Logging infrastructure (file rotation + console output)
//! - Tokio runtime (hosts the copy-status revert timer)
//! - Form state ([`FormManager`])
//! - GUI controller ([`GuiController`] - bridges the Slint window with the form)
//!
//! # Execution Flow
//!
//! 1. Load `Passgen Config.yaml` (a starter file is written on first run)
//! 2. Initialize logging → logs/passgen.<date>
//! 3. Create a tokio runtime with a single worker thread
//! 4. Create the FormManager, which generates the first password
//! 5. Run the Slint event loop (blocks until window closed)
//! 6. Cancel any pending copy-status reset, log metrics, shut down the runtime

use anyhow::Result;
use camino::Utf8Path;
use passgen::ui::GuiController;
use passgen::{APP_NAME, ConfigManager, FormManager, Metrics, VERSION};
use std::sync::Arc;
use std::time::Duration;

fn main() -> Result<()> {
    let config_manager = ConfigManager::new("Passgen Data")?;
    let wrote_starter = config_manager.ensure_user_config()?;
    let user_config = config_manager.load_user_config()?;

    let _log_guard = passgen::logging::setup_logging(
        Utf8Path::new("logs"),
        "passgen",
        user_config.passgen_settings.debug_mode,
        true,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);
    if wrote_starter {
        tracing::info!(
            "Wrote starter settings to {}",
            config_manager.user_config_path()
        );
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(1)
        .thread_name("passgen-timer")
        .build()?;

    let metrics = Arc::new(Metrics::new());
    let initial_config = user_config.generator_config();
    let form = FormManager::with_metrics(initial_config, runtime.handle().clone(), metrics.clone())
        .with_copy_reset_delay(user_config.copy_reset_delay());

    tracing::info!(
        "Form initialized: length={}, digits={}, symbols={}, copy_reset={:?}",
        initial_config.length,
        initial_config.include_digits,
        initial_config.include_symbols,
        form.copy_reset_delay()
    );

    let gui_controller = GuiController::new(form.clone())?;

    // Blocks until the window is closed
    let result = gui_controller.run();

    tracing::info!("GUI closed, shutting down");
    form.cancel_copy_reset();
    metrics.log_summary();

    runtime.shutdown_timeout(Duration::from_secs(1));
    tracing::info!("Application shutdown complete");

    result.map_err(|e| {
        tracing::error!("GUI error: {}", e);
        anyhow::anyhow!("GUI error: {}", e)
    })
}
