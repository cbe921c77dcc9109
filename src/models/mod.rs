//! Data models for the password generator.
//!
//! - [`FormState`]: Configuration, current password and copy status shown by the form
//! - [`GeneratorConfig`] / [`PasswordLength`]: The user-controlled generation parameters
//! - [`CopyStatus`]: The `Copy` / `Copied!` acknowledgement state
//! - [`UserConfig`]: Startup preferences loaded from `Passgen Config.yaml`
//!
//! Form state is owned by [`FormManager`](crate::state::FormManager); update it
//! through the manager so the password stays in sync with the Configuration.

pub mod config;
pub mod form_state;

pub use config::{PassgenSettings, UserConfig};
pub use form_state::{
    CopyStatus, DEFAULT_COPY_RESET_DELAY, DEFAULT_PASSWORD_LENGTH, FormState, GeneratorConfig,
    LengthError, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, PasswordLength,
};
