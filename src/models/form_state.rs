use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Shortest password the length slider allows.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Longest password the length slider allows.
pub const MAX_PASSWORD_LENGTH: usize = 32;

/// Length selected when the form first renders.
pub const DEFAULT_PASSWORD_LENGTH: usize = 12;

/// How long the copy button keeps showing `Copied!` after a copy.
pub const DEFAULT_COPY_RESET_DELAY: Duration = Duration::from_millis(2000);

/// Rejected password lengths
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LengthError {
    #[error(
        "password length {0} is outside the allowed range {min}..={max}",
        min = MIN_PASSWORD_LENGTH,
        max = MAX_PASSWORD_LENGTH
    )]
    OutOfRange(usize),
}

/// A password length guaranteed to lie in `MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PasswordLength(usize);

impl PasswordLength {
    /// Validate a raw length.
    pub fn new(length: usize) -> Result<Self, LengthError> {
        if (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length) {
            Ok(Self(length))
        } else {
            Err(LengthError::OutOfRange(length))
        }
    }

    /// Pin a raw length into range, the way the slider does.
    pub fn clamped(length: usize) -> Self {
        Self(length.clamp(MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for PasswordLength {
    fn default() -> Self {
        Self(DEFAULT_PASSWORD_LENGTH)
    }
}

impl TryFrom<usize> for PasswordLength {
    type Error = LengthError;

    fn try_from(length: usize) -> Result<Self, Self::Error> {
        Self::new(length)
    }
}

impl fmt::Display for PasswordLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The three user-controlled generation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub length: PasswordLength,
    pub include_digits: bool,
    pub include_symbols: bool,
}

impl GeneratorConfig {
    pub fn new(length: PasswordLength, include_digits: bool, include_symbols: bool) -> Self {
        Self {
            length,
            include_digits,
            include_symbols,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            length: PasswordLength::default(),
            include_digits: true,
            include_symbols: true,
        }
    }
}

/// Whether the copy button is currently acknowledging a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyStatus {
    #[default]
    Idle,
    Copied,
}

impl CopyStatus {
    pub fn is_copied(self) -> bool {
        matches!(self, CopyStatus::Copied)
    }

    /// Label shown on the copy button.
    pub fn button_label(self) -> &'static str {
        match self {
            CopyStatus::Idle => "Copy",
            CopyStatus::Copied => "Copied!",
        }
    }
}

/// Everything the password form displays.
///
/// `FormState` is wrapped in `Arc<RwLock<FormState>>` by
/// [`crate::state::FormManager`]. Mutate it only through the manager so the
/// password is regenerated and change events are emitted.
#[derive(Clone, Debug, Default)]
pub struct FormState {
    pub config: GeneratorConfig,

    /// Current password; empty until the first generation
    pub password: String,

    pub copy_status: CopyStatus,
}

impl FormState {
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn has_password(&self) -> bool {
        !self.password.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_bounds() {
        assert!(PasswordLength::new(MIN_PASSWORD_LENGTH).is_ok());
        assert!(PasswordLength::new(MAX_PASSWORD_LENGTH).is_ok());
        assert_eq!(PasswordLength::new(5), Err(LengthError::OutOfRange(5)));
        assert_eq!(PasswordLength::new(33), Err(LengthError::OutOfRange(33)));
    }

    #[test]
    fn test_length_clamped() {
        assert_eq!(PasswordLength::clamped(0).get(), MIN_PASSWORD_LENGTH);
        assert_eq!(PasswordLength::clamped(100).get(), MAX_PASSWORD_LENGTH);
        assert_eq!(PasswordLength::clamped(20).get(), 20);
    }

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.length.get(), 12);
        assert!(config.include_digits);
        assert!(config.include_symbols);
    }

    #[test]
    fn test_default_form_state() {
        let state = FormState::default();
        assert!(!state.has_password());
        assert_eq!(state.copy_status, CopyStatus::Idle);
    }

    #[test]
    fn test_copy_button_labels() {
        assert_eq!(CopyStatus::Idle.button_label(), "Copy");
        assert_eq!(CopyStatus::Copied.button_label(), "Copied!");
    }

    #[test]
    fn test_length_error_message() {
        let err = PasswordLength::new(40).unwrap_err();
        assert_eq!(
            err.to_string(),
            "password length 40 is outside the allowed range 6..=32"
        );
    }
}
