use crate::models::form_state::{
    DEFAULT_COPY_RESET_DELAY, DEFAULT_PASSWORD_LENGTH, GeneratorConfig, PasswordLength,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// User configuration from Passgen Config.yaml
///
/// Seeds the form's initial Configuration and a few application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(rename = "Passgen_Settings", default)]
    pub passgen_settings: PassgenSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassgenSettings {
    #[serde(rename = "Default Length", default = "default_length")]
    pub default_length: usize,

    #[serde(rename = "Include Numbers", default = "default_true")]
    pub include_numbers: bool,

    #[serde(rename = "Include Symbols", default = "default_true")]
    pub include_symbols: bool,

    #[serde(rename = "Copy Reset Ms", default = "default_copy_reset_ms")]
    pub copy_reset_ms: u64,

    #[serde(rename = "Debug Mode", default)]
    pub debug_mode: bool,
}

impl Default for PassgenSettings {
    fn default() -> Self {
        Self {
            default_length: DEFAULT_PASSWORD_LENGTH,
            include_numbers: true,
            include_symbols: true,
            copy_reset_ms: default_copy_reset_ms(),
            debug_mode: false,
        }
    }
}

fn default_length() -> usize {
    DEFAULT_PASSWORD_LENGTH
}

fn default_true() -> bool {
    true
}

fn default_copy_reset_ms() -> u64 {
    DEFAULT_COPY_RESET_DELAY.as_millis() as u64
}

impl UserConfig {
    /// Initial form Configuration. Out-of-range lengths are clamped.
    pub fn generator_config(&self) -> GeneratorConfig {
        let settings = &self.passgen_settings;
        let length = PasswordLength::clamped(settings.default_length);

        if length.get() != settings.default_length {
            tracing::warn!(
                "Configured default length {} is out of range, using {}",
                settings.default_length,
                length
            );
        }

        GeneratorConfig::new(length, settings.include_numbers, settings.include_symbols)
    }

    /// Delay before the copy button reverts from `Copied!` to `Copy`
    pub fn copy_reset_delay(&self) -> Duration {
        Duration::from_millis(self.passgen_settings.copy_reset_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passgen_settings_defaults() {
        let settings = PassgenSettings::default();
        assert_eq!(settings.default_length, 12);
        assert!(settings.include_numbers);
        assert!(settings.include_symbols);
        assert_eq!(settings.copy_reset_ms, 2000);
        assert!(!settings.debug_mode);
    }

    #[test]
    fn test_user_config_default_generator_config() {
        let config = UserConfig::default();
        assert_eq!(config.generator_config(), GeneratorConfig::default());
        assert_eq!(config.copy_reset_delay(), Duration::from_millis(2000));
    }

    #[test]
    fn test_out_of_range_length_is_clamped() {
        let mut config = UserConfig::default();
        config.passgen_settings.default_length = 64;
        assert_eq!(config.generator_config().length.get(), 32);

        config.passgen_settings.default_length = 1;
        assert_eq!(config.generator_config().length.get(), 6);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let yaml = "Passgen_Settings:\n  Include Symbols: false\n";
        let config: UserConfig = serde_yaml_ng::from_str(yaml).unwrap();

        assert_eq!(config.passgen_settings.default_length, 12);
        assert!(config.passgen_settings.include_numbers);
        assert!(!config.passgen_settings.include_symbols);
        assert_eq!(config.passgen_settings.copy_reset_ms, 2000);
    }
}
