// Configuration management
//
// Handles emulator configuration and its persistence as TOML. Missing keys
// fall back to their defaults, so a partial file is a valid configuration.

use crate::audio::mixer::{DEFAULT_BUFFER_SAMPLES, DEFAULT_CYCLE_LENGTH, DEFAULT_SAMPLE_RATE};
use crate::audio::MixerSettings;
use crate::region::Region;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Error type for configuration loading and validation
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the configuration file failed
    #[error("configuration I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not valid TOML for this configuration
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be serialized
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value is out of range
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Emulator configuration
///
/// # Example
///
/// ```
/// use nes_core::{EmulatorConfig, Region};
///
/// let config = EmulatorConfig::from_toml_str("region = \"pal\"").unwrap();
/// assert_eq!(config.region, Region::Pal);
/// assert_eq!(config.audio.sample_rate, 96_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmulatorConfig {
    /// Television standard to emulate
    pub region: Region,

    /// Audio settings
    pub audio: AudioConfig,
}

/// Audio configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Output sample rate in Hz
    pub sample_rate: u32,

    /// Capacity of the output sample buffer
    pub buffer_samples: usize,

    /// Length of one mixer frame in CPU cycles
    pub cycle_length: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        AudioConfig {
            sample_rate: DEFAULT_SAMPLE_RATE,
            buffer_samples: DEFAULT_BUFFER_SAMPLES,
            cycle_length: DEFAULT_CYCLE_LENGTH,
        }
    }
}

impl AudioConfig {
    pub fn mixer_settings(&self) -> MixerSettings {
        MixerSettings {
            sample_rate: self.sample_rate,
            cycle_length: self.cycle_length,
            buffer_samples: self.buffer_samples,
        }
    }
}

impl EmulatorConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: EmulatorConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, is not valid TOML, or holds
    /// out-of-range values.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a TOML file
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nes_core::EmulatorConfig;
    ///
    /// let config = EmulatorConfig::default();
    /// config.save("nes_core.toml").expect("Failed to save configuration");
    /// ```
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Check that every value describes a usable emulator
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.audio.sample_rate == 0 {
            return Err(ConfigError::Invalid(
                "audio.sample_rate must be greater than zero".to_string(),
            ));
        }
        if self.audio.buffer_samples == 0 {
            return Err(ConfigError::Invalid(
                "audio.buffer_samples must be greater than zero".to_string(),
            ));
        }
        if self.audio.cycle_length < 2 {
            return Err(ConfigError::Invalid(format!(
                "audio.cycle_length must be at least 2, got {}",
                self.audio.cycle_length
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EmulatorConfig::default();
        assert_eq!(config.region, Region::Ntsc);
        assert_eq!(config.audio.sample_rate, 96_000);
        assert_eq!(config.audio.buffer_samples, 2_048);
        assert_eq!(config.audio.cycle_length, 10_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = EmulatorConfig::from_toml_str("[audio]\nsample_rate = 48000\n").unwrap();
        assert_eq!(config.region, Region::Ntsc);
        assert_eq!(config.audio.sample_rate, 48_000);
        assert_eq!(config.audio.cycle_length, DEFAULT_CYCLE_LENGTH);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = EmulatorConfig::default();
        config.region = Region::Pal;
        config.audio.buffer_samples = 4096;

        let text = config.to_toml_string().unwrap();
        assert!(text.contains("region = \"pal\""));
        assert_eq!(EmulatorConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let result = EmulatorConfig::from_toml_str("[audio]\nsample_rate = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = EmulatorConfig::from_toml_str("[audio]\ncycle_length = 1\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = EmulatorConfig::from_toml_str("[audio]\nbuffer_samples = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_parse_errors() {
        let result = EmulatorConfig::from_toml_str("region = \"secam\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("nes_core_config_{}.toml", std::process::id()));
        let mut config = EmulatorConfig::default();
        config.audio.sample_rate = 44_100;

        config.save(&path).unwrap();
        let loaded = EmulatorConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file() {
        let result = EmulatorConfig::load("/nonexistent/nes_core.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
