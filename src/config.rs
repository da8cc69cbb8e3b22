//! Engine configuration persistence
//!
//! Stores user preferences in `~/.config/spicykeys/config.yaml`

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::keymap::{default_mod_modifier, Modifier};

/// Platform family, which decides what `mod` means in combinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// macOS and iOS: `mod` is meta (Cmd)
    Apple,
    /// Everything else: `mod` is ctrl
    Other,
}

impl Platform {
    pub fn mod_modifier(self) -> Modifier {
        match self {
            Platform::Apple => Modifier::Meta,
            Platform::Other => Modifier::Ctrl,
        }
    }
}

/// Match engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Log every normalized event and fired handler at debug level
    #[serde(default)]
    pub debug: bool,

    /// Debounce window between sequence steps
    #[serde(default = "default_sequence_timeout_ms")]
    pub sequence_timeout_ms: u64,

    /// Accept multi-step sequences; when off, binding one is an error
    #[serde(default = "default_sequences")]
    pub sequences: bool,

    /// Override the compile target's platform for `mod`
    #[serde(default)]
    pub platform: Option<Platform>,
}

fn default_sequence_timeout_ms() -> u64 {
    1000
}

fn default_sequences() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debug: false,
            sequence_timeout_ms: default_sequence_timeout_ms(),
            sequences: default_sequences(),
            platform: None,
        }
    }
}

impl EngineConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    pub fn sequence_timeout(&self) -> Duration {
        Duration::from_millis(self.sequence_timeout_ms)
    }

    /// What `mod` resolves to under this config
    pub fn mod_modifier(&self) -> Modifier {
        self.platform
            .map(Platform::mod_modifier)
            .unwrap_or_else(default_mod_modifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert!(!config.debug);
        assert!(config.sequences);
        assert_eq!(config.sequence_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = EngineConfig::from_yaml("debug: true\n").unwrap();
        assert!(config.debug);
        assert_eq!(config.sequence_timeout_ms, 1000);
        assert!(config.sequences);
    }

    #[test]
    fn test_platform_override() {
        let config = EngineConfig::from_yaml("platform: apple\n").unwrap();
        assert_eq!(config.mod_modifier(), Modifier::Meta);

        let config = EngineConfig::from_yaml("platform: other\n").unwrap();
        assert_eq!(config.mod_modifier(), Modifier::Ctrl);
    }
}
