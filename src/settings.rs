//! Host settings with persistence
//!
//! Settings are saved to `~/.config/armory/settings.toml`

use std::fs;
use std::path::{Path, PathBuf};

use armory_core::TimeConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All host settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostSettings {
    pub simulation: SimulationSettings,
    pub logging: LoggingSettings,
    /// Weapon definitions to load (`.toml` or `.json`). Built-in presets are
    /// used when unset.
    pub weapons_file: Option<PathBuf>,
}

impl HostSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("armory"))
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load from a specific file. Missing or malformed files yield defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(path) = Self::settings_path() else {
            anyhow::bail!("Could not determine config directory");
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Fixed-step simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub time: TimeConfig,
    /// Length of the scripted demo run in seconds
    pub duration: f32,
    /// Spread RNG seed; a fresh entropy seed is used when unset
    pub seed: Option<u64>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            time: TimeConfig::default(),
            duration: 6.0,
            seed: Some(7),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is not set
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{self, CapturedLog};
    use tracing_subscriber::EnvFilter;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("armory-settings-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = HostSettings::load_from(&scratch("missing.toml"));
        assert_eq!(settings, HostSettings::default());
    }

    #[test]
    fn test_save_and_load() {
        let path = scratch("settings.toml");
        let mut settings = HostSettings::default();
        settings.simulation.seed = Some(99);
        settings.logging.level = "debug".to_string();
        settings.weapons_file = Some(PathBuf::from("weapons.toml"));

        settings.save_to(&path).unwrap();
        assert_eq!(HostSettings::load_from(&path), settings);

        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let path = scratch("settings.toml");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "simulation = 5").unwrap();
        assert_eq!(HostSettings::load_from(&path), HostSettings::default());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_malformed_file_is_reported() {
        let path = scratch("settings.toml");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[simulation\nseed = ").unwrap();

        let log = CapturedLog::default();
        let (subscriber, _handle) = logging::subscriber(EnvFilter::new("warn"), log.clone());
        let settings = tracing::subscriber::with_default(subscriber, || HostSettings::load_from(&path));

        assert_eq!(settings, HostSettings::default());
        let out = log.contents();
        assert!(out.contains("WARN"));
        assert!(out.contains("Failed to parse settings"));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings: HostSettings = toml::from_str("[logging]\nlevel = \"warn\"\n").unwrap();
        assert_eq!(settings.logging.level, "warn");
        assert_eq!(settings.simulation, SimulationSettings::default());
    }
}
