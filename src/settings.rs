//! Gemforge settings with persistence
//!
//! Settings are saved to `~/.config/gemforge/settings.toml`

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GemforgeSettings {
    #[serde(default)]
    pub sockets: SocketSettings,
    /// Weapons to assemble on startup
    #[serde(default = "default_loadouts")]
    pub loadouts: Vec<LoadoutSettings>,
}

impl Default for GemforgeSettings {
    fn default() -> Self {
        Self {
            sockets: SocketSettings::default(),
            loadouts: default_loadouts(),
        }
    }
}

impl GemforgeSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gemforge"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Whether a settings file is present on disk
    pub fn exists() -> bool {
        Self::settings_path().map(|p| p.exists()).unwrap_or(false)
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load settings from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match Self::from_toml(&content) {
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

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };

        let path = dir.join("settings.toml");

        // Create config directory if it doesn't exist
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// How the power registry is populated and sockets are filled
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SocketSettings {
    /// Register the builtin power catalog
    pub register_builtin: bool,
    /// Fill empty sockets with a random matching power
    pub fill_empty: bool,
    /// Fixed RNG seed for socket filling (random if unset)
    pub seed: Option<u64>,
}

impl Default for SocketSettings {
    fn default() -> Self {
        Self {
            register_builtin: true,
            fill_empty: true,
            seed: None,
        }
    }
}

/// One weapon and its sockets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadoutSettings {
    pub name: String,
    /// Item identifier, e.g. `gemforge:iron_sword`
    pub item: String,
    #[serde(default)]
    pub runic_socket: bool,
    #[serde(default)]
    pub nether_socket: bool,
    /// Power preset for the runic socket
    #[serde(default)]
    pub runic_power: Option<String>,
    /// Power preset for the nether socket
    #[serde(default)]
    pub nether_power: Option<String>,
}

fn default_loadouts() -> Vec<LoadoutSettings> {
    vec![
        LoadoutSettings {
            name: "Runic Blade".to_string(),
            item: "gemforge:runic_blade".to_string(),
            runic_socket: true,
            nether_socket: false,
            runic_power: None,
            nether_power: None,
        },
        LoadoutSettings {
            name: "Twin Fang".to_string(),
            item: "gemforge:twin_fang".to_string(),
            runic_socket: true,
            nether_socket: true,
            runic_power: Some("gemforge:runic/ward".to_string()),
            nether_power: None,
        },
        LoadoutSettings {
            name: "Iron Sword".to_string(),
            item: "gemforge:iron_sword".to_string(),
            runic_socket: false,
            nether_socket: false,
            runic_power: None,
            nether_power: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = GemforgeSettings::default();
        assert!(settings.sockets.register_builtin);
        assert!(settings.sockets.fill_empty);
        assert_eq!(settings.sockets.seed, None);
        assert_eq!(settings.loadouts.len(), 3);
    }

    #[test]
    fn test_parse_partial_file() {
        let settings = GemforgeSettings::from_toml(
            r#"
            [sockets]
            register_builtin = true
            fill_empty = false
            seed = 42

            [[loadouts]]
            name = "Ember"
            item = "gemforge:ember_sword"
            runic_socket = true
            runic_power = "gemforge:runic/ignite"
            "#,
        )
        .unwrap();

        assert!(!settings.sockets.fill_empty);
        assert_eq!(settings.sockets.seed, Some(42));
        assert_eq!(settings.loadouts.len(), 1);
        let ember = &settings.loadouts[0];
        assert!(ember.runic_socket);
        assert!(!ember.nether_socket);
        assert_eq!(ember.runic_power.as_deref(), Some("gemforge:runic/ignite"));
        assert_eq!(ember.nether_power, None);
    }

    #[test]
    fn test_partial_sockets_table_keeps_loadouts() {
        let settings = GemforgeSettings::from_toml(
            r#"
            [sockets]
            seed = 5

            [[loadouts]]
            name = "Ember"
            item = "gemforge:ember_sword"
            runic_socket = true
            "#,
        )
        .unwrap();

        assert_eq!(settings.sockets.seed, Some(5));
        assert!(settings.sockets.register_builtin);
        assert!(settings.sockets.fill_empty);
        assert_eq!(settings.loadouts.len(), 1);
        assert_eq!(settings.loadouts[0].name, "Ember");
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let settings = GemforgeSettings::from_toml("").unwrap();
        assert!(settings.sockets.register_builtin);
        assert_eq!(settings.loadouts, default_loadouts());
    }

    #[test]
    fn test_toml_round_trip() {
        let settings = GemforgeSettings::default();
        let content = toml::to_string_pretty(&settings).unwrap();
        let loaded = GemforgeSettings::from_toml(&content).unwrap();
        assert_eq!(loaded.loadouts, settings.loadouts);
        assert_eq!(loaded.sockets.fill_empty, settings.sockets.fill_empty);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("gemforge-settings-does-not-exist.toml");
        let settings = GemforgeSettings::load_from(&path);
        assert_eq!(settings.loadouts.len(), 3);
    }
}
