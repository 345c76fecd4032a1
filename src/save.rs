//! Loadout save files
//!
//! Loadouts are stored as JSON using the persistent component record, so
//! powers are referenced by identifier and resolved again on load.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use gemforge_core::{Identifier, ItemStack};
use gemforge_power::{GemPowerComponent, GemPowerRecord, PowerRegistry};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::loadout::Loadout;

/// Current save format version
pub const SAVE_VERSION: u32 = 1;

/// Top-level save data structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version (for future migration)
    pub version: u32,
    /// RFC 3339 timestamp
    pub timestamp: String,
    pub loadouts: Vec<SavedLoadout>,
}

/// One saved weapon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedLoadout {
    pub name: String,
    pub item: Identifier,
    pub gem_powers: GemPowerRecord,
}

/// Summary info for a save file (for listing)
#[derive(Debug, Clone)]
pub struct SaveSlotInfo {
    /// Filename (without extension)
    pub filename: String,
    pub timestamp: String,
    pub loadout_count: usize,
}

impl SaveData {
    pub fn from_loadouts(loadouts: &[Loadout]) -> Self {
        Self {
            version: SAVE_VERSION,
            timestamp: Utc::now().to_rfc3339(),
            loadouts: loadouts
                .iter()
                .map(|l| SavedLoadout {
                    name: l.name.clone(),
                    item: l.stack.item.clone(),
                    gem_powers: l.component.to_record(),
                })
                .collect(),
        }
    }

    /// Resolve every saved component against `registry`
    pub fn into_loadouts(self, registry: &PowerRegistry) -> Result<Vec<Loadout>> {
        self.loadouts
            .into_iter()
            .map(|saved| -> Result<Loadout> {
                let component = GemPowerComponent::from_record(&saved.gem_powers, registry)
                    .with_context(|| format!("Failed to restore loadout '{}'", saved.name))?;
                Ok(Loadout {
                    name: saved.name,
                    stack: ItemStack::new(saved.item, 1),
                    component,
                })
            })
            .collect()
    }
}

/// Get the save directory path, creating it if it doesn't exist
fn save_dir() -> Result<PathBuf> {
    let dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gemforge")
        .join("saves");
    fs::create_dir_all(&dir).context("Failed to create save directory")?;
    Ok(dir)
}

/// Sanitize a save name into a valid filename
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect::<String>()
        .to_lowercase()
}

/// Save loadouts under `name`, returning the file written
pub fn save_loadouts(name: &str, loadouts: &[Loadout]) -> Result<PathBuf> {
    let path = save_dir()?.join(format!("{}.json", sanitize_filename(name)));
    write_save(&path, &SaveData::from_loadouts(loadouts))?;
    info!("Saved {} loadouts to {:?}", loadouts.len(), path);
    Ok(path)
}

/// Load loadouts saved under `name`
pub fn load_loadouts(name: &str, registry: &PowerRegistry) -> Result<Vec<Loadout>> {
    let path = save_dir()?.join(format!("{}.json", sanitize_filename(name)));
    read_save(&path)?.into_loadouts(registry)
}

/// List all save files, newest first
pub fn list_saves() -> Result<Vec<SaveSlotInfo>> {
    list_saves_in(&save_dir()?)
}

fn list_saves_in(dir: &Path) -> Result<Vec<SaveSlotInfo>> {
    let mut slots = Vec::new();

    for entry in fs::read_dir(dir).context("Failed to read save directory")? {
        let entry = entry?;
        let path = entry.path();

        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }

        let filename = path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();

        match read_save(&path) {
            Ok(data) => slots.push(SaveSlotInfo {
                filename,
                timestamp: data.timestamp,
                loadout_count: data.loadouts.len(),
            }),
            Err(e) => warn!("Skipping unreadable save {:?}: {:#}", path, e),
        }
    }

    slots.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Ok(slots)
}

// --- Internal helpers ---

fn write_save(path: &Path, data: &SaveData) -> Result<()> {
    let json = serde_json::to_string_pretty(data).context("Failed to serialize save data")?;
    fs::write(path, json).context("Failed to write save file")?;
    Ok(())
}

fn read_save(path: &Path) -> Result<SaveData> {
    let json = fs::read_to_string(path).context("Failed to read save file")?;
    let data: SaveData = serde_json::from_str(&json).context("Failed to deserialize save data")?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gemforge_power::register_builtin;

    fn registry() -> PowerRegistry {
        let registry = PowerRegistry::new();
        register_builtin(&registry).unwrap();
        registry
    }

    fn test_loadouts(registry: &PowerRegistry) -> Vec<Loadout> {
        let ignite = registry.get(&"gemforge:runic/ignite".parse().unwrap());
        let siphon = registry.get(&"gemforge:nether/soul_siphon".parse().unwrap());
        vec![
            Loadout {
                name: "Ember".to_string(),
                stack: ItemStack::new("gemforge:ember".parse().unwrap(), 1),
                component: GemPowerComponent::create(ignite, siphon),
            },
            Loadout {
                name: "Blank".to_string(),
                stack: ItemStack::new("gemforge:blank".parse().unwrap(), 1),
                component: GemPowerComponent::create_empty(true, false),
            },
        ]
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gemforge-test-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_round_trip_serialize() {
        let registry = registry();
        let loadouts = test_loadouts(&registry);
        let data = SaveData::from_loadouts(&loadouts);
        let json = serde_json::to_string(&data).unwrap();
        let loaded: SaveData = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded.version, SAVE_VERSION);
        assert_eq!(loaded.loadouts.len(), 2);
        assert_eq!(loaded.loadouts[0].gem_powers.runic_power.path(), "runic/ignite");
        assert_eq!(loaded.into_loadouts(&registry).unwrap(), loadouts);
    }

    #[test]
    fn test_restore_with_unknown_power_fails() {
        let registry = registry();
        let data = SaveData::from_loadouts(&test_loadouts(&registry));
        let bare = PowerRegistry::new();
        let err = data.into_loadouts(&bare).unwrap_err();
        assert!(format!("{:#}", err).contains("Ember"));
    }

    #[test]
    fn test_write_read_and_list() {
        let registry = registry();
        let dir = temp_dir("list");
        let path = dir.join("slot_a.json");
        write_save(&path, &SaveData::from_loadouts(&test_loadouts(&registry))).unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();
        fs::write(dir.join("corrupt.json"), "{ not a save").unwrap();

        let restored = read_save(&path).unwrap().into_loadouts(&registry).unwrap();
        assert_eq!(restored, test_loadouts(&registry));

        let slots = list_saves_in(&dir).unwrap();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].filename, "slot_a");
        assert_eq!(slots[0].loadout_count, 2);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("My Save!"), "my_save_");
        assert_eq!(sanitize_filename("run-01_b"), "run-01_b");
    }
}
