//! Weapon definition files
//!
//! A definitions file holds a `weapons` list in TOML or JSON, picked by file
//! extension. Fields left out fall back to the built-in defaults and every
//! weapon is validated before it is returned.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use armory_weapon::WeaponConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaponFile {
    #[serde(default)]
    pub weapons: Vec<WeaponConfig>,
}

/// Load and validate every weapon in `path`
pub fn load(path: &Path) -> Result<Vec<WeaponConfig>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read weapon definitions {:?}", path))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let file: WeaponFile = match extension.as_deref() {
        Some("toml") => toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML in {:?}", path))?,
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON in {:?}", path))?,
        _ => bail!("Unsupported weapon definition format: {:?}", path),
    };

    validate(file.weapons, path)
}

fn validate(weapons: Vec<WeaponConfig>, path: &Path) -> Result<Vec<WeaponConfig>> {
    if weapons.is_empty() {
        bail!("No weapons defined in {:?}", path);
    }
    for weapon in &weapons {
        weapon
            .validate()
            .with_context(|| format!("Invalid weapon '{}' in {:?}", weapon.name, path))?;
    }
    info!("Loaded {} weapon definitions from {:?}", weapons.len(), path);
    Ok(weapons)
}

/// Write `weapons` out in the format implied by `path`'s extension
pub fn save(path: &Path, weapons: &[WeaponConfig]) -> Result<()> {
    let file = WeaponFile {
        weapons: weapons.to_vec(),
    };
    let content = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::to_string_pretty(&file)?,
        _ => toml::to_string_pretty(&file)?,
    };
    fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}
