use crate::config::atomic_rename;
use crate::model::Pet;
use crate::snapshot::Snapshot;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::{fs, path::Path};

/// Reads a save file. Missing or non-JSON files are errors; field-level
/// problems inside a valid record are defaulted.
pub fn load_pet(path: &Path, now: DateTime<Utc>) -> Result<Pet> {
    let s = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let snapshot: Snapshot =
        serde_json::from_str(&s).with_context(|| format!("parsing {}", path.display()))?;
    let pet = Pet::from_snapshot(snapshot, now);
    info!("loaded {} from {} (alive={})", pet.name(), path.display(), pet.is_alive());
    Ok(pet)
}

/// Returns the saved pet, or a new one named `name` when there is no usable
/// save. The flag tells whether a save was loaded.
pub fn load_or_adopt(path: &Path, name: &str, now: DateTime<Utc>) -> (Pet, bool) {
    if path.exists() {
        match load_pet(path, now) {
            Ok(pet) => return (pet, true),
            Err(e) => warn!("starting over: {e:#}"),
        }
    }
    let mut pet = Pet::named(name);
    pet.tick_realtime(now);
    (pet, false)
}

pub fn save_pet(path: &Path, pet: &Pet) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(&pet.to_snapshot())?;
    fs::write(&tmp, data).with_context(|| format!("writing {}", tmp.display()))?;
    atomic_rename(&tmp, path)?;
    info!("saved {} to {}", pet.name(), path.display());
    Ok(())
}
