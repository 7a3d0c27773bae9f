//! Load and save whole-world JSON files
//!
//! A world file is either `{"entities": [...]}` or a bare array of entity
//! records.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::world::entity::Entity;
use crate::world::store::WorldStore;

#[derive(Deserialize)]
struct WorldFileIn {
    entities: Vec<Entity>,
}

#[derive(Serialize)]
struct WorldFileOut<'a> {
    entities: Vec<&'a Entity>,
}

/// Load a world from a JSON string
pub fn load_world_json(json: &str) -> Result<WorldStore> {
    // The opening token picks the form, so decode errors keep their position
    let entities: Vec<Entity> = if json.trim_start().starts_with('[') {
        serde_json::from_str(json)?
    } else {
        serde_json::from_str::<WorldFileIn>(json)?.entities
    };
    Ok(entities.into_iter().collect())
}

/// Load a world from a JSON file on disk
pub fn load_world_file(path: &Path) -> Result<WorldStore> {
    let content = std::fs::read_to_string(path)?;
    let store = load_world_json(&content)?;
    tracing::info!("Loaded {} entities from {}", store.len(), path.display());
    Ok(store)
}

impl WorldStore {
    /// Serialize as a wrapped world file, entities in authoring order
    pub fn to_json(&self) -> Result<String> {
        let file = WorldFileOut {
            entities: self.iter().collect(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }
}

/// Write a world back to disk
pub fn save_world_file(store: &WorldStore, path: &Path) -> Result<()> {
    std::fs::write(path, store.to_json()?)?;
    tracing::info!("Wrote {} entities to {}", store.len(), path.display());
    Ok(())
}
