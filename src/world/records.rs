//! Entity records stored one JSON file per entity
//!
//! The authoring tools save each record as `<dir>/<id>.json`. `RecordDirectory`
//! reads them lazily, so a census only touches the records it reaches.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::aggregate::output::DerivedStatistics;
use crate::core::error::{CensusError, Result};
use crate::core::types::EntityId;
use crate::world::entity::Entity;
use crate::world::store::{EntityStore, StatisticsSink};

/// A directory of per-entity JSON records
#[derive(Debug, Clone)]
pub struct RecordDirectory {
    root: PathBuf,
}

impl RecordDirectory {
    /// Open a record directory. Fails if `root` is not a readable directory.
    pub fn open(root: &Path) -> Result<Self> {
        std::fs::read_dir(root)?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// File that holds the record for `id`, if the id can name one
    fn record_path(&self, id: &EntityId) -> Option<PathBuf> {
        let id = id.as_str();
        if id.is_empty() || id.contains(['/', '\\']) || id == "." || id == ".." {
            return None;
        }
        Some(self.root.join(format!("{id}.json")))
    }

    fn read_record(path: &Path) -> Result<Option<Entity>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| CensusError::RecordError {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Every record id in the directory, sorted
    pub fn ids(&self) -> Result<Vec<EntityId>> {
        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(EntityId::from(stem));
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}

impl EntityStore for RecordDirectory {
    fn lookup(&self, id: &EntityId) -> Result<Option<Cow<'_, Entity>>> {
        let Some(path) = self.record_path(id) else {
            tracing::debug!("Entity id {} cannot name a record file", id);
            return Ok(None);
        };
        let record = Self::read_record(&path)?;
        if let Some(entity) = &record {
            if entity.id != *id {
                tracing::warn!(
                    "Record {} declares id {}, using the file name",
                    path.display(),
                    entity.id
                );
            }
        }
        Ok(record.map(|mut entity| {
            entity.id = id.clone();
            Cow::Owned(entity)
        }))
    }
}

impl StatisticsSink for RecordDirectory {
    fn store_statistics(
        &mut self,
        region_id: &EntityId,
        statistics: DerivedStatistics,
    ) -> Result<bool> {
        let Some(path) = self.record_path(region_id) else {
            return Ok(false);
        };
        let Some(mut entity) = Self::read_record(&path)? else {
            return Ok(false);
        };
        let Some(region) = entity.as_region_mut() else {
            return Ok(false);
        };
        region.statistics = Some(statistics);
        std::fs::write(&path, serde_json::to_string_pretty(&entity)?)?;
        tracing::debug!("Wrote statistics to {}", path.display());
        Ok(true)
    }
}
