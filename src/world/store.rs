//! Entity storage and lookups
//!
//! `EntityStore` is the read side the census walks; `StatisticsSink` is where
//! a finished roll-up gets written back. `WorldStore` implements both in
//! memory.

use std::borrow::Cow;

use ahash::AHashMap;

use crate::aggregate::output::DerivedStatistics;
use crate::core::error::Result;
use crate::core::types::{EntityId, EntityKind};
use crate::world::entity::Entity;

/// Read access to entity records by id
///
/// `Ok(None)` means the id is unknown. An `Err` is a failure of the store
/// itself and is passed through to whoever asked.
pub trait EntityStore {
    fn lookup(&self, id: &EntityId) -> Result<Option<Cow<'_, Entity>>>;
}

/// Write access for recomputed region statistics
pub trait StatisticsSink {
    /// Replace the region's statistics wholesale.
    /// Returns `false` when `region_id` is unknown or not a region.
    fn store_statistics(
        &mut self,
        region_id: &EntityId,
        statistics: DerivedStatistics,
    ) -> Result<bool>;
}

/// All entities of a world, held in memory in authoring order
#[derive(Debug, Clone, Default)]
pub struct WorldStore {
    entities: Vec<Entity>,
    /// Map from id to position in `entities`
    by_id: AHashMap<EntityId, usize>,
}

impl WorldStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity. A later record with the same id replaces the earlier one.
    pub fn insert(&mut self, entity: Entity) {
        if let Some(&idx) = self.by_id.get(&entity.id) {
            tracing::warn!("Duplicate entity id {}, keeping the later record", entity.id);
            self.entities[idx] = entity;
        } else {
            self.by_id.insert(entity.id.clone(), self.entities.len());
            self.entities.push(entity);
        }
    }

    /// Get an entity by id
    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.by_id.get(id).map(|&idx| &self.entities[idx])
    }

    /// Get mutable reference to an entity
    pub fn get_mut(&mut self, id: &EntityId) -> Option<&mut Entity> {
        self.by_id.get(id).map(|&idx| &mut self.entities[idx])
    }

    /// Ids of every region, in authoring order
    pub fn region_ids(&self) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|e| e.kind() == EntityKind::Region)
            .map(|e| e.id.clone())
            .collect()
    }

    /// Iterate over all entities
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Number of entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl FromIterator<Entity> for WorldStore {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        let mut store = WorldStore::new();
        for entity in iter {
            store.insert(entity);
        }
        store
    }
}

impl EntityStore for WorldStore {
    fn lookup(&self, id: &EntityId) -> Result<Option<Cow<'_, Entity>>> {
        Ok(self.get(id).map(Cow::Borrowed))
    }
}

impl StatisticsSink for WorldStore {
    fn store_statistics(
        &mut self,
        region_id: &EntityId,
        statistics: DerivedStatistics,
    ) -> Result<bool> {
        match self.get_mut(region_id).and_then(Entity::as_region_mut) {
            Some(region) => {
                region.statistics = Some(statistics);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
