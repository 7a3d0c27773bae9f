//! Walking a region's subordinate graph down to its leaves
//!
//! Regions list subordinates, which may themselves be regions. Authored data
//! can contain cycles and shared children, so the walk is iterative over an
//! explicit stack and visits each id at most once.

use std::borrow::Cow;

use ahash::AHashSet;

use crate::core::error::Result;
use crate::core::types::{EntityId, EntityKind};
use crate::world::entity::Entity;
use crate::world::store::EntityStore;

/// Leaf entities reachable from one region
#[derive(Debug, Default)]
pub struct Leaves<'s> {
    /// Settlements and points of interest
    pub settlements: Vec<Cow<'s, Entity>>,
    pub unpopulated: Vec<Cow<'s, Entity>>,
    /// Nested regions expanded along the way
    pub regions: usize,
    /// Referenced ids the store did not know
    pub missing: usize,
}

/// Collect every settlement and unpopulated area under `root`.
///
/// The walk starts from `subordinates` (the root's declared list). `root`
/// itself counts as visited, so a cycle leading back to it ends there.
/// Unknown ids are skipped. Store failures are returned as-is.
pub fn collect_leaves<'s, S>(
    store: &'s S,
    root: &EntityId,
    subordinates: &[EntityId],
) -> Result<Leaves<'s>>
where
    S: EntityStore + ?Sized,
{
    let mut leaves = Leaves::default();
    let mut visited: AHashSet<EntityId> = AHashSet::new();
    visited.insert(root.clone());

    // Reversed so children pop in declared order
    let mut stack: Vec<EntityId> = subordinates.iter().rev().cloned().collect();

    while let Some(id) = stack.pop() {
        if !visited.insert(id.clone()) {
            continue;
        }
        let Some(entity) = store.lookup(&id)? else {
            tracing::debug!("Subordinate {} of region {} not found, skipping", id, root);
            leaves.missing += 1;
            continue;
        };
        match entity.kind() {
            EntityKind::Region => {
                leaves.regions += 1;
                stack.extend(
                    entity
                        .subordinate_ids()
                        .iter()
                        .rev()
                        .filter(|child| !visited.contains(*child))
                        .cloned(),
                );
            }
            kind if kind.is_populated() => leaves.settlements.push(entity),
            _ => leaves.unpopulated.push(entity),
        }
    }

    Ok(leaves)
}
