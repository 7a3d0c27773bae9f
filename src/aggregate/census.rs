//! Region census: recompute a region's derived statistics on demand
//!
//! Every call is a full recompute with its own visited set and weight
//! tables, so independent regions can be recomputed in parallel. Writing two
//! results for the same region concurrently is the caller's problem; the
//! `&mut` write-back functions here serialize it.

use rayon::prelude::*;

use crate::aggregate::hierarchy::collect_leaves;
use crate::aggregate::normalize::normalize;
use crate::aggregate::output::DerivedStatistics;
use crate::aggregate::resolver::{LanguageSource, Resolver};
use crate::aggregate::weights::WeightTables;
use crate::catalog::CategoryMapper;
use crate::core::config::CensusConfig;
use crate::core::error::Result;
use crate::core::types::{EntityId, EntityKind};
use crate::world::store::{EntityStore, StatisticsSink, WorldStore};

/// Recomputes region statistics against an entity store and a language catalog
pub struct Census<'a, S: EntityStore + ?Sized, M: CategoryMapper + ?Sized> {
    store: &'a S,
    mapper: &'a M,
    config: &'a CensusConfig,
}

impl<'a, S, M> Census<'a, S, M>
where
    S: EntityStore + ?Sized,
    M: CategoryMapper + ?Sized,
{
    pub fn new(store: &'a S, mapper: &'a M, config: &'a CensusConfig) -> Self {
        Self {
            store,
            mapper,
            config,
        }
    }

    /// Recompute the statistics of `region_id` from scratch.
    ///
    /// An unknown id, or one that is not a region, yields empty statistics.
    /// Only failures of the store itself produce an error.
    pub fn recompute(&self, region_id: &EntityId) -> Result<DerivedStatistics> {
        let Some(region) = self.store.lookup(region_id)? else {
            tracing::warn!("Region {} not found, nothing to recompute", region_id);
            return Ok(DerivedStatistics::default());
        };
        if region.kind() != EntityKind::Region {
            tracing::warn!("Entity {} is a {:?}, not a region", region_id, region.kind());
            return Ok(DerivedStatistics::default());
        }

        let leaves = collect_leaves(self.store, region_id, region.subordinate_ids())?;
        let resolver = Resolver::new(self.mapper, self.config);
        let mut tables = WeightTables::new();

        let mut population: u64 = 0;
        let mut from_residents = 0usize;
        for settlement in &leaves.settlements {
            let Some(data) = settlement.as_settlement() else {
                continue;
            };
            population = population.saturating_add(data.population);
            if resolver.add_settlement(data, &mut tables) == LanguageSource::Residents {
                from_residents += 1;
            }
        }
        for area in &leaves.unpopulated {
            if let Some(data) = area.as_unpopulated() {
                resolver.add_unpopulated(data, &mut tables);
            }
        }

        let statistics = finish(population.min(self.config.population_ceiling), &tables);
        tracing::debug!(
            "Recomputed {}: {} settlements, {} unpopulated areas, {} nested regions, {} missing, population {} ({} settlements used resident languages)",
            region.label(),
            leaves.settlements.len(),
            leaves.unpopulated.len(),
            leaves.regions,
            leaves.missing,
            statistics.total_population,
            from_residents,
        );
        Ok(statistics)
    }

    /// Recompute several regions. Above the configured threshold the regions
    /// are processed in parallel; results keep the order of `region_ids`.
    pub fn recompute_many(
        &self,
        region_ids: &[EntityId],
    ) -> Result<Vec<(EntityId, DerivedStatistics)>>
    where
        S: Sync,
        M: Sync,
    {
        let run = |id: &EntityId| self.recompute(id).map(|stats| (id.clone(), stats));
        if region_ids.len() >= self.config.parallel_threshold {
            region_ids.par_iter().map(run).collect()
        } else {
            region_ids.iter().map(run).collect()
        }
    }
}

/// Normalize the accumulated tables into the final record
fn finish(total_population: u64, tables: &WeightTables) -> DerivedStatistics {
    let terrain_breakdown = normalize(&tables.terrain);
    let dominant_terrain = terrain_breakdown.iter().map(|e| e.key.clone()).collect();
    DerivedStatistics {
        total_population,
        race_distribution: normalize(&tables.race),
        culture_distribution: normalize(&tables.culture),
        language_distribution: normalize(&tables.language),
        terrain_breakdown,
        dominant_terrain,
    }
}

/// Recompute one region and assign the result onto it.
/// Returns the statistics whether or not the store accepted them.
pub fn recompute_and_store<T, M>(
    store: &mut T,
    mapper: &M,
    config: &CensusConfig,
    region_id: &EntityId,
) -> Result<DerivedStatistics>
where
    T: EntityStore + StatisticsSink,
    M: CategoryMapper + ?Sized,
{
    let statistics = Census::new(&*store, mapper, config).recompute(region_id)?;
    if !store.store_statistics(region_id, statistics.clone())? {
        tracing::debug!("Statistics for {} were not stored", region_id);
    }
    Ok(statistics)
}

/// Recompute every region of a world and write each result back.
/// Returns the number of regions updated.
pub fn recompute_all<M>(store: &mut WorldStore, mapper: &M, config: &CensusConfig) -> Result<usize>
where
    M: CategoryMapper + Sync + ?Sized,
{
    let region_ids = store.region_ids();
    let results = Census::new(&*store, mapper, config).recompute_many(&region_ids)?;

    let mut updated = 0;
    for (id, statistics) in results {
        if store.store_statistics(&id, statistics)? {
            updated += 1;
        }
    }
    tracing::info!("Recomputed statistics for {} regions", updated);
    Ok(updated)
}
