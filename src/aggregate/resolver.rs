//! Per-leaf contribution to the weight tables
//!
//! Settlements feed race, culture and language weighted by population.
//! Unpopulated areas feed terrain weighted by area. Each category picks its
//! data source once per entity: an explicit distribution, a single value, or
//! nothing.

use crate::aggregate::weights::WeightTables;
use crate::catalog::CategoryMapper;
use crate::core::config::CensusConfig;
use crate::world::entity::{DistributionEntry, SettlementData, UnpopulatedData};

/// Read a percent that may be on either a 0-1 or a 0-100 scale.
///
/// Values strictly above `threshold` are divided by 100; anything else is
/// taken as already fractional, so `1.0` at the default threshold is 100%.
pub fn fraction(raw: f64, threshold: f64) -> f64 {
    if raw > threshold {
        raw / 100.0
    } else {
        raw
    }
}

/// Where a category's data comes from for one entity
#[derive(Debug, Clone, Copy, PartialEq)]
enum Source<'a> {
    Distribution(&'a [DistributionEntry]),
    Single(&'a str),
    Absent,
}

impl<'a> Source<'a> {
    fn of(distribution: &'a [DistributionEntry], single: Option<&'a str>) -> Self {
        if !distribution.is_empty() {
            return Source::Distribution(distribution);
        }
        match single.map(str::trim) {
            Some(value) if !value.is_empty() => Source::Single(value),
            _ => Source::Absent,
        }
    }
}

/// Which step of the language fallback produced a settlement's languages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageSource {
    /// Culture distribution mapped through the catalog
    CultureDistribution,
    /// The settlement's single culture mapped through the catalog
    SingleCulture,
    /// Languages of the resident characters
    Residents,
    /// Nothing usable
    Unknown,
}

/// Feeds leaf entities into a set of weight tables
pub struct Resolver<'a, M: CategoryMapper + ?Sized> {
    mapper: &'a M,
    config: &'a CensusConfig,
}

impl<'a, M: CategoryMapper + ?Sized> Resolver<'a, M> {
    pub fn new(mapper: &'a M, config: &'a CensusConfig) -> Self {
        Self { mapper, config }
    }

    fn fraction(&self, raw: f64) -> f64 {
        fraction(raw, self.config.percent_scale_threshold)
    }

    /// Add a settlement's race, culture and language weight
    pub fn add_settlement(&self, data: &SettlementData, tables: &mut WeightTables) -> LanguageSource {
        let weight = data.population as f64;

        for entry in &data.race_distribution {
            tables.race.add(&entry.key, weight * self.fraction(entry.percent));
        }

        match Source::of(&data.culture_distribution, data.culture.as_deref()) {
            Source::Distribution(entries) => {
                for entry in entries {
                    tables.culture.add(&entry.key, weight * self.fraction(entry.percent));
                }
            }
            Source::Single(culture) => tables.culture.add(culture, weight),
            Source::Absent => {}
        }

        self.add_languages(data, weight, tables)
    }

    fn add_languages(
        &self,
        data: &SettlementData,
        weight: f64,
        tables: &mut WeightTables,
    ) -> LanguageSource {
        // Catalog steps only apply when a catalog is loaded at all
        if !self.mapper.is_empty() {
            let mut mapped = false;
            for entry in &data.culture_distribution {
                if let Some(language) = self.mapper.primary_language_of(&entry.key) {
                    tables.language.add(language, weight * self.fraction(entry.percent));
                    mapped = true;
                }
            }
            if mapped {
                return LanguageSource::CultureDistribution;
            }

            let single = data
                .culture
                .as_deref()
                .and_then(|culture| self.mapper.primary_language_of(culture));
            if let Some(language) = single {
                tables.language.add(language, weight);
                return LanguageSource::SingleCulture;
            }
        }

        let residents = &data.character_languages;
        if residents.is_empty() {
            return LanguageSource::Unknown;
        }
        let share = weight / residents.len() as f64;
        for languages in residents {
            let mut spoken: Vec<String> = Vec::with_capacity(languages.len());
            for language in languages {
                let folded = language.trim().to_lowercase();
                if spoken.contains(&folded) {
                    continue;
                }
                spoken.push(folded);
                tables.language.add(language, share);
            }
        }
        LanguageSource::Residents
    }

    /// Add an unpopulated area's terrain weight
    pub fn add_unpopulated(&self, data: &UnpopulatedData, tables: &mut WeightTables) {
        let area = data.effective_area_weight(self.config.default_area_weight);
        match Source::of(&data.terrain_breakdown, data.terrain.as_deref()) {
            Source::Distribution(entries) => {
                for entry in entries {
                    tables.terrain.add(&entry.key, area * self.fraction(entry.percent));
                }
            }
            Source::Single(terrain) => tables.terrain.add(terrain, area),
            Source::Absent => {}
        }
    }
}
