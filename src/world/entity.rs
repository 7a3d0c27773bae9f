//! Entity records as authored for the world: regions, settlements, points of
//! interest and unpopulated areas

use serde::{Deserialize, Serialize};

use crate::aggregate::output::DerivedStatistics;
use crate::core::types::{EntityId, EntityKind};
use crate::world::lenient;

/// A node of the region graph
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    #[serde(
        default,
        deserialize_with = "lenient::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub name: String,
    #[serde(flatten)]
    pub body: EntityBody,
}

/// Kind-specific payload, tagged by `kind` in the record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityBody {
    Region(RegionData),
    Settlement(SettlementData),
    PointOfInterest(SettlementData),
    Unpopulated(UnpopulatedData),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionData {
    /// Declared subordinates, in authoring order. May name other regions.
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub subordinate_ids: Vec<EntityId>,
    /// Last roll-up written back onto this region
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<DerivedStatistics>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SettlementData {
    #[serde(default, deserialize_with = "lenient::population")]
    pub population: u64,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub race_distribution: Vec<DistributionEntry>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub culture_distribution: Vec<DistributionEntry>,
    /// Used when `culture_distribution` is empty
    #[serde(default, deserialize_with = "lenient::optional_key")]
    pub culture: Option<String>,
    /// Languages spoken by each resident character, one list per resident
    #[serde(default, deserialize_with = "lenient::language_lists")]
    pub character_languages: Vec<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UnpopulatedData {
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub terrain_breakdown: Vec<DistributionEntry>,
    /// Used when `terrain_breakdown` is empty
    #[serde(default, deserialize_with = "lenient::optional_key")]
    pub terrain: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub area_weight: Option<f64>,
}

impl UnpopulatedData {
    /// Area weight, or `default` when the recorded one is unknown or not positive
    pub fn effective_area_weight(&self, default: f64) -> f64 {
        match self.area_weight {
            Some(w) if w > 0.0 && w.is_finite() => w,
            _ => default,
        }
    }
}

/// One (key, percent) pair. Percent may be 0-1 or 0-100.
///
/// Records name the key `key`, `name`, `id` or `terrain_type`, and the percent
/// `percent`, `percentage` or `value`. When several are present the first
/// usable one in that order wins.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "DistributionEntryIn")]
pub struct DistributionEntry {
    pub key: String,
    pub percent: f64,
}

#[derive(Deserialize)]
struct DistributionEntryIn {
    #[serde(default, deserialize_with = "lenient::optional_key")]
    key: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_key")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_key")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_key")]
    terrain_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    percent: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    percentage: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    value: Option<f64>,
}

impl From<DistributionEntryIn> for DistributionEntry {
    fn from(raw: DistributionEntryIn) -> Self {
        Self {
            key: raw
                .key
                .or(raw.name)
                .or(raw.id)
                .or(raw.terrain_type)
                .unwrap_or_default(),
            percent: raw.percent.or(raw.percentage).or(raw.value).unwrap_or(0.0),
        }
    }
}

impl DistributionEntry {
    pub fn new(key: impl Into<String>, percent: f64) -> Self {
        Self {
            key: key.into(),
            percent,
        }
    }
}

impl Entity {
    pub fn region(id: impl Into<EntityId>, subordinate_ids: &[&str]) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            body: EntityBody::Region(RegionData {
                subordinate_ids: subordinate_ids.iter().map(|s| EntityId::from(*s)).collect(),
                statistics: None,
            }),
        }
    }

    pub fn settlement(id: impl Into<EntityId>, data: SettlementData) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            body: EntityBody::Settlement(data),
        }
    }

    pub fn unpopulated(id: impl Into<EntityId>, data: UnpopulatedData) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            body: EntityBody::Unpopulated(data),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn kind(&self) -> EntityKind {
        match self.body {
            EntityBody::Region(_) => EntityKind::Region,
            EntityBody::Settlement(_) => EntityKind::Settlement,
            EntityBody::PointOfInterest(_) => EntityKind::PointOfInterest,
            EntityBody::Unpopulated(_) => EntityKind::Unpopulated,
        }
    }

    /// Declared subordinates; empty for anything but a region
    pub fn subordinate_ids(&self) -> &[EntityId] {
        match &self.body {
            EntityBody::Region(region) => &region.subordinate_ids,
            _ => &[],
        }
    }

    /// Statistics last written onto a region
    pub fn statistics(&self) -> Option<&DerivedStatistics> {
        match &self.body {
            EntityBody::Region(region) => region.statistics.as_ref(),
            _ => None,
        }
    }

    pub fn as_region_mut(&mut self) -> Option<&mut RegionData> {
        match &mut self.body {
            EntityBody::Region(region) => Some(region),
            _ => None,
        }
    }

    /// Settlement payload, shared by settlements and points of interest
    pub fn as_settlement(&self) -> Option<&SettlementData> {
        match &self.body {
            EntityBody::Settlement(data) | EntityBody::PointOfInterest(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_unpopulated(&self) -> Option<&UnpopulatedData> {
        match &self.body {
            EntityBody::Unpopulated(data) => Some(data),
            _ => None,
        }
    }

    /// Display name, falling back to the id
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            self.id.as_str()
        } else {
            &self.name
        }
    }
}
