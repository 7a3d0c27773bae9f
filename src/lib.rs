//! Realm Census - derived statistics for hierarchical world regions

pub mod aggregate;
pub mod catalog;
pub mod core;
pub mod world;

pub use crate::aggregate::{Census, DerivedStatistics, PercentEntry};
pub use crate::catalog::{CategoryMapper, LanguageCatalog};
pub use crate::core::{CensusConfig, CensusError, EntityId, EntityKind, Result};
pub use crate::world::{Entity, EntityStore, RecordDirectory, StatisticsSink, WorldStore};
