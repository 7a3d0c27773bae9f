//! World data: entity records and the stores that serve them

pub mod entity;
pub mod lenient;
pub mod loader;
pub mod records;
pub mod store;

pub use entity::{DistributionEntry, Entity, EntityBody, RegionData, SettlementData, UnpopulatedData};
pub use loader::{load_world_file, load_world_json, save_world_file};
pub use records::RecordDirectory;
pub use store::{EntityStore, StatisticsSink, WorldStore};
