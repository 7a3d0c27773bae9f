pub mod config;
pub mod error;
pub mod types;

pub use config::CensusConfig;
pub use error::{CensusError, Result};
pub use types::{EntityId, EntityKind};
