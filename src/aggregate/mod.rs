//! Region statistics aggregation
//!
//! Rolls settlement and unpopulated-area data up through a region's
//! subordinate graph into population, race, culture, language and terrain
//! distributions.

pub mod census;
pub mod hierarchy;
pub mod normalize;
pub mod output;
pub mod resolver;
pub mod weights;

pub use census::{recompute_all, recompute_and_store, Census};
pub use hierarchy::{collect_leaves, Leaves};
pub use normalize::{normalize, PercentEntry};
pub use output::{format_distribution, DerivedStatistics};
pub use resolver::{fraction, LanguageSource, Resolver};
pub use weights::{WeightTable, WeightTables};
